//! Fetch-and-persist units of work.
//!
//! [`fetch_and_persist`] is the building block: one upstream fetch followed by
//! one insert, with no transaction handling of its own. [`create_one`] and
//! [`collect`] own the transaction boundary around it, so a batch either
//! commits every joke it fetched or none of them.

use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  joke::Joke,
  source::JokeSource,
  store::JokeStore,
};

/// Batch size used by `POST /jokes/collect` when `count` is omitted.
pub const DEFAULT_BATCH_SIZE: usize = 10;

// ─── Batch size ──────────────────────────────────────────────────────────────

/// A validated, strictly positive number of jokes to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
  /// Validate a caller-supplied count. Performs no I/O.
  pub fn new(count: i64) -> Result<Self> {
    if count < 1 {
      return Err(Error::InvalidArgument("Count must be 1 or greater.".to_owned()));
    }
    usize::try_from(count)
      .map(Self)
      .map_err(|_| Error::InvalidArgument(format!("Count {count} is too large.")))
  }

  pub fn get(self) -> usize { self.0 }
}

impl Default for BatchSize {
  fn default() -> Self { Self(DEFAULT_BATCH_SIZE) }
}

// ─── Units of work ───────────────────────────────────────────────────────────

/// Fetch one joke from `source` and insert it through `store`.
///
/// An upstream failure is returned before any write is attempted. Neither
/// begins nor commits a transaction.
pub async fn fetch_and_persist<S, J>(store: &mut S, source: &J) -> Result<Joke>
where
  S: JokeStore,
  J: JokeSource,
{
  let content = source.fetch_one().await?;
  let joke = store.insert(content).await?;
  debug!(id = joke.id, "stored joke");
  Ok(joke)
}

/// Fetch and store a single joke in its own transaction.
pub async fn create_one<S, J>(store: &mut S, source: &J) -> Result<Joke>
where
  S: JokeStore,
  J: JokeSource,
{
  store.begin().await?;
  let outcome = fetch_and_persist(store, source).await;
  settle(store, outcome).await
}

/// Fetch and store `size` jokes, in order, inside one transaction.
///
/// The first failure aborts the batch: the transaction is rolled back, every
/// joke inserted so far is discarded, and that failure is returned.
pub async fn collect<S, J>(store: &mut S, source: &J, size: BatchSize) -> Result<Vec<Joke>>
where
  S: JokeStore,
  J: JokeSource,
{
  info!(count = size.get(), "collecting jokes");
  store.begin().await?;
  let outcome = fetch_batch(store, source, size).await;
  settle(store, outcome).await
}

async fn fetch_batch<S, J>(store: &mut S, source: &J, size: BatchSize) -> Result<Vec<Joke>>
where
  S: JokeStore,
  J: JokeSource,
{
  let mut jokes = Vec::new();
  for iteration in 1..=size.get() {
    let joke = fetch_and_persist(store, source)
      .await
      .inspect_err(|e| warn!(iteration, error = %e, "batch aborted"))?;
    jokes.push(joke);
  }
  Ok(jokes)
}

/// Commit on success, roll back on failure (including a failed commit).
///
/// A failed rollback is only logged: the error that caused it is the one
/// returned, and dropping the connection discards the transaction anyway.
async fn settle<S: JokeStore, T>(store: &mut S, outcome: Result<T>) -> Result<T> {
  let err = match outcome {
    Ok(value) => match store.commit().await {
      Ok(()) => return Ok(value),
      Err(e) => e,
    },
    Err(e) => e,
  };

  match store.rollback().await {
    Ok(()) => warn!(error = %err, "transaction rolled back"),
    Err(rollback_err) => {
      warn!(error = %err, rollback_error = %rollback_err, "rollback failed")
    }
  }
  Err(err)
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;
  use crate::joke::JokeContent;

  // ─── Fakes ─────────────────────────────────────────────────────────────────

  /// In-memory store that keeps uncommitted inserts apart from committed ones.
  #[derive(Default)]
  struct FakeStore {
    committed:      Vec<Joke>,
    pending:        Vec<Joke>,
    next_id:        i64,
    in_tx:          bool,
    inserts:        usize,
    fail_insert_on: Option<usize>,
    fail_commit:    bool,
    commits:        usize,
    rollbacks:      usize,
  }

  impl JokeStore for FakeStore {
    async fn ensure_schema(&mut self) -> Result<()> { Ok(()) }

    async fn ping(&self) -> Result<()> { Ok(()) }

    async fn list_all(&self) -> Result<Vec<Joke>> { Ok(self.committed.clone()) }

    async fn insert(&mut self, content: JokeContent) -> Result<Joke> {
      assert!(self.in_tx, "insert outside a transaction");
      self.inserts += 1;
      if self.fail_insert_on == Some(self.inserts) {
        return Err(Error::ServiceUnavailable("connection lost".into()));
      }
      self.next_id += 1;
      let joke = content.into_joke(self.next_id);
      self.pending.push(joke.clone());
      Ok(joke)
    }

    async fn begin(&mut self) -> Result<()> {
      assert!(!self.in_tx, "nested transaction");
      self.in_tx = true;
      Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
      if self.fail_commit {
        return Err(Error::ServiceUnavailable("database is locked".into()));
      }
      self.committed.append(&mut self.pending);
      self.in_tx = false;
      self.commits += 1;
      Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
      self.pending.clear();
      self.in_tx = false;
      self.rollbacks += 1;
      Ok(())
    }
  }

  /// Numbers its jokes and fails on one chosen call.
  #[derive(Default)]
  struct ScriptedSource {
    calls:   AtomicUsize,
    fail_on: Option<usize>,
  }

  impl ScriptedSource {
    fn failing_on(call: usize) -> Self {
      Self { fail_on: Some(call), ..Self::default() }
    }

    fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
  }

  impl JokeSource for ScriptedSource {
    async fn fetch_one(&self) -> Result<JokeContent> {
      let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
      if self.fail_on == Some(n) {
        return Err(Error::UpstreamFailure(format!("call {n} refused")));
      }
      Ok(JokeContent::new(format!("setup {n}"), format!("punchline {n}")))
    }
  }

  // ─── Batch size ────────────────────────────────────────────────────────────

  #[test]
  fn batch_size_rejects_zero_and_negative() {
    for count in [0, -1, i64::MIN] {
      assert!(matches!(BatchSize::new(count), Err(Error::InvalidArgument(_))));
    }
  }

  #[test]
  fn batch_size_defaults_to_ten() {
    assert_eq!(BatchSize::default().get(), 10);
    assert_eq!(BatchSize::new(3).unwrap().get(), 3);
  }

  // ─── Single create ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_one_commits_the_fetched_joke() {
    let mut store = FakeStore::default();
    let source = ScriptedSource::default();

    let joke = create_one(&mut store, &source).await.unwrap();

    assert_eq!(joke.id, 1);
    assert_eq!(joke.setup.as_deref(), Some("setup 1"));
    assert_eq!(store.committed, vec![joke]);
    assert_eq!(store.commits, 1);
  }

  #[tokio::test]
  async fn upstream_failure_skips_the_insert() {
    let mut store = FakeStore::default();
    let source = ScriptedSource::failing_on(1);

    let err = create_one(&mut store, &source).await.unwrap_err();

    assert!(matches!(err, Error::UpstreamFailure(_)));
    assert_eq!(store.inserts, 0);
    assert_eq!(store.rollbacks, 1);
    assert!(store.committed.is_empty());
  }

  #[tokio::test]
  async fn sequential_creates_get_increasing_ids() {
    let mut store = FakeStore::default();
    let source = ScriptedSource::default();

    let first = create_one(&mut store, &source).await.unwrap();
    let second = create_one(&mut store, &source).await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(store.committed.len(), 2);
  }

  #[tokio::test]
  async fn failed_commit_rolls_back_and_reports_the_commit_error() {
    let mut store = FakeStore { fail_commit: true, ..FakeStore::default() };
    let source = ScriptedSource::default();

    let err = create_one(&mut store, &source).await.unwrap_err();

    assert!(matches!(err, Error::ServiceUnavailable(_)));
    assert_eq!(store.rollbacks, 1);
    assert!(store.committed.is_empty());
  }

  // ─── Batch ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn collect_commits_once_in_fetch_order() {
    let mut store = FakeStore::default();
    let source = ScriptedSource::default();

    let jokes = collect(&mut store, &source, BatchSize::new(4).unwrap())
      .await
      .unwrap();

    let setups: Vec<_> = jokes.iter().map(|j| j.setup.clone().unwrap()).collect();
    assert_eq!(setups, ["setup 1", "setup 2", "setup 3", "setup 4"]);
    assert!(jokes.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(store.committed, jokes);
    assert_eq!(store.commits, 1);
  }

  #[tokio::test]
  async fn upstream_failure_at_any_iteration_persists_nothing() {
    for k in 1..=5 {
      let mut store = FakeStore::default();
      let source = ScriptedSource::failing_on(k);

      let err = collect(&mut store, &source, BatchSize::new(5).unwrap())
        .await
        .unwrap_err();

      assert!(matches!(err, Error::UpstreamFailure(_)), "iteration {k}");
      assert!(store.committed.is_empty(), "iteration {k}");
      assert_eq!(store.inserts, k - 1, "iteration {k}");
      assert_eq!(source.calls(), k, "no call after the failing one");
      assert_eq!(store.rollbacks, 1);
    }
  }

  #[tokio::test]
  async fn store_failure_mid_batch_persists_nothing() {
    let mut store = FakeStore { fail_insert_on: Some(2), ..FakeStore::default() };
    let source = ScriptedSource::default();

    let err = collect(&mut store, &source, BatchSize::new(3).unwrap())
      .await
      .unwrap_err();

    assert!(matches!(err, Error::ServiceUnavailable(_)));
    assert!(store.committed.is_empty());
    assert_eq!(source.calls(), 2);
  }
}
