//! The `JokeStore` and `ConnectionProvider` traits.
//!
//! A [`JokeStore`] is bound to exactly one open database connection. It never
//! opens or closes that connection itself: a [`ConnectionProvider`] hands out
//! a fresh store per request, and dropping the store releases the connection.
//! Any transaction still open at that point is discarded.
//!
//! All methods return `Send` futures so the traits can be used from axum
//! handlers on a multi-threaded tokio runtime.

use std::future::Future;

use crate::{
  Result,
  joke::{Joke, JokeContent},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Repository over the `jokes` table, scoped to one connection.
///
/// Writes never commit on their own. Callers that want a durable write open
/// a transaction with [`begin`](Self::begin) and close it with
/// [`commit`](Self::commit) or [`rollback`](Self::rollback).
pub trait JokeStore: Send + Sync {
  /// Create the `jokes` table if it does not exist. Idempotent.
  fn ensure_schema(&mut self) -> impl Future<Output = Result<()>> + Send + '_;

  /// Round trip against the `jokes` table, used by the health check.
  ///
  /// Fails when the table is missing as well as when the connection is bad.
  fn ping(&self) -> impl Future<Output = Result<()>> + Send + '_;

  /// Every stored joke, ordered by id ascending.
  fn list_all(&self) -> impl Future<Output = Result<Vec<Joke>>> + Send + '_;

  /// Insert one joke and return it with its newly assigned id.
  fn insert(
    &mut self,
    content: JokeContent,
  ) -> impl Future<Output = Result<Joke>> + Send + '_;

  fn begin(&mut self) -> impl Future<Output = Result<()>> + Send + '_;

  fn commit(&mut self) -> impl Future<Output = Result<()>> + Send + '_;

  fn rollback(&mut self) -> impl Future<Output = Result<()>> + Send + '_;
}

// ─── Provider ────────────────────────────────────────────────────────────────

/// Opens one connection per call and wraps it in a [`JokeStore`].
///
/// Connect failures surface as [`Error::ServiceUnavailable`](crate::Error).
pub trait ConnectionProvider: Send + Sync {
  type Store: JokeStore;

  fn acquire(&self) -> impl Future<Output = Result<Self::Store>> + Send + '_;
}

/// Acquire a connection and make sure the schema exists.
///
/// Run once at process startup; safe to run again.
pub async fn prepare<P: ConnectionProvider>(provider: &P) -> Result<()> {
  let mut store = provider.acquire().await?;
  store.ensure_schema().await
}
