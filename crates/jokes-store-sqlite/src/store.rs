//! [`SqliteStore`] — the SQLite implementation of [`JokeStore`].

use std::{path::Path, time::Duration};

use jokes_core::{
  joke::{Joke, JokeContent},
  store::JokeStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A joke store bound to one SQLite connection.
///
/// The connection lives exactly as long as this value. Dropping it closes the
/// connection, and SQLite discards any transaction that was still open.
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open a new connection to the database file at `path`.
  pub async fn connect(path: &Path, busy_timeout: Duration) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;

    conn
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        Ok(())
      })
      .await?;

    Ok(Self { conn })
  }

  async fn call<F, R>(&self, function: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, tokio_rusqlite::Error>
      + Send
      + 'static,
    R: Send + 'static,
  {
    Ok(self.conn.call(function).await?)
  }

  async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await
  }
}

// ─── JokeStore impl ──────────────────────────────────────────────────────────

impl JokeStore for SqliteStore {
  async fn ensure_schema(&mut self) -> jokes_core::Result<()> {
    self.execute_batch(SCHEMA).await?;
    Ok(())
  }

  async fn ping(&self) -> jokes_core::Result<()> {
    self
      .call(|conn| {
        // Touches the table, so a database whose schema never got created
        // reports unhealthy instead of failing later on every request.
        conn.query_row("SELECT EXISTS (SELECT 1 FROM jokes)", [], |row| {
          row.get::<_, i64>(0)
        })?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_all(&self) -> jokes_core::Result<Vec<Joke>> {
    let jokes = self
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, setup, punchline FROM jokes ORDER BY id ASC")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Joke {
              id:        row.get(0)?,
              setup:     row.get(1)?,
              punchline: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(jokes)
  }

  async fn insert(&mut self, content: JokeContent) -> jokes_core::Result<Joke> {
    let setup     = content.setup.clone();
    let punchline = content.punchline.clone();

    let id = self
      .call(move |conn| {
        conn.execute(
          "INSERT INTO jokes (setup, punchline) VALUES (?1, ?2)",
          rusqlite::params![setup, punchline],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(content.into_joke(id))
  }

  // Deferred: the write lock is taken by the first INSERT, so it is never held
  // while the upstream fetch ahead of that insert is in flight.
  async fn begin(&mut self) -> jokes_core::Result<()> {
    self.execute_batch("BEGIN").await?;
    Ok(())
  }

  async fn commit(&mut self) -> jokes_core::Result<()> {
    self.execute_batch("COMMIT").await?;
    Ok(())
  }

  async fn rollback(&mut self) -> jokes_core::Result<()> {
    self.execute_batch("ROLLBACK").await?;
    Ok(())
  }
}
