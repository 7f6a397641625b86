//! [`SqliteProvider`] — one SQLite connection per request.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use jokes_core::store::ConnectionProvider;
use tracing::warn;

use crate::SqliteStore;

/// How long a connection waits on a locked database by default.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Hands out a freshly opened [`SqliteStore`] per [`acquire`](Self::acquire).
///
/// Opening is lazy: constructing a provider touches nothing on disk, so an
/// unreachable database only shows up when a request tries to use it.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
  path:         PathBuf,
  busy_timeout: Duration,
}

impl SqliteProvider {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), busy_timeout: DEFAULT_BUSY_TIMEOUT }
  }

  pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
    self.busy_timeout = busy_timeout;
    self
  }

  pub fn path(&self) -> &Path { &self.path }
}

impl ConnectionProvider for SqliteProvider {
  type Store = SqliteStore;

  async fn acquire(&self) -> jokes_core::Result<SqliteStore> {
    let store = SqliteStore::connect(&self.path, self.busy_timeout)
      .await
      .inspect_err(|e| warn!(error = %e, "database connection failed"))?;
    Ok(store)
  }
}
