//! Error type for `jokes-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot open database at {path:?}: {source}")]
  Open {
    path:   PathBuf,
    #[source]
    source: tokio_rusqlite::Error,
  },

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every database failure is a service-availability problem to callers.
impl From<Error> for jokes_core::Error {
  fn from(err: Error) -> Self {
    jokes_core::Error::ServiceUnavailable(err.to_string())
  }
}
