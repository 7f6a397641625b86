//! Error type for `jokes-upstream`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Connect, timeout, or body decoding failure.
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("upstream responded with {0}")]
  Status(reqwest::StatusCode),

  #[error("{field} is {len} characters long (limit {limit})")]
  FieldTooLong {
    field: &'static str,
    len:   usize,
    limit: usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for jokes_core::Error {
  fn from(err: Error) -> Self {
    jokes_core::Error::UpstreamFailure(err.to_string())
  }
}
