//! Error taxonomy shared by every layer of the service.
//!
//! Backends convert their own errors into one of these variants at the trait
//! boundary. Only the HTTP layer maps them to status codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database connection could not be opened or used.
  #[error("database connection error: {0}")]
  ServiceUnavailable(String),

  /// The upstream joke provider failed or was unreachable.
  #[error("external API request failed: {0}")]
  UpstreamFailure(String),

  /// A caller-supplied parameter failed validation.
  #[error("{0}")]
  InvalidArgument(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
