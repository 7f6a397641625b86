//! The upstream joke provider abstraction.

use std::future::Future;

use crate::{Result, joke::JokeContent};

/// Something that can produce one random joke per call.
///
/// Implementations make exactly one attempt per call and report every
/// failure as [`Error::UpstreamFailure`](crate::Error::UpstreamFailure).
pub trait JokeSource: Send + Sync {
  fn fetch_one(&self) -> impl Future<Output = Result<JokeContent>> + Send + '_;
}
