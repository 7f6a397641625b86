//! HTTP client for the upstream random-joke API.
//!
//! [`HttpJokeSource`] implements [`jokes_core::source::JokeSource`]: one `GET`
//! per call, no retries, every failure reported as
//! [`jokes_core::Error::UpstreamFailure`].

mod client;

pub mod error;

pub use client::{HttpJokeSource, UpstreamConfig};
pub use error::{Error, Result};
