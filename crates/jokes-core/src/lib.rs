//! Core types, traits and the fetch-and-persist workflow for the jokes
//! service.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::ConnectionProvider`] and [`store::JokeStore`];
//! upstream clients implement [`source::JokeSource`]. The [`workflow`] module
//! composes the two into transactional units of work.

pub mod error;
pub mod joke;
pub mod source;
pub mod store;
pub mod workflow;

pub use error::{Error, Result};
pub use joke::{Joke, JokeContent};
