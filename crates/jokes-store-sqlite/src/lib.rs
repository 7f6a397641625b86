//! SQLite backend for the jokes service.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! per connection without blocking the async runtime. Every call to
//! [`SqliteProvider::acquire`] opens a new connection to the database file;
//! the returned [`SqliteStore`] closes it when dropped.

mod provider;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use provider::SqliteProvider;
pub use store::SqliteStore;
