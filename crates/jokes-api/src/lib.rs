//! JSON REST API for the jokes service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`ConnectionProvider`](jokes_core::store::ConnectionProvider) and
//! [`JokeSource`](jokes_core::source::JokeSource). Every request that touches
//! the database acquires its own connection and releases it before the
//! response is sent.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = jokes_api::api_router(AppState::new(provider, source));
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod health;
pub mod jokes;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use jokes_core::{source::JokeSource, store::ConnectionProvider};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<P, J> {
  pub provider: Arc<P>,
  pub source:   Arc<J>,
}

impl<P, J> AppState<P, J> {
  pub fn new(provider: P, source: J) -> Self {
    Self {
      provider: Arc::new(provider),
      source:   Arc::new(source),
    }
  }
}

impl<P, J> Clone for AppState<P, J> {
  fn clone(&self) -> Self {
    Self {
      provider: Arc::clone(&self.provider),
      source:   Arc::clone(&self.source),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn api_router<P, J>(state: AppState<P, J>) -> Router<()>
where
  P: ConnectionProvider + 'static,
  J: JokeSource + 'static,
{
  Router::new()
    .route("/", get(health::root))
    .route("/health", get(health::check::<P, J>))
    .route("/jokes", get(jokes::list::<P, J>).post(jokes::create::<P, J>))
    .route("/jokes/collect", post(jokes::collect::<P, J>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
