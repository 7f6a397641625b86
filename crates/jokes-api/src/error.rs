//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use jokes_core::Error;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// An error returned by an API handler.
///
/// This is the only place where the core error taxonomy becomes an HTTP
/// status code.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self.0 {
      Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
      Error::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
      Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      warn!(%status, error = %self.0, "request failed");
    }
    (status, Json(json!({ "error": self.0.to_string() }))).into_response()
  }
}
