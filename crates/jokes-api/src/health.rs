//! Handlers for `/` and `/health`.

use axum::{Json, extract::State};
use jokes_core::{
  source::JokeSource,
  store::{ConnectionProvider, JokeStore},
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct Greeting {
  pub message: &'static str,
}

/// `GET /` — static greeting, no I/O.
pub async fn root() -> Json<Greeting> {
  Json(Greeting { message: "Hello, World! My Jokes API is running." })
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
  pub status:              &'static str,
  pub database_connection: &'static str,
}

/// `GET /health` — opens a connection and queries the `jokes` table; 503 if
/// either fails.
pub async fn check<P, J>(
  State(state): State<AppState<P, J>>,
) -> Result<Json<HealthBody>, ApiError>
where
  P: ConnectionProvider,
  J: JokeSource,
{
  let store = state.provider.acquire().await?;
  store.ping().await?;
  Ok(Json(HealthBody { status: "ok", database_connection: "successful" }))
}
