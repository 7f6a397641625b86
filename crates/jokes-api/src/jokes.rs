//! Handlers for `/jokes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/jokes` | All stored jokes, id ascending |
//! | `POST` | `/jokes` | Fetch one joke upstream and store it; 201 |
//! | `POST` | `/jokes/collect` | `?count=N` (default 10); all-or-nothing batch; 201 |

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
  http::StatusCode,
  response::IntoResponse,
};
use jokes_core::{
  Error, Joke,
  source::JokeSource,
  store::{ConnectionProvider, JokeStore},
  workflow::{self, BatchSize},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /jokes`
pub async fn list<P, J>(
  State(state): State<AppState<P, J>>,
) -> Result<Json<Vec<Joke>>, ApiError>
where
  P: ConnectionProvider,
  J: JokeSource,
{
  let store = state.provider.acquire().await?;
  let jokes = store.list_all().await?;
  Ok(Json(jokes))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreatedJoke {
  pub message: &'static str,
  pub joke:    Joke,
}

/// `POST /jokes` — returns 201 + `{"message", "joke"}`.
pub async fn create<P, J>(
  State(state): State<AppState<P, J>>,
) -> Result<impl IntoResponse, ApiError>
where
  P: ConnectionProvider,
  J: JokeSource,
{
  let mut store = state.provider.acquire().await?;
  let joke = workflow::create_one(&mut store, state.source.as_ref()).await?;
  Ok((
    StatusCode::CREATED,
    Json(CreatedJoke { message: "Joke stored successfully!", joke }),
  ))
}

// ─── Collect ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CollectParams {
  pub count: Option<i64>,
}

impl CollectParams {
  /// The requested batch size, or [`BatchSize::default`] when `count` is absent.
  fn batch_size(&self) -> Result<BatchSize, Error> {
    self.count.map_or(Ok(BatchSize::default()), BatchSize::new)
  }
}

#[derive(Debug, Serialize)]
pub struct CollectedJokes {
  pub message:     String,
  pub jokes_added: Vec<Joke>,
}

/// `POST /jokes/collect[?count=N]` — returns 201 + `{"message", "jokes_added"}`.
///
/// `count` is validated before a connection is opened or anything is fetched.
/// A `count` that is not an integer is a 400 with the usual error body.
pub async fn collect<P, J>(
  State(state): State<AppState<P, J>>,
  params: Result<Query<CollectParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  P: ConnectionProvider,
  J: JokeSource,
{
  let Query(params) = params.map_err(|e| Error::InvalidArgument(e.body_text()))?;
  let size = params.batch_size()?;
  let mut store = state.provider.acquire().await?;
  let jokes = workflow::collect(&mut store, state.source.as_ref(), size).await?;
  Ok((
    StatusCode::CREATED,
    Json(CollectedJokes {
      message:     format!("Successfully stored {} jokes.", jokes.len()),
      jokes_added: jokes,
    }),
  ))
}
