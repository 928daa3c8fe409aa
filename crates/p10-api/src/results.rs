//! Handlers for `/results` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/results` | Ordered by round, then session |
//! | `GET`  | `/results/:round/:session` | 404 if not yet stored |
//! | `PUT`  | `/results/:round/:session` | Body: classification rows; overwrites |

use axum::{
  Json,
  extract::{Path, State},
};
use p10_core::{
  Error,
  prediction::SessionKind,
  result::{ClassificationEntry, RaceResult},
  store::GameStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /results`
pub async fn list<S: GameStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<RaceResult>>, ApiError> {
  let results = state.store.list_results().await.map_err(ApiError::store)?;
  Ok(Json(results))
}

/// `GET /results/:round/:session`
pub async fn get_one<S: GameStore>(
  State(state): State<ApiState<S>>,
  Path((round, session)): Path<(u32, SessionKind)>,
) -> Result<Json<RaceResult>, ApiError> {
  let result = state
    .store
    .get_result(round, session)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no {session} result for round {round}")))?;
  Ok(Json(result))
}

/// `PUT /results/:round/:session` — manual ingest of a classification.
pub async fn put<S: GameStore>(
  State(state): State<ApiState<S>>,
  Path((round, session)): Path<(u32, SessionKind)>,
  Json(entries): Json<Vec<ClassificationEntry>>,
) -> Result<Json<RaceResult>, ApiError> {
  let race = state
    .reference
    .race(round)
    .ok_or_else(|| ApiError::NotFound(format!("round {round} not found")))?;
  if session.is_sprint() && !race.has_sprint {
    return Err(Error::NoSprint(round).into());
  }

  let result = RaceResult::new(round, session, entries)?;
  state
    .store
    .save_result(result.clone())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(result))
}
