//! Handlers for `/predictions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/predictions` | Optional `?uid=` and `?round=` |
//! | `PUT`  | `/predictions` | Body: `{"uid","round","type","p10","dnf"}`; 409 once the race is locked |

use axum::{
  Json,
  extract::{Query, State},
};
use p10_core::{
  prediction::{NewPrediction, Prediction, SessionKind, validate_prediction},
  store::GameStore,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub uid:   Option<String>,
  pub round: Option<u32>,
}

/// `GET /predictions[?uid=<uid>][&round=<n>]`
pub async fn list<S: GameStore>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Prediction>>, ApiError> {
  let predictions = state
    .store
    .list_predictions(params.uid.as_deref(), params.round)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(predictions))
}

// ─── Save ─────────────────────────────────────────────────────────────────────

/// `PUT /predictions` — replaces any earlier guess for the same
/// `(uid, round, type)`.
pub async fn save<S: GameStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewPrediction>,
) -> Result<Json<Prediction>, ApiError> {
  let input = validate_prediction(&state.reference, body)?;

  state
    .store
    .get_player(&input.uid)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("player {} not found", input.uid)))?;

  // Both sessions of a weekend lock together, on the main result.
  let has_main_result = state
    .store
    .get_result(input.round, SessionKind::Main)
    .await
    .map_err(ApiError::store)?
    .is_some();
  let race = state
    .reference
    .race(input.round)
    .ok_or_else(|| ApiError::NotFound(format!("round {} not found", input.round)))?;
  race.ensure_unlocked(state.today(), has_main_result)?;

  let prediction = state
    .store
    .save_prediction(input)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(prediction))
}
