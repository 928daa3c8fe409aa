//! Read-only reference data: teams, drivers and the race calendar.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/teams` | |
//! | `GET`  | `/drivers` | |
//! | `GET`  | `/races` | Calendar order |
//! | `GET`  | `/races/next` | 404 once the season is over |

use axum::{Json, extract::State};
use p10_core::{
  calendar::next_race,
  reference::{Driver, Race, Team},
  store::GameStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /teams`
pub async fn teams<S: GameStore>(State(state): State<ApiState<S>>) -> Json<Vec<Team>> {
  Json(state.reference.teams().to_vec())
}

/// `GET /drivers`
pub async fn drivers<S: GameStore>(State(state): State<ApiState<S>>) -> Json<Vec<Driver>> {
  Json(state.reference.drivers().to_vec())
}

/// `GET /races`
pub async fn races<S: GameStore>(State(state): State<ApiState<S>>) -> Json<Vec<Race>> {
  Json(state.reference.races().to_vec())
}

/// `GET /races/next`
pub async fn next<S: GameStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Race>, ApiError> {
  let today = state.today();
  next_race(state.reference.races(), today)
    .cloned()
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("no race after {today}")))
}
