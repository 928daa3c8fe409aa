//! Handlers for `/players` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/players` | uid order |
//! | `POST` | `/players` | Body: `{"uid":"...","displayName":"..."}`, `uid` optional |
//! | `GET`  | `/players/:uid` | 404 if not found |
//! | `GET`  | `/players/:uid/calendar` | Per-race status for this player |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use p10_core::{
  calendar::{CalendarEntry, calendar_for},
  player::Player,
  store::GameStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /players`
pub async fn list<S: GameStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Player>>, ApiError> {
  let players = state.store.list_players().await.map_err(ApiError::store)?;
  Ok(Json(players))
}

// ─── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
  pub uid:          Option<String>,
  #[serde(default)]
  pub display_name: String,
}

/// `POST /players` — creates or renames a player; returns 201 + the player.
pub async fn register<S: GameStore>(
  State(state): State<ApiState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError> {
  let uid = match body.uid.map(|u| u.trim().to_owned()) {
    Some(uid) if uid.is_empty() => {
      return Err(ApiError::BadRequest("uid must not be empty".into()));
    }
    Some(uid) => uid,
    None => Uuid::new_v4().to_string(),
  };

  let player = state
    .store
    .upsert_player(Player::new(uid, body.display_name.trim()))
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(player)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /players/:uid`
pub async fn get_one<S: GameStore>(
  State(state): State<ApiState<S>>,
  Path(uid): Path<String>,
) -> Result<Json<Player>, ApiError> {
  let player = state
    .store
    .get_player(&uid)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("player {uid} not found")))?;
  Ok(Json(player))
}

// ─── Calendar ─────────────────────────────────────────────────────────────────

/// `GET /players/:uid/calendar`
pub async fn calendar<S: GameStore>(
  State(state): State<ApiState<S>>,
  Path(uid): Path<String>,
) -> Result<Json<Vec<CalendarEntry>>, ApiError> {
  let snapshot = state.store.snapshot().await.map_err(ApiError::store)?;
  if snapshot.player(&uid).is_none() {
    return Err(ApiError::NotFound(format!("player {uid} not found")));
  }
  Ok(Json(calendar_for(
    &state.reference,
    &snapshot,
    &uid,
    state.today(),
  )))
}
