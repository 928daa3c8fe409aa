//! Derived views: standings, awards and per-race scores.
//!
//! Every request re-derives from a fresh store snapshot.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/standings` | Strong `ETag`; 304 on matching `If-None-Match` |
//! | `GET`  | `/awards` | Awards plus a `seasonComplete` flag |
//! | `GET`  | `/races/:round/scores` | `?session=main\|sprint`, default `main` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use p10_core::{
  Error,
  awards::{Award, season_awards},
  calendar::season_complete,
  prediction::SessionKind,
  standings::{RaceScoreLine, aggregate, race_breakdown},
  store::GameStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  ApiState,
  error::ApiError,
  etag::{compute_etag, if_none_match},
};

// ─── Standings ────────────────────────────────────────────────────────────────

/// `GET /standings`
pub async fn standings<S: GameStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let snapshot = state.store.snapshot().await.map_err(ApiError::store)?;
  let standings = aggregate(&state.reference, &snapshot);
  let etag = compute_etag(&standings);

  if let Some(value) = headers.get(header::IF_NONE_MATCH)
    && let Ok(value) = value.to_str()
    && if_none_match(value, &etag)
  {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }

  Ok(([(header::ETAG, etag)], Json(standings)).into_response())
}

// ─── Awards ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardsBody {
  pub season_complete: bool,
  /// `null` when nobody has registered yet.
  pub awards:          Option<Vec<Award>>,
}

/// `GET /awards`
pub async fn awards<S: GameStore>(
  State(state): State<ApiState<S>>,
) -> Result<Json<AwardsBody>, ApiError> {
  let snapshot = state.store.snapshot().await.map_err(ApiError::store)?;
  let standings = aggregate(&state.reference, &snapshot);
  Ok(Json(AwardsBody {
    season_complete: season_complete(&state.reference, &snapshot),
    awards:          season_awards(&standings),
  }))
}

// ─── Race breakdown ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoresParams {
  pub session: Option<SessionKind>,
}

/// `GET /races/:round/scores[?session=sprint]`
pub async fn race_scores<S: GameStore>(
  State(state): State<ApiState<S>>,
  Path(round): Path<u32>,
  Query(params): Query<ScoresParams>,
) -> Result<Json<Vec<RaceScoreLine>>, ApiError> {
  let session = params.session.unwrap_or(SessionKind::Main);
  let race = state
    .reference
    .race(round)
    .ok_or_else(|| ApiError::NotFound(format!("round {round} not found")))?;
  if session.is_sprint() && !race.has_sprint {
    return Err(Error::NoSprint(round).into());
  }

  let snapshot = state.store.snapshot().await.map_err(ApiError::store)?;
  Ok(Json(race_breakdown(
    &state.reference,
    &snapshot,
    round,
    session,
  )))
}
