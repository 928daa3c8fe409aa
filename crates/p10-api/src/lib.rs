//! JSON REST API for the P10 game.
//!
//! Exposes an axum [`Router`] backed by any [`p10_core::store::GameStore`]
//! and a fixed set of reference data. Auth, TLS, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", p10_api::api_router(ApiState::new(store, reference)))
//! ```

pub mod error;
pub mod etag;
pub mod players;
pub mod predictions;
pub mod reference;
pub mod results;
pub mod standings;

use std::sync::Arc;

use axum::{Router, routing::get};
use chrono::{NaiveDate, Utc};
use p10_core::{reference::ReferenceData, store::GameStore};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:     Arc<S>,
  pub reference: Arc<ReferenceData>,
  clock:         fn() -> NaiveDate,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      reference: Arc::clone(&self.reference),
      clock:     self.clock,
    }
  }
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, reference: Arc<ReferenceData>) -> Self {
    Self {
      store,
      reference,
      clock: || Utc::now().date_naive(),
    }
  }

  /// Replace the source of "today" used for lock and status rules.
  pub fn with_clock(self, clock: fn() -> NaiveDate) -> Self { Self { clock, ..self } }

  pub fn today(&self) -> NaiveDate { (self.clock)() }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: GameStore + 'static,
{
  Router::new()
    // Reference data
    .route("/teams", get(reference::teams::<S>))
    .route("/drivers", get(reference::drivers::<S>))
    .route("/races", get(reference::races::<S>))
    .route("/races/next", get(reference::next::<S>))
    .route("/races/{round}/scores", get(standings::race_scores::<S>))
    // Players
    .route("/players", get(players::list::<S>).post(players::register::<S>))
    .route("/players/{uid}", get(players::get_one::<S>))
    .route("/players/{uid}/calendar", get(players::calendar::<S>))
    // Predictions
    .route("/predictions", get(predictions::list::<S>).put(predictions::save::<S>))
    // Results
    .route("/results", get(results::list::<S>))
    .route(
      "/results/{round}/{session}",
      get(results::get_one::<S>).put(results::put::<S>),
    )
    // Derived views
    .route("/standings", get(standings::standings::<S>))
    .route("/awards", get(standings::awards::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use p10_core::season_2026;
  use p10_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  /// The Monday after the Chinese Grand Prix.
  fn mid_march() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 3, 16).unwrap() }

  async fn make_state() -> ApiState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let reference = season_2026::reference_data().unwrap();
    ApiState::new(Arc::new(store), Arc::new(reference)).with_clock(mid_march)
  }

  async fn send(
    state: &ApiState<SqliteStore>,
    method: &str,
    uri: &str,
    headers: Vec<(header::HeaderName, &str)>,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    api_router(state.clone()).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn register(state: &ApiState<SqliteStore>, uid: &str, name: &str) {
    let resp = send(
      state,
      "POST",
      "/players",
      vec![],
      Some(json!({ "uid": uid, "displayName": name })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
  }

  fn classification() -> Value {
    json!([
      { "position": 9, "driverId": "norris", "code": "NOR",
        "name": "Lando Norris", "status": "Finished" },
      { "position": 10, "driverId": "albon", "code": "ALB",
        "name": "Alex Albon", "status": "Finished" },
      { "position": 11, "driverId": "gasly", "code": "GAS",
        "name": "Pierre Gasly", "status": "+1 Lap" },
      { "position": 20, "driverId": "stroll", "code": "STR",
        "name": "Lance Stroll", "status": "Engine" }
    ])
  }

  // ── Reference data ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn reference_endpoints() {
    let state = make_state().await;

    let teams = json_body(send(&state, "GET", "/teams", vec![], None).await).await;
    assert_eq!(teams.as_array().unwrap().len(), 11);

    let drivers = json_body(send(&state, "GET", "/drivers", vec![], None).await).await;
    assert_eq!(drivers.as_array().unwrap().len(), 22);

    let races = json_body(send(&state, "GET", "/races", vec![], None).await).await;
    assert_eq!(races[1]["hasSprint"], true);

    let next = json_body(send(&state, "GET", "/races/next", vec![], None).await).await;
    assert_eq!(next["round"], 3);
  }

  #[tokio::test]
  async fn next_race_after_the_finale_is_404() {
    let state = make_state()
      .await
      .with_clock(|| NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
    let resp = send(&state, "GET", "/races/next", vec![], None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(json_body(resp).await["error"].is_string());
  }

  // ── Players ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_generates_uid_when_missing() {
    let state = make_state().await;
    let resp = send(
      &state,
      "POST",
      "/players",
      vec![],
      Some(json!({ "displayName": "Alice" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let player = json_body(resp).await;
    let uid = player["uid"].as_str().unwrap().to_owned();
    assert_eq!(uid.len(), 36);

    let fetched = json_body(send(&state, "GET", &format!("/players/{uid}"), vec![], None).await)
      .await;
    assert_eq!(fetched["displayName"], "Alice");
  }

  #[tokio::test]
  async fn unknown_player_is_404() {
    let state = make_state().await;
    let resp = send(&state, "GET", "/players/ghost", vec![], None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = send(&state, "GET", "/players/ghost/calendar", vec![], None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn player_calendar_reports_status() {
    let state = make_state().await;
    register(&state, "u1", "Alice").await;
    send(
      &state,
      "PUT",
      "/results/1/main",
      vec![],
      Some(classification()),
    )
    .await;

    let calendar =
      json_body(send(&state, "GET", "/players/u1/calendar", vec![], None).await).await;
    assert_eq!(calendar[0]["status"], "done");
    assert_eq!(calendar[0]["locked"], true);
    assert_eq!(calendar[1]["status"], "awaiting");
    assert_eq!(calendar[2]["status"], "open");
  }

  // ── Predictions ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_prediction_and_list() {
    let state = make_state().await;
    register(&state, "u1", "Alice").await;

    let resp = send(
      &state,
      "PUT",
      "/predictions",
      vec![],
      Some(json!({ "uid": "u1", "round": 3, "type": "main", "p10": "albon", "dnf": "" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let saved = json_body(resp).await;
    assert_eq!(saved["dnf"], Value::Null);
    assert!(saved["timestamp"].as_i64().unwrap() > 0);

    let listed =
      json_body(send(&state, "GET", "/predictions?uid=u1&round=3", vec![], None).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["p10"], "albon");
  }

  #[tokio::test]
  async fn prediction_for_unknown_driver_is_400() {
    let state = make_state().await;
    register(&state, "u1", "Alice").await;
    let resp = send(
      &state,
      "PUT",
      "/predictions",
      vec![],
      Some(json!({ "uid": "u1", "round": 3, "type": "main", "p10": "senna" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn sprint_prediction_without_sprint_is_400() {
    let state = make_state().await;
    register(&state, "u1", "Alice").await;
    let resp = send(
      &state,
      "PUT",
      "/predictions",
      vec![],
      Some(json!({ "uid": "u1", "round": 3, "type": "sprint", "p10": "albon" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn prediction_from_unregistered_player_is_404() {
    let state = make_state().await;
    let resp = send(
      &state,
      "PUT",
      "/predictions",
      vec![],
      Some(json!({ "uid": "ghost", "round": 3, "type": "main", "p10": "albon" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn locked_race_rejects_predictions() {
    let state = make_state().await;
    register(&state, "u1", "Alice").await;

    let body = json!({ "uid": "u1", "round": 1, "type": "main", "p10": "albon" });

    // Race day has passed but no result yet: still open.
    let resp = send(&state, "PUT", "/predictions", vec![], Some(body.clone())).await;
    assert_eq!(resp.status(), StatusCode::OK);

    send(&state, "PUT", "/results/1/main", vec![], Some(classification())).await;
    let resp = send(&state, "PUT", "/predictions", vec![], Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  // ── Results ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_and_get_result() {
    let state = make_state().await;
    let resp = send(&state, "PUT", "/results/2/sprint", vec![], Some(classification())).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let result = json_body(send(&state, "GET", "/results/2/sprint", vec![], None).await).await;
    assert_eq!(result["type"], "sprint");
    assert_eq!(result["results"].as_array().unwrap().len(), 4);

    let resp = send(&state, "GET", "/results/2/main", vec![], None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let all = json_body(send(&state, "GET", "/results", vec![], None).await).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn invalid_results_are_rejected() {
    let state = make_state().await;

    let resp = send(&state, "PUT", "/results/1/sprint", vec![], Some(classification())).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&state, "PUT", "/results/99/main", vec![], Some(classification())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let dup = json!([
      { "position": 10, "driverId": "albon", "code": "ALB", "name": "A", "status": "Finished" },
      { "position": 10, "driverId": "gasly", "code": "GAS", "name": "G", "status": "Finished" }
    ]);
    let resp = send(&state, "PUT", "/results/1/main", vec![], Some(dup)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Standings and awards ───────────────────────────────────────────────────

  async fn scored_season(state: &ApiState<SqliteStore>) {
    register(state, "u1", "Alice").await;
    register(state, "u2", "").await;
    send(
      state,
      "PUT",
      "/predictions",
      vec![],
      Some(json!({ "uid": "u1", "round": 1, "type": "main", "p10": "albon", "dnf": "stroll" })),
    )
    .await;
    send(
      state,
      "PUT",
      "/predictions",
      vec![],
      Some(json!({ "uid": "u2", "round": 1, "type": "main", "p10": "norris" })),
    )
    .await;
    send(state, "PUT", "/results/1/main", vec![], Some(classification())).await;
  }

  #[tokio::test]
  async fn standings_are_scored_and_ordered() {
    let state = make_state().await;
    scored_season(&state).await;

    let resp = send(&state, "GET", "/standings", vec![], None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ETAG));

    let standings = json_body(resp).await;
    assert_eq!(standings[0]["uid"], "u1");
    assert_eq!(standings[0]["totalPoints"], 26);
    assert_eq!(standings[0]["correctP10"], 1);
    assert_eq!(standings[0]["correctDnfs"], 1);
    assert_eq!(standings[1]["displayName"], "Unknown");
    assert_eq!(standings[1]["totalPoints"], 18);
    assert_eq!(standings[1]["biggestLoss"], 1);
  }

  #[tokio::test]
  async fn standings_honour_if_none_match() {
    let state = make_state().await;
    scored_season(&state).await;

    let first = send(&state, "GET", "/standings", vec![], None).await;
    let etag = first
      .headers()
      .get(header::ETAG)
      .unwrap()
      .to_str()
      .unwrap()
      .to_owned();

    let cached = send(
      &state,
      "GET",
      "/standings",
      vec![(header::IF_NONE_MATCH, etag.as_str())],
      None,
    )
    .await;
    assert_eq!(cached.status(), StatusCode::NOT_MODIFIED);

    send(
      &state,
      "PUT",
      "/predictions",
      vec![],
      Some(json!({ "uid": "u2", "round": 2, "type": "main", "p10": "albon" })),
    )
    .await;
    send(&state, "PUT", "/results/2/main", vec![], Some(classification())).await;

    let changed = send(
      &state,
      "GET",
      "/standings",
      vec![(header::IF_NONE_MATCH, etag.as_str())],
      None,
    )
    .await;
    assert_eq!(changed.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn awards_report_season_progress() {
    let state = make_state().await;

    let empty = json_body(send(&state, "GET", "/awards", vec![], None).await).await;
    assert_eq!(empty["awards"], Value::Null);
    assert_eq!(empty["seasonComplete"], false);

    scored_season(&state).await;
    let body = json_body(send(&state, "GET", "/awards", vec![], None).await).await;
    assert_eq!(body["seasonComplete"], false);
    let awards = body["awards"].as_array().unwrap();
    assert_eq!(awards.len(), 5);
    assert_eq!(awards[0]["kind"], "champion");
    assert_eq!(awards[0]["uid"], "u1");
  }

  #[tokio::test]
  async fn race_scores_breakdown() {
    let state = make_state().await;
    scored_season(&state).await;

    let lines = json_body(send(&state, "GET", "/races/1/scores", vec![], None).await).await;
    assert_eq!(lines[0]["uid"], "u1");
    assert_eq!(lines[0]["predicted"], "ALB");
    assert_eq!(lines[0]["score"]["points"], 26);
    assert_eq!(lines[1]["score"]["position"], 9);

    let resp = send(&state, "GET", "/races/1/scores?session=sprint", vec![], None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let lines =
      json_body(send(&state, "GET", "/races/2/scores?session=sprint", vec![], None).await).await;
    assert_eq!(lines[0]["score"], Value::Null);
  }
}
