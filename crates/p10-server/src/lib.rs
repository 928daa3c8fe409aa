//! Server wiring for the P10 game: configuration, the HTTP app, and the
//! background results sync.

use std::{
  fmt::Write as _,
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use axum::Router;
use chrono::Utc;
use p10_api::{ApiState, api_router};
use p10_core::{
  reference::ReferenceData, season_2026, standings::PlayerStanding, store::GameStore,
};
use p10_results::{ResultsSource, client::DEFAULT_BASE_URL, sync_results};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `P10_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub store_path:         PathBuf,
  /// JSON reference data; the built-in 2026 season when unset.
  pub season_path:        Option<PathBuf>,
  pub results_base_url:   String,
  pub season:             i32,
  /// Background sync period; no background sync when unset.
  pub sync_interval_secs: Option<u64>,
}

/// Layer the optional TOML file at `path` under `P10_*` environment
/// variables, on top of built-in defaults.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "p10.db")?
    .set_default("results_base_url", DEFAULT_BASE_URL)?
    .set_default("season", 2026)?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("P10").try_parsing(true))
    .build()?
    .try_deserialize()
}

/// Load reference data from `season_path`, or fall back to the built-in
/// season.
pub fn load_reference(config: &ServerConfig) -> anyhow::Result<ReferenceData> {
  let Some(path) = &config.season_path else {
    return season_2026::reference_data().context("built-in season is invalid");
  };
  let path = expand_tilde(path);
  let raw = std::fs::read_to_string(&path)
    .with_context(|| format!("failed to read season file {path:?}"))?;
  ReferenceData::from_json(&raw).with_context(|| format!("invalid season file {path:?}"))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

/// Pretty JSON for `reference`, readable back through `season_path`.
pub fn render_season(reference: &ReferenceData) -> serde_json::Result<String> {
  serde_json::to_string_pretty(&reference.to_file())
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full HTTP app: the JSON API under `/api`, with request tracing.
pub fn router<S>(state: ApiState<S>) -> Router
where
  S: GameStore + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Background sync ──────────────────────────────────────────────────────────

/// Run a results sync every `every`, starting immediately.
///
/// Failed passes are logged; the loop keeps going.
pub fn spawn_results_sync<R, S>(
  source: R,
  store: Arc<S>,
  reference: Arc<ReferenceData>,
  every: Duration,
) -> JoinHandle<()>
where
  R: ResultsSource + 'static,
  S: GameStore + 'static,
{
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
      interval.tick().await;
      let today = Utc::now().date_naive();
      if let Err(e) = sync_results(&source, store.as_ref(), &reference, today).await {
        tracing::error!(error = %e, "results sync aborted");
      }
    }
  })
}

// ─── Standings table ──────────────────────────────────────────────────────────

/// Plain-text standings for the terminal.
pub fn render_standings(standings: &[PlayerStanding]) -> String {
  let mut out = format!(
    "{:>3}  {:<20} {:>5} {:>4} {:>4} {:>6} {:>5}\n",
    "#", "Player", "Pts", "P10", "DNF", "Wrong", "Miss"
  );
  for (i, s) in standings.iter().enumerate() {
    let _ = writeln!(
      out,
      "{:>3}  {:<20} {:>5} {:>4} {:>4} {:>6} {:>5}",
      i + 1,
      s.display_name,
      s.total_points,
      s.correct_p10,
      s.correct_dnfs,
      s.wrong_guesses,
      s.biggest_loss,
    );
  }
  out
}
