//! p10 server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the JSON API over HTTP. The `sync` and
//! `standings` subcommands run a single results sync or print the current
//! standings and exit. `season` prints the loaded reference data as JSON.

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use chrono::Utc;
use clap::{Parser, Subcommand};
use p10_api::ApiState;
use p10_core::{standings::aggregate, store::GameStore};
use p10_results::{ResultsClient, sync_results};
use p10_server::{
  ServerConfig, expand_tilde, load_config, load_reference, render_season,
  render_standings, router, spawn_results_sync,
};
use p10_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "P10 prediction game server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Fetch any missing race results once and exit.
  Sync,
  /// Print the current standings and exit.
  Standings,
  /// Print the season reference data as JSON and exit.
  Season,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = load_config(&cli.config).context("failed to load configuration")?;
  let reference = Arc::new(load_reference(&server_cfg)?);

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => {
      let store = open_store(&server_cfg).await?;
      serve(server_cfg, store, reference).await
    }
    Command::Sync => {
      let store = open_store(&server_cfg).await?;
      let client = results_client(&server_cfg)?;
      let today = Utc::now().date_naive();
      let report = sync_results(&client, store.as_ref(), &reference, today)
        .await
        .context("results sync failed")?;
      println!(
        "saved {}, pending {}, failed {}, already stored {}",
        report.saved.len(),
        report.pending.len(),
        report.failed.len(),
        report.already_stored,
      );
      Ok(())
    }
    Command::Standings => {
      let store = open_store(&server_cfg).await?;
      let snapshot = store.snapshot().await.context("failed to read store")?;
      print!("{}", render_standings(&aggregate(&reference, &snapshot)));
      Ok(())
    }
    Command::Season => {
      println!("{}", render_season(&reference).context("failed to encode season")?);
      Ok(())
    }
  }
}

async fn open_store(server_cfg: &ServerConfig) -> anyhow::Result<Arc<SqliteStore>> {
  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  Ok(Arc::new(store))
}

async fn serve(
  server_cfg: ServerConfig,
  store: Arc<SqliteStore>,
  reference: Arc<p10_core::reference::ReferenceData>,
) -> anyhow::Result<()> {
  if let Some(secs) = server_cfg.sync_interval_secs.filter(|s| *s > 0) {
    let client = results_client(&server_cfg)?;
    tracing::info!(every_secs = secs, "background results sync enabled");
    spawn_results_sync(
      client,
      Arc::clone(&store),
      Arc::clone(&reference),
      Duration::from_secs(secs),
    );
  }

  let app = router(ApiState::new(store, reference));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

fn results_client(server_cfg: &ServerConfig) -> anyhow::Result<ResultsClient> {
  ResultsClient::new(server_cfg.results_base_url.clone(), server_cfg.season)
    .context("failed to build results client")
}
