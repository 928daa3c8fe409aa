//! The `GameStore` trait.
//!
//! Implemented by storage backends (e.g. `p10-store-sqlite`). Higher layers
//! (`p10-api`, `p10-results`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  player::Player,
  prediction::{NewPrediction, Prediction, PredictionKey, SessionKind},
  result::RaceResult,
  snapshot::Snapshot,
};

/// Abstraction over a P10 storage backend.
///
/// Every write is an upsert on its natural key: a player by uid, a prediction
/// by `(uid, round, session)`, a result by `(round, session)`. Nothing is ever
/// deleted.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait GameStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Players ───────────────────────────────────────────────────────────

  /// Insert a player or update their display name.
  fn upsert_player(
    &self,
    player: Player,
  ) -> impl Future<Output = Result<Player, Self::Error>> + Send + '_;

  /// Retrieve a player by uid. Returns `None` if not found.
  fn get_player<'a>(
    &'a self,
    uid: &'a str,
  ) -> impl Future<Output = Result<Option<Player>, Self::Error>> + Send + 'a;

  /// List all players in uid order.
  fn list_players(
    &self,
  ) -> impl Future<Output = Result<Vec<Player>, Self::Error>> + Send + '_;

  // ── Predictions ───────────────────────────────────────────────────────

  /// Store a prediction, replacing any existing one with the same key. The
  /// `timestamp` is set by the store.
  fn save_prediction(
    &self,
    input: NewPrediction,
  ) -> impl Future<Output = Result<Prediction, Self::Error>> + Send + '_;

  fn get_prediction<'a>(
    &'a self,
    key: &'a PredictionKey,
  ) -> impl Future<Output = Result<Option<Prediction>, Self::Error>> + Send + 'a;

  /// List predictions, optionally restricted to one player and/or one round.
  fn list_predictions<'a>(
    &'a self,
    uid: Option<&'a str>,
    round: Option<u32>,
  ) -> impl Future<Output = Result<Vec<Prediction>, Self::Error>> + Send + 'a;

  // ── Results ───────────────────────────────────────────────────────────

  /// Store a race result, replacing any existing one for the same
  /// `(round, session)`.
  fn save_result(
    &self,
    result: RaceResult,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_result(
    &self,
    round: u32,
    session: SessionKind,
  ) -> impl Future<Output = Result<Option<RaceResult>, Self::Error>> + Send + '_;

  /// All stored results, ordered by round then session.
  fn list_results(
    &self,
  ) -> impl Future<Output = Result<Vec<RaceResult>, Self::Error>> + Send + '_;

  // ── Snapshot ──────────────────────────────────────────────────────────

  /// Read players, predictions and results into one [`Snapshot`].
  fn snapshot(&self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;
}
