//! A fully materialised copy of the league's mutable state.
//!
//! Storage backends produce a snapshot; the scoring engine consumes it. A new
//! snapshot is taken whenever players, predictions or results change, and
//! standings are recomputed from scratch against it.

use std::collections::BTreeMap;

use crate::{
  player::Player,
  prediction::{Prediction, PredictionKey, SessionKind},
  result::{RaceResult, ResultKey},
};

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  players:     BTreeMap<String, Player>,
  predictions: BTreeMap<PredictionKey, Prediction>,
  results:     BTreeMap<ResultKey, RaceResult>,
}

impl Snapshot {
  /// Build a snapshot from unordered inputs.
  ///
  /// Duplicate keys are collapsed: for predictions the newest `timestamp`
  /// wins, with equal timestamps settled by the greater `(p10, dnf)`; for
  /// players and results the later item wins.
  pub fn new(
    players: impl IntoIterator<Item = Player>,
    predictions: impl IntoIterator<Item = Prediction>,
    results: impl IntoIterator<Item = RaceResult>,
  ) -> Self {
    let mut snapshot = Self::default();
    for player in players {
      snapshot.insert_player(player);
    }
    for prediction in predictions {
      snapshot.insert_prediction(prediction);
    }
    for result in results {
      snapshot.insert_result(result);
    }
    snapshot
  }

  pub fn insert_player(&mut self, player: Player) {
    self.players.insert(player.uid.clone(), player);
  }

  /// Insert `prediction` unless the entry already held for its key ranks at
  /// least as high by `(timestamp, p10, dnf)`.
  pub fn insert_prediction(&mut self, prediction: Prediction) {
    let key = prediction.key();
    if let Some(existing) = self.predictions.get(&key)
      && rank(existing) >= rank(&prediction)
    {
      return;
    }
    self.predictions.insert(key, prediction);
  }

  pub fn insert_result(&mut self, result: RaceResult) {
    self.results.insert(result.key(), result);
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Players in uid order.
  pub fn players(&self) -> impl Iterator<Item = &Player> { self.players.values() }

  pub fn player(&self, uid: &str) -> Option<&Player> { self.players.get(uid) }

  pub fn predictions(&self) -> impl Iterator<Item = &Prediction> {
    self.predictions.values()
  }

  pub fn prediction(&self, uid: &str, round: u32, session: SessionKind) -> Option<&Prediction> {
    self.predictions.get(&PredictionKey::new(uid, round, session))
  }

  pub fn results(&self) -> impl Iterator<Item = &RaceResult> { self.results.values() }

  pub fn result(&self, round: u32, session: SessionKind) -> Option<&RaceResult> {
    self.results.get(&ResultKey::new(round, session))
  }

  pub fn has_result(&self, round: u32, session: SessionKind) -> bool {
    self.result(round, session).is_some()
  }
}

fn rank(p: &Prediction) -> (i64, &str, Option<&str>) {
  (p.timestamp, p.p10.as_str(), p.dnf.as_deref())
}
