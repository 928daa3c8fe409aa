//! Season standings and per-race score breakdowns.
//!
//! Both are recomputed from a [`Snapshot`] on every call. No state is carried
//! between invocations, so the output depends only on the snapshot contents.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::{
  player::Player,
  points::distance_from_target,
  prediction::SessionKind,
  reference::ReferenceData,
  score::{DNF_BONUS, ScoreResult, score},
  snapshot::Snapshot,
};

// ─── Standings ───────────────────────────────────────────────────────────────

/// One player's season-to-date totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStanding {
  pub uid:           String,
  pub display_name:  String,
  pub total_points:  u32,
  /// Predictions whose driver finished exactly tenth.
  pub correct_p10:   u32,
  /// Predictions that scored no position points although the driver was
  /// classified.
  pub wrong_guesses: u32,
  /// Largest distance from P10 across main-race predictions.
  pub biggest_loss:  u32,
  pub correct_dnfs:  u32,
}

impl PlayerStanding {
  fn empty(player: &Player) -> Self {
    Self {
      uid:           player.uid.clone(),
      display_name:  player.label().to_owned(),
      total_points:  0,
      correct_p10:   0,
      wrong_guesses: 0,
      biggest_loss:  0,
      correct_dnfs:  0,
    }
  }

  fn record(&mut self, score: &ScoreResult, session: SessionKind) {
    self.total_points += score.points;
    if score.dnf_bonus == DNF_BONUS {
      self.correct_dnfs += 1;
    }

    let Some(position) = score.position else {
      return;
    };
    let distance = distance_from_target(position);
    if distance == 0 {
      self.correct_p10 += 1;
    }
    if score.p10_points == 0 {
      self.wrong_guesses += 1;
    }
    if session == SessionKind::Main {
      self.biggest_loss = self.biggest_loss.max(distance);
    }
  }
}

/// Score every player's predictions across the whole calendar.
///
/// Sorted by total points, highest first; equal totals are ordered by uid.
pub fn aggregate(reference: &ReferenceData, snapshot: &Snapshot) -> Vec<PlayerStanding> {
  let mut standings: Vec<PlayerStanding> = snapshot
    .players()
    .map(|player| {
      let mut standing = PlayerStanding::empty(player);
      for race in reference.races() {
        for session in race.sessions() {
          let prediction = snapshot.prediction(&player.uid, race.round, session);
          let result = snapshot.result(race.round, session);
          if prediction.is_none() || result.is_none() {
            continue;
          }
          standing.record(&score(reference, prediction, result, session), session);
        }
      }
      standing
    })
    .collect();

  standings.sort_by(|a, b| {
    Reverse(a.total_points)
      .cmp(&Reverse(b.total_points))
      .then_with(|| a.uid.cmp(&b.uid))
  });
  standings
}

// ─── Race breakdown ──────────────────────────────────────────────────────────

/// How one player fared in one race session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceScoreLine {
  pub uid:          String,
  pub display_name: String,
  /// Timing code of the predicted P10 driver, if a prediction was made.
  pub predicted:    Option<String>,
  /// `None` when the player made no prediction for this session.
  pub score:        Option<ScoreResult>,
}

/// Every player's score for one race session, in uid order.
pub fn race_breakdown(
  reference: &ReferenceData,
  snapshot: &Snapshot,
  round: u32,
  session: SessionKind,
) -> Vec<RaceScoreLine> {
  let result = snapshot.result(round, session);
  snapshot
    .players()
    .map(|player| {
      let prediction = snapshot.prediction(&player.uid, round, session);
      RaceScoreLine {
        uid:          player.uid.clone(),
        display_name: player.label().to_owned(),
        predicted:    prediction.map(|p| {
          reference
            .driver(&p.p10)
            .map_or_else(|| p.p10.clone(), |d| d.code.clone())
        }),
        score:        prediction.map(|p| score(reference, Some(p), result, session)),
      }
    })
    .collect()
}
