//! Scoring a single prediction against a single race classification.

use serde::{Deserialize, Serialize};

use crate::{
  points::points_for_position,
  prediction::{Prediction, SessionKind},
  reference::ReferenceData,
  result::{RaceResult, entry_matches},
};

/// Bonus for correctly naming the first retirement.
pub const DNF_BONUS: u32 = 1;

/// Points earned by one prediction in one race session. Derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
  /// `p10_points + dnf_bonus`.
  pub points:     u32,
  pub p10_points: u32,
  /// `0` or [`DNF_BONUS`].
  pub dnf_bonus:  u32,
  /// Where the predicted driver actually finished, if they could be found.
  pub position:   Option<u32>,
}

/// Score `prediction` against `result`.
///
/// Missing inputs are not errors: an absent prediction or an absent/empty
/// result scores zero with no position.
pub fn score(
  reference: &ReferenceData,
  prediction: Option<&Prediction>,
  result: Option<&RaceResult>,
  session: SessionKind,
) -> ScoreResult {
  let (Some(prediction), Some(result)) = (prediction, result) else {
    return ScoreResult::default();
  };
  if result.is_empty() {
    return ScoreResult::default();
  }

  let position = result
    .resolve(reference, &prediction.p10)
    .map(|entry| entry.position);
  let p10_points = position
    .map(|p| points_for_position(p, session))
    .unwrap_or(0);

  let dnf_bonus = match (&prediction.dnf, result.first_retirement()) {
    (Some(guess), Some(first_out)) if entry_matches(reference, first_out, guess) => {
      DNF_BONUS
    }
    _ => 0,
  };

  ScoreResult {
    points: p10_points + dnf_bonus,
    p10_points,
    dnf_bonus,
    position,
  }
}
