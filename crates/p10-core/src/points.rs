//! Points awarded for how close the predicted driver finished to tenth.

use crate::prediction::SessionKind;

/// The position every prediction is aiming for.
pub const TARGET_POSITION: u32 = 10;

/// Main race, indexed by distance from P10.
pub const MAIN_POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Sprint race, indexed by distance from P10.
pub const SPRINT_POINTS: [u32; 9] = [10, 8, 7, 6, 5, 4, 3, 2, 1];

/// `|position - 10|`.
pub fn distance_from_target(position: u32) -> u32 {
  position.abs_diff(TARGET_POSITION)
}

/// Points for a driver finishing at `position` in the given session.
///
/// Total over all inputs: any distance beyond the table scores 0.
pub fn points_for_position(position: u32, session: SessionKind) -> u32 {
  let table: &[u32] = match session {
    SessionKind::Main => &MAIN_POINTS,
    SessionKind::Sprint => &SPRINT_POINTS,
  };
  usize::try_from(distance_from_target(position))
    .ok()
    .and_then(|d| table.get(d))
    .copied()
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exact_p10() {
    assert_eq!(points_for_position(10, SessionKind::Main), 25);
    assert_eq!(points_for_position(10, SessionKind::Sprint), 10);
  }

  #[test]
  fn main_table_by_distance() {
    let expected = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1, 0, 0];
    for (distance, points) in expected.into_iter().enumerate() {
      let position = 10 + distance as u32;
      assert_eq!(
        points_for_position(position, SessionKind::Main),
        points,
        "P{position}"
      );
    }
  }

  #[test]
  fn sprint_table_by_distance() {
    let expected = [10, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0];
    for (distance, points) in expected.into_iter().enumerate() {
      let position = 10 + distance as u32;
      assert_eq!(
        points_for_position(position, SessionKind::Sprint),
        points,
        "P{position}"
      );
    }
  }

  #[test]
  fn symmetric_around_p10() {
    for session in [SessionKind::Main, SessionKind::Sprint] {
      for p in 0..=20 {
        assert_eq!(
          points_for_position(p, session),
          points_for_position(20 - p, session),
          "P{p} {session}"
        );
      }
    }
  }

  #[test]
  fn far_positions_score_nothing() {
    assert_eq!(points_for_position(22, SessionKind::Main), 0);
    assert_eq!(points_for_position(1, SessionKind::Sprint), 0);
    assert_eq!(points_for_position(u32::MAX, SessionKind::Main), 0);
    // Position 0 never occurs in a classification but must not panic.
    assert_eq!(points_for_position(0, SessionKind::Main), 0);
  }

  #[test]
  fn thirteenth_in_main_race_scores_twelve() {
    assert_eq!(points_for_position(13, SessionKind::Main), 12);
  }
}
