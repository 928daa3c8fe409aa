//! Official race classifications and driver resolution against them.
//!
//! A [`RaceResult`] is written once per `(round, session)` when the results
//! provider confirms a race is complete. Re-syncing writes the same content
//! under the same key.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, prediction::SessionKind, reference::ReferenceData};

/// Status string of a classified finisher on the lead lap.
pub const FINISHED: &str = "Finished";

// ─── Classification ──────────────────────────────────────────────────────────

/// One row of an official classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationEntry {
  /// Final position, 1-based.
  pub position:  u32,
  /// The results provider's driver id. Usually, but not always, the same as
  /// the reference-data id.
  pub driver_id: String,
  pub code:      String,
  pub name:      String,
  /// `"Finished"`, a lapped status such as `"+1 Lap"`, or a retirement reason.
  pub status:    String,
}

/// How a classified driver's race ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishStatus<'a> {
  Finished,
  /// Classified but lapped (`"+1 Lap"`, `"+3 Laps"`).
  Lapped,
  /// Any other status: the driver did not finish.
  Retired(&'a str),
  /// No status recorded.
  Unknown,
}

impl ClassificationEntry {
  pub fn finish_status(&self) -> FinishStatus<'_> {
    match self.status.as_str() {
      "" => FinishStatus::Unknown,
      FINISHED => FinishStatus::Finished,
      s if s.starts_with('+') => FinishStatus::Lapped,
      s => FinishStatus::Retired(s),
    }
  }

  pub fn is_dnf(&self) -> bool {
    matches!(self.finish_status(), FinishStatus::Retired(_))
  }
}

// ─── RaceResult ──────────────────────────────────────────────────────────────

/// Storage key of a [`RaceResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultKey {
  pub round:   u32,
  pub session: SessionKind,
}

impl ResultKey {
  pub fn new(round: u32, session: SessionKind) -> Self { Self { round, session } }
}

/// The classification of one race session, in the provider's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
  pub round:   u32,
  #[serde(rename = "type")]
  pub session: SessionKind,
  #[serde(rename = "results")]
  pub entries: Vec<ClassificationEntry>,
}

impl RaceResult {
  /// Build a result, rejecting duplicate positions. Gaps are allowed since
  /// providers sometimes omit rows.
  pub fn new(
    round: u32,
    session: SessionKind,
    entries: Vec<ClassificationEntry>,
  ) -> Result<Self> {
    let mut seen = HashSet::new();
    for entry in &entries {
      if !seen.insert(entry.position) {
        return Err(Error::DuplicatePosition {
          round,
          session,
          position: entry.position,
        });
      }
    }
    Ok(Self { round, session, entries })
  }

  pub fn key(&self) -> ResultKey { ResultKey::new(self.round, self.session) }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  // ── Driver resolution ─────────────────────────────────────────────────

  /// First stage: exact match on the provider's driver id.
  pub fn find_by_driver_id(&self, driver_id: &str) -> Option<&ClassificationEntry> {
    self.entries.iter().find(|e| e.driver_id == driver_id)
  }

  /// Second stage: match on the three-letter driver code.
  pub fn find_by_code(&self, code: &str) -> Option<&ClassificationEntry> {
    self.entries.iter().find(|e| e.code == code)
  }

  /// Locate a reference-data driver in this classification: by id, and if
  /// that misses, by the driver's code.
  pub fn resolve(
    &self,
    reference: &ReferenceData,
    driver_id: &str,
  ) -> Option<&ClassificationEntry> {
    self.find_by_driver_id(driver_id).or_else(|| {
      let code = &reference.driver(driver_id)?.code;
      self.find_by_code(code)
    })
  }

  // ── Retirements ───────────────────────────────────────────────────────

  /// Every row whose driver did not finish, in classification order.
  pub fn retirements(&self) -> impl Iterator<Item = &ClassificationEntry> {
    self.entries.iter().filter(|e| e.is_dnf())
  }

  /// The race's first retirement.
  ///
  /// Retirees are classified behind finishers in reverse order of retirement,
  /// so the last retired row in the classification is the earliest one out.
  pub fn first_retirement(&self) -> Option<&ClassificationEntry> {
    self.retirements().last()
  }
}

/// Whether `entry` is the reference driver `driver_id`, matching by id and
/// falling back to code.
pub fn entry_matches(
  reference: &ReferenceData,
  entry: &ClassificationEntry,
  driver_id: &str,
) -> bool {
  entry.driver_id == driver_id
    || reference
      .driver(driver_id)
      .is_some_and(|d| d.code == entry.code)
}


#[cfg(test)]
mod tests {
  use super::{fixtures::*, *};
  use crate::season_2026;

  #[test]
  fn finish_status_classification() {
    assert_eq!(entry(1, "a", "A", "Finished").finish_status(), FinishStatus::Finished);
    assert_eq!(entry(1, "a", "A", "+2 Laps").finish_status(), FinishStatus::Lapped);
    assert_eq!(
      entry(1, "a", "A", "Hydraulics").finish_status(),
      FinishStatus::Retired("Hydraulics")
    );
    assert_eq!(entry(1, "a", "A", "").finish_status(), FinishStatus::Unknown);
    assert!(!entry(1, "a", "A", "").is_dnf());
  }

  #[test]
  fn rejects_duplicate_positions() {
    let err = RaceResult::new(
      3,
      SessionKind::Main,
      vec![entry(1, "a", "A", "Finished"), entry(1, "b", "B", "Finished")],
    )
    .unwrap_err();
    assert!(matches!(err, Error::DuplicatePosition { position: 1, .. }));
  }

  #[test]
  fn allows_gaps() {
    let r = RaceResult::new(
      3,
      SessionKind::Main,
      vec![entry(1, "a", "A", "Finished"), entry(4, "b", "B", "Finished")],
    );
    assert!(r.is_ok());
  }

  #[test]
  fn resolution_stages_are_independent() {
    let result = sample(SessionKind::Main);
    assert!(result.find_by_driver_id("verstappen").is_none());
    assert_eq!(result.find_by_code("VER").unwrap().position, 10);
    assert_eq!(result.find_by_driver_id("norris").unwrap().position, 9);
  }

  #[test]
  fn resolve_falls_back_to_code() {
    let reference = season_2026::reference_data().unwrap();
    let result = sample(SessionKind::Main);
    assert_eq!(result.resolve(&reference, "verstappen").unwrap().position, 10);
    assert_eq!(result.resolve(&reference, "norris").unwrap().position, 9);
    assert!(result.resolve(&reference, "hamilton").is_none());
    assert!(result.resolve(&reference, "nobody").is_none());
  }

  #[test]
  fn first_retirement_is_last_dnf_row() {
    let result = sample(SessionKind::Main);
    let dnfs: Vec<_> = result.retirements().map(|e| e.driver_id.as_str()).collect();
    assert_eq!(dnfs, ["gasly", "stroll"]);
    assert_eq!(result.first_retirement().unwrap().driver_id, "stroll");
  }

  #[test]
  fn no_retirements() {
    let result = RaceResult::new(
      1,
      SessionKind::Main,
      vec![entry(1, "a", "A", "Finished"), entry(2, "b", "B", "+1 Lap")],
    )
    .unwrap();
    assert!(result.first_retirement().is_none());
  }

  #[test]
  fn wire_shape() {
    let json = serde_json::to_value(sample(SessionKind::Sprint)).unwrap();
    assert_eq!(json["type"], "sprint");
    assert_eq!(json["results"][1]["driverId"], "max_verstappen");
  }
}
