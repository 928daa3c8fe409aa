//! Calendar rules: when predictions lock, which race is next, and how far a
//! player has got through the season.
//!
//! "Today" is always passed in so these rules stay deterministic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  prediction::SessionKind,
  reference::{Race, ReferenceData},
  snapshot::Snapshot,
};

impl Race {
  /// Whether race day has arrived.
  pub fn has_started(&self, today: NaiveDate) -> bool { self.date <= today }

  /// Predictions lock once race day has arrived and the main result is in.
  pub fn is_locked(&self, today: NaiveDate, has_main_result: bool) -> bool {
    self.has_started(today) && has_main_result
  }

  pub fn ensure_unlocked(&self, today: NaiveDate, has_main_result: bool) -> Result<()> {
    if self.is_locked(today, has_main_result) {
      Err(Error::RaceLocked(self.round))
    } else {
      Ok(())
    }
  }
}

/// The first race dated after `today`, or `None` once the calendar is done.
pub fn next_race(races: &[Race], today: NaiveDate) -> Option<&Race> {
  races.iter().find(|r| r.date > today)
}

/// Whether every race in the calendar has a main result.
pub fn season_complete(reference: &ReferenceData, snapshot: &Snapshot) -> bool {
  reference
    .races()
    .iter()
    .all(|r| snapshot.has_result(r.round, SessionKind::Main))
}

// ─── Per-player status ───────────────────────────────────────────────────────

/// Where a race stands from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceStatus {
  /// The main result is in.
  Done,
  /// Race day has passed but no result has been synced yet.
  Awaiting,
  /// The player has a main-race prediction in.
  Predicted,
  /// Still open for a prediction.
  Open,
}

pub fn race_status(
  race: &Race,
  today: NaiveDate,
  has_result: bool,
  has_prediction: bool,
) -> RaceStatus {
  if has_result {
    RaceStatus::Done
  } else if race.has_started(today) {
    RaceStatus::Awaiting
  } else if has_prediction {
    RaceStatus::Predicted
  } else {
    RaceStatus::Open
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
  pub round:      u32,
  pub name:       String,
  pub location:   String,
  pub date:       NaiveDate,
  pub has_sprint: bool,
  pub status:     RaceStatus,
  pub predicted:  bool,
  pub locked:     bool,
}

/// The full calendar annotated for player `uid`.
pub fn calendar_for(
  reference: &ReferenceData,
  snapshot: &Snapshot,
  uid: &str,
  today: NaiveDate,
) -> Vec<CalendarEntry> {
  reference
    .races()
    .iter()
    .map(|race| {
      let has_result = snapshot.has_result(race.round, SessionKind::Main);
      let predicted = snapshot
        .prediction(uid, race.round, SessionKind::Main)
        .is_some();
      CalendarEntry {
        round: race.round,
        name: race.name.clone(),
        location: race.location.clone(),
        date: race.date,
        has_sprint: race.has_sprint,
        status: race_status(race, today, has_result, predicted),
        predicted,
        locked: race.is_locked(today, has_result),
      }
    })
    .collect()
}
