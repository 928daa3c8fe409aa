//! Reference data: teams, drivers and the race calendar for one season.
//!
//! [`ReferenceData`] is built once at startup, validated, and then shared
//! read-only by everything that scores or aggregates. It is never mutated.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, prediction::SessionKind};

// ─── Entities ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
  pub id:    String,
  pub name:  String,
  /// CSS hex colour, e.g. `#FF8000`.
  pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
  pub id:     String,
  pub name:   String,
  /// Three-letter timing code, e.g. `VER`.
  pub code:   String,
  pub number: u32,
  /// Id of the driver's [`Team`].
  pub team:   String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
  /// 1-based position in the calendar; the join key for predictions and
  /// results.
  pub round:      u32,
  pub name:       String,
  pub location:   String,
  pub date:       NaiveDate,
  pub has_sprint: bool,
}

impl Race {
  /// The sessions predicted and scored at this race: the main race, then the
  /// sprint if there is one.
  pub fn sessions(&self) -> impl Iterator<Item = SessionKind> {
    let sprint = self.has_sprint.then_some(SessionKind::Sprint);
    std::iter::once(SessionKind::Main).chain(sprint)
  }
}

// ─── File shape ──────────────────────────────────────────────────────────────

/// On-disk JSON shape for a season: `{"teams": [...], "drivers": [...],
/// "races": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceFile {
  pub teams:   Vec<Team>,
  pub drivers: Vec<Driver>,
  pub races:   Vec<Race>,
}

// ─── ReferenceData ───────────────────────────────────────────────────────────

/// Validated, indexed reference data for one season.
#[derive(Debug, Clone)]
pub struct ReferenceData {
  teams:          Vec<Team>,
  drivers:        Vec<Driver>,
  races:          Vec<Race>,
  driver_by_id:   HashMap<String, usize>,
}

impl ReferenceData {
  /// Validate and index a season.
  ///
  /// Fails if ids or driver codes repeat, if a driver's team is missing, or if
  /// the rounds are not exactly `1..=n`. Races are stored in round order.
  pub fn new(teams: Vec<Team>, drivers: Vec<Driver>, mut races: Vec<Race>) -> Result<Self> {
    let mut team_ids = HashSet::new();
    for team in &teams {
      if !team_ids.insert(team.id.as_str()) {
        return Err(Error::DuplicateTeam(team.id.clone()));
      }
    }

    let mut driver_by_id = HashMap::new();
    let mut driver_codes = HashSet::new();
    for (idx, driver) in drivers.iter().enumerate() {
      if !team_ids.contains(driver.team.as_str()) {
        return Err(Error::UnknownTeam {
          driver: driver.id.clone(),
          team:   driver.team.clone(),
        });
      }
      if driver_by_id.insert(driver.id.clone(), idx).is_some() {
        return Err(Error::DuplicateDriver(driver.id.clone()));
      }
      if !driver_codes.insert(driver.code.as_str()) {
        return Err(Error::DuplicateDriverCode(driver.code.clone()));
      }
    }

    if races.is_empty() {
      return Err(Error::EmptyCalendar);
    }
    races.sort_by_key(|r| r.round);
    for (expected, race) in (1..).zip(&races) {
      if race.round != expected {
        return Err(Error::RoundOutOfSequence {
          expected,
          found: race.round,
        });
      }
    }

    Ok(Self {
      teams,
      drivers,
      races,
      driver_by_id,
    })
  }

  /// Parse and validate a season from its JSON file form.
  pub fn from_json(raw: &str) -> Result<Self> {
    let file: ReferenceFile = serde_json::from_str(raw)?;
    Self::from_file(file)
  }

  pub fn from_file(file: ReferenceFile) -> Result<Self> {
    Self::new(file.teams, file.drivers, file.races)
  }

  /// The JSON file form, as accepted by [`ReferenceData::from_json`].
  pub fn to_file(&self) -> ReferenceFile {
    ReferenceFile {
      teams:   self.teams.clone(),
      drivers: self.drivers.clone(),
      races:   self.races.clone(),
    }
  }

  // ── Accessors ─────────────────────────────────────────────────────────

  pub fn teams(&self) -> &[Team] { &self.teams }

  pub fn drivers(&self) -> &[Driver] { &self.drivers }

  /// All races in calendar order.
  pub fn races(&self) -> &[Race] { &self.races }

  pub fn team(&self, id: &str) -> Option<&Team> {
    self.teams.iter().find(|t| t.id == id)
  }

  pub fn driver(&self, id: &str) -> Option<&Driver> {
    self.driver_by_id.get(id).map(|&idx| &self.drivers[idx])
  }

  pub fn race(&self, round: u32) -> Option<&Race> {
    // Rounds are dense from 1, so the round is the index plus one.
    let idx = usize::try_from(round.checked_sub(1)?).ok()?;
    self.races.get(idx)
  }
}
