//! Encoding and decoding helpers between domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, except prediction timestamps which are
//! integer milliseconds. Classification rows are stored as compact JSON.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use p10_core::{
  player::Player,
  prediction::{Prediction, SessionKind},
  result::{ClassificationEntry, RaceResult},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── SessionKind ─────────────────────────────────────────────────────────────

pub fn encode_session(s: SessionKind) -> &'static str { s.as_str() }

pub fn decode_session(s: &str) -> Result<SessionKind> {
  SessionKind::from_str(s).map_err(|_| Error::Decode(format!("unknown session: {s:?}")))
}

// ─── Round ───────────────────────────────────────────────────────────────────

pub fn decode_round(round: i64) -> Result<u32> {
  u32::try_from(round).map_err(|_| Error::Decode(format!("round out of range: {round}")))
}

// ─── Classification ──────────────────────────────────────────────────────────

pub fn encode_entries(entries: &[ClassificationEntry]) -> Result<String> {
  Ok(serde_json::to_string(entries)?)
}

pub fn decode_entries(s: &str) -> Result<Vec<ClassificationEntry>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `players` row.
pub struct RawPlayer {
  pub uid:          String,
  pub display_name: String,
}

impl RawPlayer {
  pub fn into_player(self) -> Player {
    Player {
      uid:          self.uid,
      display_name: self.display_name,
    }
  }
}

/// Raw values read directly from a `predictions` row.
pub struct RawPrediction {
  pub uid:       String,
  pub round:     i64,
  pub session:   String,
  pub p10:       String,
  pub dnf:       Option<String>,
  pub timestamp: i64,
}

impl RawPrediction {
  pub const COLUMNS: &'static str = "uid, round, session, p10, dnf, timestamp";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      uid:       row.get(0)?,
      round:     row.get(1)?,
      session:   row.get(2)?,
      p10:       row.get(3)?,
      dnf:       row.get(4)?,
      timestamp: row.get(5)?,
    })
  }

  pub fn into_prediction(self) -> Result<Prediction> {
    Ok(Prediction {
      uid:       self.uid,
      round:     decode_round(self.round)?,
      session:   decode_session(&self.session)?,
      p10:       self.p10,
      dnf:       self.dnf,
      timestamp: self.timestamp,
    })
  }
}

/// Raw values read directly from a `results` row.
pub struct RawResult {
  pub round:        i64,
  pub session:      String,
  pub entries_json: String,
}

impl RawResult {
  pub const COLUMNS: &'static str = "round, session, entries_json";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      round:        row.get(0)?,
      session:      row.get(1)?,
      entries_json: row.get(2)?,
    })
  }

  /// Decode the row. Stored results were validated on the way in, so the
  /// position check is not repeated here.
  pub fn into_result(self) -> Result<RaceResult> {
    Ok(RaceResult {
      round:   decode_round(self.round)?,
      session: decode_session(&self.session)?,
      entries: decode_entries(&self.entries_json)?,
    })
  }
}
