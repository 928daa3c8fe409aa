//! The slice of the Ergast response format that carries a classification.
//!
//! ```json
//! { "MRData": { "RaceTable": { "Races": [ { "Results": [
//!   { "position": "10", "status": "Finished",
//!     "Driver": { "driverId": "albon", "code": "ALB",
//!                 "givenName": "Alexander", "familyName": "Albon" } }
//! ] } ] } } }
//! ```
//!
//! Sprint responses carry `SprintResults` in place of `Results`.

use p10_core::{
  prediction::SessionKind,
  result::{ClassificationEntry, RaceResult},
};
use serde::Deserialize;

use crate::Result;

// ─── Response shape ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Response {
  #[serde(rename = "MRData")]
  pub mr_data: MrData,
}

#[derive(Debug, Default, Deserialize)]
pub struct MrData {
  #[serde(rename = "RaceTable", default)]
  pub race_table: RaceTable,
}

#[derive(Debug, Default, Deserialize)]
pub struct RaceTable {
  #[serde(rename = "Races", default)]
  pub races: Vec<RaceRow>,
}

#[derive(Debug, Deserialize)]
pub struct RaceRow {
  #[serde(rename = "Results", default)]
  pub results:        Vec<ResultRow>,
  #[serde(rename = "SprintResults", default)]
  pub sprint_results: Vec<ResultRow>,
}

#[derive(Debug, Deserialize)]
pub struct ResultRow {
  pub position: String,
  #[serde(rename = "Driver")]
  pub driver:   DriverRow,
  #[serde(default)]
  pub status:   String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRow {
  pub driver_id:   String,
  #[serde(default)]
  pub code:        String,
  #[serde(default)]
  pub given_name:  String,
  #[serde(default)]
  pub family_name: String,
}

impl Response {
  /// Classification rows of the first race in the table for `session`.
  pub fn rows(&self, session: SessionKind) -> &[ResultRow] {
    let Some(race) = self.mr_data.race_table.races.first() else {
      return &[];
    };
    match session {
      SessionKind::Main => &race.results,
      SessionKind::Sprint => &race.sprint_results,
    }
  }
}

// ─── Adaptation ──────────────────────────────────────────────────────────────

impl ResultRow {
  /// `None` when the position is not a number.
  pub fn to_entry(&self) -> Option<ClassificationEntry> {
    let position = self.position.trim().parse().ok()?;
    Some(ClassificationEntry {
      position,
      driver_id: self.driver.driver_id.clone(),
      code: self.driver.code.clone(),
      name: format!("{} {}", self.driver.given_name, self.driver.family_name)
        .trim()
        .to_owned(),
      status: self.status.clone(),
    })
  }
}

pub fn adapt(rows: &[ResultRow]) -> Vec<ClassificationEntry> {
  rows.iter().filter_map(ResultRow::to_entry).collect()
}

/// Parse a provider body into a result for `(round, session)`.
///
/// Returns `Ok(None)` when the provider has no usable rows yet.
pub fn parse_result(body: &str, round: u32, session: SessionKind) -> Result<Option<RaceResult>> {
  let response: Response = serde_json::from_str(body)?;
  let entries = adapt(response.rows(session));
  if entries.is_empty() {
    return Ok(None);
  }
  Ok(Some(RaceResult::new(round, session, entries)?))
}
