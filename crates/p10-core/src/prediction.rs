//! Predictions: one player's guess for one race session.
//!
//! A prediction is identified by `(uid, round, session)`. Writing a prediction
//! for an existing key replaces the previous one; there is no history.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result, reference::ReferenceData};

// ─── Session kind ────────────────────────────────────────────────────────────

/// Which race of a weekend a prediction or result belongs to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionKind {
  Main,
  Sprint,
}

impl SessionKind {
  pub fn is_sprint(self) -> bool { matches!(self, Self::Sprint) }

  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Identity of a prediction. At most one live prediction exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredictionKey {
  pub uid:     String,
  pub round:   u32,
  pub session: SessionKind,
}

impl PredictionKey {
  pub fn new(uid: impl Into<String>, round: u32, session: SessionKind) -> Self {
    Self { uid: uid.into(), round, session }
  }
}

// ─── Prediction ──────────────────────────────────────────────────────────────

/// A stored guess: the driver expected to finish P10 and, optionally, the
/// driver expected to retire first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
  pub uid:       String,
  pub round:     u32,
  #[serde(rename = "type")]
  pub session:   SessionKind,
  /// Driver id predicted to finish tenth.
  pub p10:       String,
  /// Driver id predicted to be the first retirement.
  #[serde(default)]
  pub dnf:       Option<String>,
  /// Milliseconds since the Unix epoch; assigned by the store on write.
  pub timestamp: i64,
}

impl Prediction {
  pub fn key(&self) -> PredictionKey {
    PredictionKey::new(self.uid.clone(), self.round, self.session)
  }
}

/// Input to [`crate::store::GameStore::save_prediction`].
/// `timestamp` is always set by the store; it is not accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrediction {
  pub uid:     String,
  pub round:   u32,
  #[serde(rename = "type")]
  pub session: SessionKind,
  pub p10:     String,
  #[serde(default)]
  pub dnf:     Option<String>,
}

impl NewPrediction {
  pub fn new(
    uid: impl Into<String>,
    round: u32,
    session: SessionKind,
    p10: impl Into<String>,
  ) -> Self {
    Self {
      uid: uid.into(),
      round,
      session,
      p10: p10.into(),
      dnf: None,
    }
  }

  pub fn with_dnf(mut self, dnf: impl Into<String>) -> Self {
    self.dnf = Some(dnf.into());
    self
  }

  /// Attach the write timestamp, producing the stored form.
  pub fn into_prediction(self, timestamp: i64) -> Prediction {
    Prediction {
      uid: self.uid,
      round: self.round,
      session: self.session,
      p10: self.p10,
      dnf: self.dnf,
      timestamp,
    }
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Check that a prediction refers to a real round, session and drivers.
///
/// An empty DNF guess is treated as "no guess" and normalised to `None`.
pub fn validate_prediction(
  reference: &ReferenceData,
  input: NewPrediction,
) -> Result<NewPrediction> {
  let race = reference
    .race(input.round)
    .ok_or(Error::UnknownRound(input.round))?;

  if input.session.is_sprint() && !race.has_sprint {
    return Err(Error::NoSprint(input.round));
  }

  if reference.driver(&input.p10).is_none() {
    return Err(Error::UnknownDriver(input.p10));
  }

  let dnf = input.dnf.filter(|d| !d.is_empty());
  if let Some(dnf) = &dnf
    && reference.driver(dnf).is_none()
  {
    return Err(Error::UnknownDriver(dnf.clone()));
  }

  Ok(NewPrediction { dnf, ..input })
}
