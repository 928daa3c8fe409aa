//! Error types for `p10-core`.
//!
//! Scoring never fails; these errors come from validating reference data,
//! incoming predictions and incoming race results.

use thiserror::Error;

use crate::prediction::SessionKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("driver {driver:?} references unknown team {team:?}")]
  UnknownTeam { driver: String, team: String },

  #[error("duplicate team id: {0:?}")]
  DuplicateTeam(String),

  #[error("duplicate driver id: {0:?}")]
  DuplicateDriver(String),

  #[error("duplicate driver code: {0:?}")]
  DuplicateDriverCode(String),

  #[error("calendar is empty")]
  EmptyCalendar,

  #[error("calendar round {found} out of sequence, expected {expected}")]
  RoundOutOfSequence { expected: u32, found: u32 },

  #[error("invalid race date for round {0}")]
  InvalidDate(u32),

  #[error("unknown driver: {0:?}")]
  UnknownDriver(String),

  #[error("unknown round: {0}")]
  UnknownRound(u32),

  #[error("round {0} has no sprint")]
  NoSprint(u32),

  #[error("predictions for round {0} are locked")]
  RaceLocked(u32),

  #[error("duplicate position {position} in round {round} {session} result")]
  DuplicatePosition {
    round:    u32,
    session:  SessionKind,
    position: u32,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
