//! Core types and scoring rules for the P10 prediction game.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! scoring engine is a set of pure functions over an in-memory
//! [`snapshot::Snapshot`]; storage backends implement [`store::GameStore`].

pub mod awards;
pub mod calendar;
pub mod error;
pub mod player;
pub mod points;
pub mod prediction;
pub mod reference;
pub mod result;
pub mod score;
pub mod season_2026;
pub mod snapshot;
pub mod standings;
pub mod store;

pub use error::{Error, Result};
