//! Race results from the Ergast-compatible provider (Jolpica), and the
//! routine that copies them into a [`GameStore`](p10_core::store::GameStore).

pub mod client;
pub mod ergast;
pub mod error;
pub mod sync;

pub use client::{ResultsClient, ResultsSource};
pub use error::{Error, Result};
pub use sync::{SyncReport, sync_results};
