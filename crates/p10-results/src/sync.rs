//! Copying missing classifications from a [`ResultsSource`] into a store.

use std::collections::HashSet;

use chrono::NaiveDate;
use p10_core::{reference::ReferenceData, result::ResultKey, store::GameStore};

use crate::client::ResultsSource;

/// What one sync pass did, per race session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
  /// Newly stored results.
  pub saved:          Vec<ResultKey>,
  /// Sessions the provider has nothing for yet.
  pub pending:        Vec<ResultKey>,
  /// Sessions whose fetch failed.
  pub failed:         Vec<ResultKey>,
  /// Sessions skipped because a result was already stored.
  pub already_stored: usize,
  /// Races skipped because race day has not arrived.
  pub upcoming:       usize,
}

/// Fetch every missing result up to and including `today`.
///
/// Runs one session at a time in calendar order. A failed fetch is logged
/// and counted as absent; a store error aborts the pass.
pub async fn sync_results<R, S>(
  source: &R,
  store: &S,
  reference: &ReferenceData,
  today: NaiveDate,
) -> Result<SyncReport, S::Error>
where
  R: ResultsSource,
  S: GameStore,
{
  let stored: HashSet<ResultKey> = store
    .list_results()
    .await?
    .iter()
    .map(|r| r.key())
    .collect();

  let mut report = SyncReport::default();

  for race in reference.races() {
    if !race.has_started(today) {
      report.upcoming += 1;
      continue;
    }

    for session in race.sessions() {
      let key = ResultKey::new(race.round, session);
      if stored.contains(&key) {
        report.already_stored += 1;
        continue;
      }

      match source.fetch_result(race.round, session).await {
        Ok(Some(result)) => {
          store.save_result(result).await?;
          report.saved.push(key);
        }
        Ok(None) => {
          tracing::debug!(round = race.round, %session, "no result published yet");
          report.pending.push(key);
        }
        Err(e) => {
          tracing::warn!(round = race.round, %session, error = %e, "result fetch failed");
          report.failed.push(key);
        }
      }
    }
  }

  tracing::info!(
    saved = report.saved.len(),
    pending = report.pending.len(),
    failed = report.failed.len(),
    "results sync finished"
  );
  Ok(report)
}
