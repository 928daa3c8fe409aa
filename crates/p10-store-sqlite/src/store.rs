//! [`SqliteStore`], the SQLite implementation of [`GameStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use p10_core::{
  player::Player,
  prediction::{NewPrediction, Prediction, PredictionKey, SessionKind},
  result::RaceResult,
  snapshot::Snapshot,
  store::GameStore,
};

use crate::{
  Error, Result,
  encode::{RawPlayer, RawPrediction, RawResult, encode_dt, encode_entries, encode_session},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A P10 game store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

fn query_players(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<RawPlayer>> {
  let mut stmt = conn.prepare("SELECT uid, display_name FROM players ORDER BY uid")?;
  stmt
    .query_map([], |row| {
      Ok(RawPlayer {
        uid:          row.get(0)?,
        display_name: row.get(1)?,
      })
    })?
    .collect()
}

fn query_predictions(
  conn: &rusqlite::Connection,
  uid: Option<&str>,
  round: Option<u32>,
) -> rusqlite::Result<Vec<RawPrediction>> {
  let sql = format!(
    "SELECT {} FROM predictions
     WHERE (?1 IS NULL OR uid = ?1)
       AND (?2 IS NULL OR round = ?2)
     ORDER BY uid, round, session",
    RawPrediction::COLUMNS
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt
    .query_map(rusqlite::params![uid, round], RawPrediction::from_row)?
    .collect()
}

fn query_results(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<RawResult>> {
  let sql = format!(
    "SELECT {} FROM results ORDER BY round, session",
    RawResult::COLUMNS
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt.query_map([], RawResult::from_row)?.collect()
}

// ─── GameStore impl ──────────────────────────────────────────────────────────

impl GameStore for SqliteStore {
  type Error = Error;

  // ── Players ───────────────────────────────────────────────────────────────

  async fn upsert_player(&self, player: Player) -> Result<Player> {
    let uid    = player.uid.clone();
    let name   = player.display_name.clone();
    let at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO players (uid, display_name, created_at) VALUES (?1, ?2, ?3)
           ON CONFLICT (uid) DO UPDATE SET display_name = excluded.display_name",
          rusqlite::params![uid, name, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(uid = %player.uid, "player saved");
    Ok(player)
  }

  async fn get_player<'a>(&'a self, uid: &'a str) -> Result<Option<Player>> {
    let uid = uid.to_owned();

    let raw: Option<RawPlayer> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT uid, display_name FROM players WHERE uid = ?1",
            rusqlite::params![uid],
            |row| {
              Ok(RawPlayer {
                uid:          row.get(0)?,
                display_name: row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    Ok(raw.map(RawPlayer::into_player))
  }

  async fn list_players(&self) -> Result<Vec<Player>> {
    let raws = self
      .conn
      .call(|conn| Ok(query_players(conn)?))
      .await?;
    Ok(raws.into_iter().map(RawPlayer::into_player).collect())
  }

  // ── Predictions ───────────────────────────────────────────────────────────

  async fn save_prediction(&self, input: NewPrediction) -> Result<Prediction> {
    let prediction = input.into_prediction(Utc::now().timestamp_millis());

    let uid         = prediction.uid.clone();
    let round       = prediction.round;
    let session_str = encode_session(prediction.session);
    let p10         = prediction.p10.clone();
    let dnf         = prediction.dnf.clone();
    let timestamp   = prediction.timestamp;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO predictions (uid, round, session, p10, dnf, timestamp)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT (uid, round, session) DO UPDATE SET
             p10       = excluded.p10,
             dnf       = excluded.dnf,
             timestamp = excluded.timestamp",
          rusqlite::params![uid, round, session_str, p10, dnf, timestamp],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(
      uid = %prediction.uid,
      round = prediction.round,
      session = %prediction.session,
      "prediction saved"
    );
    Ok(prediction)
  }

  async fn get_prediction<'a>(&'a self, key: &'a PredictionKey) -> Result<Option<Prediction>> {
    let uid         = key.uid.clone();
    let round       = key.round;
    let session_str = encode_session(key.session);

    let raw: Option<RawPrediction> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM predictions WHERE uid = ?1 AND round = ?2 AND session = ?3",
          RawPrediction::COLUMNS
        );
        Ok(conn
          .query_row(
            &sql,
            rusqlite::params![uid, round, session_str],
            RawPrediction::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPrediction::into_prediction).transpose()
  }

  async fn list_predictions<'a>(
    &'a self,
    uid:   Option<&'a str>,
    round: Option<u32>,
  ) -> Result<Vec<Prediction>> {
    let uid = uid.map(str::to_owned);

    let raws = self
      .conn
      .call(move |conn| Ok(query_predictions(conn, uid.as_deref(), round)?))
      .await?;

    raws.into_iter().map(RawPrediction::into_prediction).collect()
  }

  // ── Results ───────────────────────────────────────────────────────────────

  async fn save_result(&self, result: RaceResult) -> Result<()> {
    let round        = result.round;
    let session_str  = encode_session(result.session);
    let entries_json = encode_entries(&result.entries)?;
    let at_str       = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO results (round, session, entries_json, recorded_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (round, session) DO UPDATE SET
             entries_json = excluded.entries_json,
             recorded_at  = excluded.recorded_at",
          rusqlite::params![round, session_str, entries_json, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(
      round = result.round,
      session = %result.session,
      rows = result.entries.len(),
      "race result saved"
    );
    Ok(())
  }

  async fn get_result(&self, round: u32, session: SessionKind) -> Result<Option<RaceResult>> {
    let session_str = encode_session(session);

    let raw: Option<RawResult> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM results WHERE round = ?1 AND session = ?2",
          RawResult::COLUMNS
        );
        Ok(conn
          .query_row(&sql, rusqlite::params![round, session_str], RawResult::from_row)
          .optional()?)
      })
      .await?;

    raw.map(RawResult::into_result).transpose()
  }

  async fn list_results(&self) -> Result<Vec<RaceResult>> {
    let raws = self
      .conn
      .call(|conn| Ok(query_results(conn)?))
      .await?;
    raws.into_iter().map(RawResult::into_result).collect()
  }

  // ── Snapshot ──────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<Snapshot> {
    // One read transaction so the three tables are seen at the same instant.
    let (players, predictions, results) = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let players = query_players(&tx)?;
        let predictions = query_predictions(&tx, None, None)?;
        let results = query_results(&tx)?;
        tx.commit()?;
        Ok((players, predictions, results))
      })
      .await?;

    let predictions = predictions
      .into_iter()
      .map(RawPrediction::into_prediction)
      .collect::<Result<Vec<_>>>()?;
    let results = results
      .into_iter()
      .map(RawResult::into_result)
      .collect::<Result<Vec<_>>>()?;

    Ok(Snapshot::new(
      players.into_iter().map(RawPlayer::into_player),
      predictions,
      results,
    ))
  }
}
