//! SQL schema for the P10 SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS players (
    uid          TEXT PRIMARY KEY,
    display_name TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL          -- RFC 3339 UTC
);

-- One live prediction per (uid, round, session); writes replace the row.
-- uid is not a foreign key into players.
CREATE TABLE IF NOT EXISTS predictions (
    uid        TEXT    NOT NULL,
    round      INTEGER NOT NULL,
    session    TEXT    NOT NULL,        -- 'main' | 'sprint'
    p10        TEXT    NOT NULL,        -- driver id
    dnf        TEXT,                    -- driver id or NULL
    timestamp  INTEGER NOT NULL,        -- ms since Unix epoch
    PRIMARY KEY (uid, round, session)
);

-- One classification per (round, session); re-syncs overwrite it.
CREATE TABLE IF NOT EXISTS results (
    round        INTEGER NOT NULL,
    session      TEXT    NOT NULL,
    entries_json TEXT    NOT NULL,      -- JSON array of classification rows
    recorded_at  TEXT    NOT NULL,
    PRIMARY KEY (round, session)
);

CREATE INDEX IF NOT EXISTS predictions_round_idx ON predictions(round);

PRAGMA user_version = 1;
";
