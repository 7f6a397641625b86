//! SQL schema for the jokes SQLite store.
//!
//! `PRAGMA user_version` records the schema revision. Future migrations will
//! be gated on that number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids from being reused after a delete.
CREATE TABLE IF NOT EXISTS jokes (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    setup     VARCHAR(512) CHECK (length(setup) <= 512),
    punchline VARCHAR(512) CHECK (length(punchline) <= 512)
);

PRAGMA user_version = 1;
";
