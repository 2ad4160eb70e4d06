//! Schema history, keyed by SQLite's `user_version` pragma.
//!
//! `MIGRATIONS[n]` upgrades a file from version `n` to `n + 1`, so the
//! latest version is simply the number of entries.

use anyhow::{anyhow, bail, Context, Result};
use rusqlite::{params, Connection};

const MIGRATIONS: &[&str] = &[include_str!("schemas/schema_v1.sql")];

pub const LATEST_VERSION: i32 = MIGRATIONS.len() as i32;

/// Objects the repositories rely on. The index serves every
/// `list_thoughts` call, which filters by game and orders by time.
const REQUIRED_OBJECTS: [(&str, &str); 3] = [
    ("table", "games"),
    ("table", "thoughts"),
    ("index", "idx_thoughts_game_timestamp"),
];

/// Versions before and after `run_migrations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub from: i32,
    pub to: i32,
}

pub fn run_migrations(conn: &mut Connection) -> Result<Migration> {
    let from: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    let pending = usize::try_from(from)
        .ok()
        .and_then(|applied| MIGRATIONS.get(applied..))
        .ok_or_else(|| {
            anyhow!("database schema v{from} is not supported (latest known is v{LATEST_VERSION})")
        })?;

    if pending.is_empty() {
        return Ok(Migration { from, to: from });
    }

    // All pending steps land together or not at all.
    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;
    for (step, sql) in (from + 1..).zip(pending) {
        tx.execute_batch(sql)
            .with_context(|| format!("failed to migrate schema to v{step}"))?;
    }
    tx.pragma_update(None, "user_version", LATEST_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(Migration {
        from,
        to: LATEST_VERSION,
    })
}

/// Refuse files whose version claims a schema the tables do not match.
pub fn check_schema(conn: &Connection) -> Result<()> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2")
        .context("failed to inspect sqlite_master")?;

    for (kind, name) in REQUIRED_OBJECTS {
        if !stmt.exists(params![kind, name])? {
            bail!("database is missing {kind} `{name}`");
        }
    }
    Ok(())
}
