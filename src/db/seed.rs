use anyhow::Result;
use log::info;
use rusqlite::{params, Connection};

use super::{connection::Database, helpers::format_datetime, models::Mood};

const SAMPLE_GAME: &str = "Assassin's Creed III";

const SAMPLE_THOUGHTS: [(&str, Mood); 2] = [
    ("I love this game!", Mood::Positive),
    ("The tailing missions drag on forever.", Mood::Negative),
];

/// Insert one game and a couple of thoughts, unless games already exist.
///
/// Callers run this inside a transaction.
pub(super) fn seed_if_empty(conn: &Connection) -> Result<bool> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(false);
    }

    conn.execute("INSERT INTO games (name) VALUES (?1)", params![SAMPLE_GAME])?;
    let game_id = conn.last_insert_rowid();

    let now = chrono::Utc::now();
    for (offset, &(content, mood)) in SAMPLE_THOUGHTS.iter().enumerate() {
        let timestamp = now + chrono::Duration::seconds(offset as i64);
        conn.execute(
            "INSERT INTO thoughts (game_id, content, timestamp, mood)
             VALUES (?1, ?2, ?3, ?4)",
            params![game_id, content, format_datetime(timestamp), mood.as_str()],
        )?;
    }

    info!("Seeded sample data");
    Ok(true)
}

impl Database {
    /// Populate an empty database with one game and a couple of thoughts.
    ///
    /// Returns `false` without touching anything when games already exist.
    pub async fn seed_sample_data(&self) -> Result<bool> {
        self.write(|tx| seed_if_empty(tx)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{models::Mood, Database};

    #[tokio::test]
    async fn seeds_once_with_legal_moods() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = Database::new(dir.path().join("tracker.sqlite3")).expect("database");

        assert!(db.seed_sample_data().await.expect("seed"));
        assert!(!db.seed_sample_data().await.expect("seed again"));

        let games = db.list_games().await.expect("games");
        assert_eq!(games.len(), 1);

        let thoughts = db.list_thoughts(games[0].id).await.expect("thoughts");
        assert_eq!(thoughts.len(), 2);
        assert_eq!(thoughts[0].mood, Mood::Positive);
        assert_eq!(thoughts[1].mood, Mood::Negative);
    }
}
