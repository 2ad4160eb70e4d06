use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_datetime, parse_mood},
    models::{Mood, Thought},
};

fn row_to_thought(row: &Row) -> Result<Thought> {
    let timestamp: String = row.get("timestamp")?;
    let mood: String = row.get("mood")?;

    Ok(Thought {
        id: row.get("id")?,
        game_id: row.get("game_id")?,
        content: row.get("content")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
        mood: parse_mood(&mood)?,
    })
}

fn fetch_thought(conn: &Connection, thought_id: i64) -> Result<Option<Thought>> {
    let mut stmt = conn.prepare(
        "SELECT id, game_id, content, timestamp, mood
         FROM thoughts
         WHERE id = ?1",
    )?;
    let mut rows = stmt.query(params![thought_id])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_thought(row)?)),
        None => Ok(None),
    }
}

impl Database {
    /// Thoughts for one game, oldest first.
    pub async fn list_thoughts(&self, game_id: i64) -> Result<Vec<Thought>> {
        self.read(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, game_id, content, timestamp, mood
                 FROM thoughts
                 WHERE game_id = ?1
                 ORDER BY timestamp ASC, id ASC",
            )?;

            let mut rows = stmt.query(params![game_id])?;
            let mut thoughts = Vec::new();
            while let Some(row) = rows.next()? {
                thoughts.push(row_to_thought(row)?);
            }

            Ok(thoughts)
        })
        .await
    }

    /// Insert a thought stamped with the current time.
    pub async fn create_thought(&self, game_id: i64, content: String, mood: Mood) -> Result<Thought> {
        self.write(move |tx| {
            let now = Utc::now();

            tx.execute(
                "INSERT INTO thoughts (game_id, content, timestamp, mood)
                 VALUES (?1, ?2, ?3, ?4)",
                params![game_id, content, format_datetime(now), mood.as_str()],
            )?;

            let thought_id = tx.last_insert_rowid();
            fetch_thought(tx, thought_id)?
                .ok_or_else(|| anyhow!("Thought not found after insert"))
        })
        .await
    }

    /// Replace content and mood. The timestamp is left untouched.
    pub async fn update_thought(&self, thought_id: i64, content: String, mood: Mood) -> Result<Thought> {
        self.write(move |tx| {
            let rows_affected = tx.execute(
                "UPDATE thoughts
                 SET content = ?1,
                     mood = ?2
                 WHERE id = ?3",
                params![content, mood.as_str(), thought_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("Thought {thought_id} not found"));
            }

            fetch_thought(tx, thought_id)?
                .ok_or_else(|| anyhow!("Thought not found after update"))
        })
        .await
    }

    pub async fn delete_thought(&self, thought_id: i64) -> Result<()> {
        self.write(move |tx| {
            tx.execute("DELETE FROM thoughts WHERE id = ?1", params![thought_id])?;
            Ok(())
        })
        .await
    }

    pub async fn delete_all_thoughts(&self, game_id: i64) -> Result<()> {
        self.write(move |tx| {
            tx.execute("DELETE FROM thoughts WHERE game_id = ?1", params![game_id])?;
            Ok(())
        })
        .await
    }
}
