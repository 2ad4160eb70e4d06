use anyhow::{anyhow, Result};
use rusqlite::{params, Row};

use crate::db::{connection::Database, models::Game};

fn row_to_game(row: &Row) -> Result<Game> {
    Ok(Game {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

impl Database {
    /// All games in insertion order.
    pub async fn list_games(&self) -> Result<Vec<Game>> {
        self.read(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM games ORDER BY id ASC")?;

            let mut rows = stmt.query([])?;
            let mut games = Vec::new();
            while let Some(row) = rows.next()? {
                games.push(row_to_game(row)?);
            }

            Ok(games)
        })
        .await
    }

    pub async fn create_game(&self, name: String) -> Result<Game> {
        self.write(move |tx| {
            tx.execute("INSERT INTO games (name) VALUES (?1)", params![name])?;
            let game_id = tx.last_insert_rowid();

            let mut stmt = tx.prepare("SELECT id, name FROM games WHERE id = ?1")?;
            let mut rows = stmt.query(params![game_id])?;
            let game = match rows.next()? {
                Some(row) => row_to_game(row)?,
                None => return Err(anyhow!("Game not found after insert")),
            };

            Ok(game)
        })
        .await
    }

    pub async fn update_game(&self, game_id: i64, name: String) -> Result<Game> {
        self.write(move |tx| {
            let rows_affected = tx.execute(
                "UPDATE games SET name = ?1 WHERE id = ?2",
                params![name, game_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("Game {game_id} not found"));
            }

            let mut stmt = tx.prepare("SELECT id, name FROM games WHERE id = ?1")?;
            let mut rows = stmt.query(params![game_id])?;
            let game = match rows.next()? {
                Some(row) => row_to_game(row)?,
                None => return Err(anyhow!("Game not found after update")),
            };

            Ok(game)
        })
        .await
    }

    /// Delete a game together with all of its thoughts.
    ///
    /// The thoughts go through the `ON DELETE CASCADE` foreign key, which
    /// `Database::open` refuses to run without.
    pub async fn delete_game(&self, game_id: i64) -> Result<()> {
        self.write(move |tx| {
            tx.execute("DELETE FROM games WHERE id = ?1", params![game_id])?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{models::Mood, Database};

    fn open() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = Database::new(dir.path().join("tracker.sqlite3")).expect("database");
        (dir, db)
    }

    #[tokio::test]
    async fn create_rename_and_list() {
        let (_dir, db) = open();

        let first = db.create_game("Hollow Knight".into()).await.expect("create");
        let second = db.create_game("Celeste".into()).await.expect("create");
        assert!(second.id > first.id);

        let renamed = db
            .update_game(first.id, "Hollow Knight: Silksong".into())
            .await
            .expect("rename");
        assert_eq!(renamed.id, first.id);
        assert_eq!(renamed.name, "Hollow Knight: Silksong");

        let games = db.list_games().await.expect("list");
        assert_eq!(games, vec![renamed, second]);
    }

    #[tokio::test]
    async fn renaming_a_missing_game_fails() {
        let (_dir, db) = open();
        assert!(db.update_game(42, "Nope".into()).await.is_err());
    }

    #[tokio::test]
    async fn deleting_a_game_removes_its_thoughts() {
        let (_dir, db) = open();

        let doomed = db.create_game("Doomed".into()).await.expect("create");
        let kept = db.create_game("Kept".into()).await.expect("create");
        db.create_thought(doomed.id, "gone soon".into(), Mood::Negative)
            .await
            .expect("thought");
        db.create_thought(kept.id, "stays".into(), Mood::Positive)
            .await
            .expect("thought");

        db.delete_game(doomed.id).await.expect("delete");

        let games = db.list_games().await.expect("list");
        assert_eq!(games, vec![kept.clone()]);
        assert!(db.list_thoughts(doomed.id).await.expect("thoughts").is_empty());
        assert_eq!(db.list_thoughts(kept.id).await.expect("thoughts").len(), 1);
    }
}
