//! The asynchronous CRUD boundary the view engine talks to.
//!
//! The view layer never touches SQLite directly; it only sees this trait.
//! `Database` is the production implementation. Every call may fail, and a
//! failure must leave the caller's in-memory state exactly as it was.

use anyhow::Result;
use async_trait::async_trait;

use crate::db::{Database, Game, Mood, Thought};

#[async_trait]
pub trait ThoughtStore: Send + Sync {
    /// Games in storage order.
    async fn list_games(&self) -> Result<Vec<Game>>;

    /// Thoughts for one game, ascending by timestamp.
    async fn list_thoughts(&self, game_id: i64) -> Result<Vec<Thought>>;

    async fn create_game(&self, name: String) -> Result<Game>;

    async fn update_game(&self, game_id: i64, name: String) -> Result<Game>;

    /// Deletes the game and, with it, every thought that references it.
    async fn delete_game(&self, game_id: i64) -> Result<()>;

    /// The store assigns both the id and the timestamp.
    async fn create_thought(&self, game_id: i64, content: String, mood: Mood) -> Result<Thought>;

    async fn update_thought(&self, thought_id: i64, content: String, mood: Mood) -> Result<Thought>;

    async fn delete_thought(&self, thought_id: i64) -> Result<()>;

    async fn delete_all_thoughts(&self, game_id: i64) -> Result<()>;
}

#[async_trait]
impl ThoughtStore for Database {
    async fn list_games(&self) -> Result<Vec<Game>> {
        Database::list_games(self).await
    }

    async fn list_thoughts(&self, game_id: i64) -> Result<Vec<Thought>> {
        Database::list_thoughts(self, game_id).await
    }

    async fn create_game(&self, name: String) -> Result<Game> {
        Database::create_game(self, name).await
    }

    async fn update_game(&self, game_id: i64, name: String) -> Result<Game> {
        Database::update_game(self, game_id, name).await
    }

    async fn delete_game(&self, game_id: i64) -> Result<()> {
        Database::delete_game(self, game_id).await
    }

    async fn create_thought(&self, game_id: i64, content: String, mood: Mood) -> Result<Thought> {
        Database::create_thought(self, game_id, content, mood).await
    }

    async fn update_thought(&self, thought_id: i64, content: String, mood: Mood) -> Result<Thought> {
        Database::update_thought(self, thought_id, content, mood).await
    }

    async fn delete_thought(&self, thought_id: i64) -> Result<()> {
        Database::delete_thought(self, thought_id).await
    }

    async fn delete_all_thoughts(&self, game_id: i64) -> Result<()> {
        Database::delete_all_thoughts(self, game_id).await
    }
}
