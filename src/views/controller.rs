use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::sync::Mutex;

use crate::{
    db::{Game, Mood, Thought},
    log_debug, log_info, log_warn,
    settings::PageSizes,
    store::ThoughtStore,
};

use super::{
    filter::MoodFilter,
    state::{ViewSnapshot, ViewState},
};

const ENABLE_LOGS: bool = true;

/// What happened to a thought fetch by the time it resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The fetched thoughts are now the visible collection.
    Applied,
    /// Another selection was made while the fetch was in flight; the result
    /// was dropped.
    Superseded,
}

/// Owns the canonical collections and applies confirmed store results.
///
/// The state lock is only held around synchronous mutations, never across a
/// store call, so a slow fetch cannot block the UI from selecting another
/// game. Canonical state changes only after the store confirms.
pub struct ViewController<S> {
    state: Arc<Mutex<ViewState>>,
    store: Arc<S>,
}

impl<S> Clone for ViewController<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ThoughtStore> ViewController<S> {
    pub fn new(store: Arc<S>, page_sizes: PageSizes) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::new(page_sizes))),
            store,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn load_games(&self) -> Result<()> {
        let games = self
            .store
            .list_games()
            .await
            .context("failed to load games")?;
        self.state.lock().await.set_games(games);
        Ok(())
    }

    /// Select a game and load its thoughts.
    ///
    /// The previous game's thoughts disappear immediately. If the user picks
    /// yet another game before this fetch resolves, the result (or error) is
    /// discarded and `Superseded` is returned.
    pub async fn select_game(&self, game_id: i64) -> Result<SelectOutcome> {
        let ticket = {
            let mut state = self.state.lock().await;
            if !state.games().iter().any(|game| game.id == game_id) {
                return Err(anyhow!("game {game_id} is not loaded"));
            }
            state.begin_selection(game_id)
        };

        let fetched = self.store.list_thoughts(game_id).await;

        let mut state = self.state.lock().await;
        match fetched {
            Ok(thoughts) => {
                if state.finish_selection(ticket, thoughts) {
                    Ok(SelectOutcome::Applied)
                } else {
                    log_debug!("Dropping stale thoughts for game {game_id}");
                    Ok(SelectOutcome::Superseded)
                }
            }
            Err(err) => {
                if state.fail_selection(ticket) {
                    log_warn!("Loading thoughts for game {game_id} failed: {err:#}");
                    Err(err.context(format!("failed to load thoughts for game {game_id}")))
                } else {
                    log_debug!("Ignoring failed fetch for superseded game {game_id}");
                    Ok(SelectOutcome::Superseded)
                }
            }
        }
    }

    pub async fn clear_selection(&self) {
        self.state.lock().await.clear_selection();
    }

    /// Returns `None` without calling the store when `name` is blank.
    pub async fn create_game(&self, name: &str) -> Result<Option<Game>> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        let game = self
            .store
            .create_game(name.to_string())
            .await
            .map_err(|err| self.reject("create game", err))?;

        self.state.lock().await.add_game(game.clone());
        Ok(Some(game))
    }

    /// Returns `None` without calling the store when `name` is blank.
    pub async fn rename_game(&self, game_id: i64, name: &str) -> Result<Option<Game>> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        let game = self
            .store
            .update_game(game_id, name.to_string())
            .await
            .map_err(|err| self.reject("rename game", err))?;

        self.state.lock().await.replace_game(game.clone());
        Ok(Some(game))
    }

    pub async fn delete_game(&self, game_id: i64) -> Result<()> {
        self.store
            .delete_game(game_id)
            .await
            .map_err(|err| self.reject("delete game", err))?;

        if self.state.lock().await.remove_game(game_id) {
            log_info!("Deleted selected game {game_id}; selection cleared");
        }
        Ok(())
    }

    /// Add a thought to the selected game.
    ///
    /// Returns `None` without calling the store when `content` is blank or
    /// no game is selected. If the selection moves on before the store
    /// answers, the thought is saved but not shown under the new game.
    pub async fn create_thought(&self, content: &str, mood: Mood) -> Result<Option<Thought>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let Some(game_id) = self.state.lock().await.selected_game_id() else {
            return Ok(None);
        };

        let thought = self
            .store
            .create_thought(game_id, content.to_string(), mood)
            .await
            .map_err(|err| self.reject("create thought", err))?;

        self.state.lock().await.prepend_thought(thought.clone());
        Ok(Some(thought))
    }

    /// Returns `None` without calling the store when `content` is blank.
    pub async fn update_thought(
        &self,
        thought_id: i64,
        content: &str,
        mood: Mood,
    ) -> Result<Option<Thought>> {
        if content.trim().is_empty() {
            return Ok(None);
        }

        let thought = self
            .store
            .update_thought(thought_id, content.to_string(), mood)
            .await
            .map_err(|err| self.reject("update thought", err))?;

        self.state.lock().await.replace_thought(thought.clone());
        Ok(Some(thought))
    }

    pub async fn delete_thought(&self, thought_id: i64) -> Result<()> {
        self.store
            .delete_thought(thought_id)
            .await
            .map_err(|err| self.reject("delete thought", err))?;

        self.state.lock().await.remove_thought(thought_id);
        Ok(())
    }

    /// Delete every thought of the selected game. Returns false when nothing
    /// is selected.
    pub async fn delete_all_thoughts(&self) -> Result<bool> {
        let Some(game_id) = self.state.lock().await.selected_game_id() else {
            return Ok(false);
        };

        self.store
            .delete_all_thoughts(game_id)
            .await
            .map_err(|err| self.reject("delete all thoughts", err))?;

        self.state.lock().await.clear_thoughts_for(game_id);
        Ok(true)
    }

    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.state.lock().await.set_search_text(text.into());
    }

    pub async fn set_mood_filter(&self, moods: MoodFilter) {
        self.state.lock().await.set_mood_filter(moods);
    }

    /// Flip one mood checkbox. Returns whether the mood is now shown.
    pub async fn toggle_mood(&self, mood: Mood) -> bool {
        self.state.lock().await.toggle_mood(mood)
    }

    pub async fn set_game_search_text(&self, text: impl Into<String>) {
        self.state.lock().await.set_game_search_text(text.into());
    }

    /// Move the thought list to `page`, clamped. Returns the page landed on.
    pub async fn go_to_page(&self, page: usize) -> usize {
        self.state.lock().await.go_to_page(page)
    }

    /// Move the game list to `page`, clamped. Returns the page landed on.
    pub async fn go_to_games_page(&self, page: usize) -> usize {
        self.state.lock().await.go_to_games_page(page)
    }

    pub async fn set_page_sizes(&self, page_sizes: PageSizes) -> Result<()> {
        page_sizes.validate()?;
        self.state.lock().await.set_page_sizes(page_sizes);
        Ok(())
    }

    fn reject(&self, action: &str, err: anyhow::Error) -> anyhow::Error {
        log_warn!("Store rejected {action}: {err:#}");
        err.context(format!("failed to {action}"))
    }
}
