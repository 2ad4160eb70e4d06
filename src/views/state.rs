//! Interaction state and the canonical collections behind the dashboard.
//!
//! `ViewState` is plain synchronous data. Every mutator leaves the page
//! cursors in range, and every derived view is recomputed from scratch by
//! `snapshot()`; nothing derived is cached.

use serde::Serialize;

use crate::{
    db::{Game, Mood, Thought},
    settings::PageSizes,
};

use super::{
    filter::{filter_games, filter_thoughts, GameFilter, MoodFilter, ThoughtFilter},
    pagination::{page_numbers, paginate, total_pages, Page, PageCursor, PageMarker},
    trend::{mood_trend, TrendPoint},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "gameId")]
pub enum Selection {
    #[default]
    None,
    Game(i64),
}

impl Selection {
    pub fn game_id(&self) -> Option<i64> {
        match self {
            Selection::None => None,
            Selection::Game(id) => Some(*id),
        }
    }
}

/// Identifies one thought fetch. Only the most recent ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub game_id: i64,
    generation: u64,
}

/// Why a list has nothing to show, if it has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListState {
    /// The canonical collection itself is empty.
    NoData,
    /// There is data, but the current filter hides all of it.
    NoMatches,
    Populated,
}

impl ListState {
    fn classify(canonical: usize, filtered: usize) -> Self {
        match (canonical, filtered) {
            (0, _) => ListState::NoData,
            (_, 0) => ListState::NoMatches,
            _ => ListState::Populated,
        }
    }
}

/// Read-only picture of everything the dashboard renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub selection: Selection,
    pub selected_game: Option<Game>,
    pub loading: bool,
    pub game_filter: GameFilter,
    pub games: Page<Game>,
    pub games_state: ListState,
    pub game_page_numbers: Vec<PageMarker>,
    pub thought_filter: ThoughtFilter,
    pub thoughts: Page<Thought>,
    pub thoughts_state: ListState,
    pub thought_page_numbers: Vec<PageMarker>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    games: Vec<Game>,
    thoughts: Vec<Thought>,
    selection: Selection,
    generation: u64,
    pending: Option<u64>,
    game_filter: GameFilter,
    thought_filter: ThoughtFilter,
    games_cursor: PageCursor,
    thoughts_cursor: PageCursor,
    page_sizes: PageSizes,
}

impl ViewState {
    pub fn new(page_sizes: PageSizes) -> Self {
        Self {
            games: Vec::new(),
            thoughts: Vec::new(),
            selection: Selection::None,
            generation: 0,
            pending: None,
            game_filter: GameFilter::default(),
            thought_filter: ThoughtFilter::default(),
            games_cursor: PageCursor::new(),
            thoughts_cursor: PageCursor::new(),
            page_sizes,
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Thoughts for the selection, in display order.
    pub fn thoughts(&self) -> &[Thought] {
        &self.thoughts
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_game_id(&self) -> Option<i64> {
        self.selection.game_id()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn thought_filter(&self) -> &ThoughtFilter {
        &self.thought_filter
    }

    pub fn game_filter(&self) -> &GameFilter {
        &self.game_filter
    }

    pub fn current_page(&self) -> usize {
        self.thoughts_cursor.current()
    }

    pub fn games_current_page(&self) -> usize {
        self.games_cursor.current()
    }

    pub fn page_sizes(&self) -> PageSizes {
        self.page_sizes
    }

    // ---- games ----

    pub fn set_games(&mut self, games: Vec<Game>) {
        self.games = games;
        if let Some(game_id) = self.selected_game_id() {
            if !self.games.iter().any(|game| game.id == game_id) {
                self.clear_selection();
            }
        }
        self.refresh();
    }

    pub fn add_game(&mut self, game: Game) {
        self.games.push(game);
        self.refresh();
    }

    /// Swap in the stored version of a renamed game. Returns false if unknown.
    pub fn replace_game(&mut self, game: Game) -> bool {
        let replaced = match self.games.iter_mut().find(|existing| existing.id == game.id) {
            Some(existing) => {
                *existing = game;
                true
            }
            None => false,
        };
        self.refresh();
        replaced
    }

    /// Drop a deleted game. Returns true when it was the selected one, in
    /// which case the selection and all thought-side state are reset.
    pub fn remove_game(&mut self, game_id: i64) -> bool {
        self.games.retain(|game| game.id != game_id);
        let was_selected = self.selected_game_id() == Some(game_id);
        if was_selected {
            self.clear_selection();
        }
        self.refresh();
        was_selected
    }

    // ---- selection ----

    /// Switch to `game_id` and invalidate every fetch issued before.
    ///
    /// The previous game's thoughts are dropped immediately so they can
    /// never be shown under the new selection.
    pub fn begin_selection(&mut self, game_id: i64) -> FetchTicket {
        self.generation += 1;
        self.selection = Selection::Game(game_id);
        self.thoughts.clear();
        self.thoughts_cursor.reset();
        self.pending = Some(self.generation);

        FetchTicket {
            game_id,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.generation == ticket.generation && self.selection == Selection::Game(ticket.game_id)
    }

    /// Install fetched thoughts. Returns false, changing nothing, for a
    /// superseded ticket.
    ///
    /// Thoughts created while the fetch was in flight stay on top unless the
    /// fetch already read them.
    pub fn finish_selection(&mut self, ticket: FetchTicket, thoughts: Vec<Thought>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let fetched: Vec<Thought> = thoughts
            .into_iter()
            .filter(|thought| thought.game_id == ticket.game_id)
            .collect();
        let mut thoughts: Vec<Thought> = std::mem::take(&mut self.thoughts)
            .into_iter()
            .filter(|created| !fetched.iter().any(|thought| thought.id == created.id))
            .collect();
        thoughts.extend(fetched);
        self.thoughts = thoughts;
        self.pending = None;
        self.refresh();
        true
    }

    /// Mark a failed fetch as finished. Returns false for a superseded ticket.
    pub fn fail_selection(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Forget the selection, its thoughts and the thought filters.
    pub fn clear_selection(&mut self) {
        self.generation += 1;
        self.selection = Selection::None;
        self.pending = None;
        self.thoughts.clear();
        self.thought_filter = ThoughtFilter::default();
        self.thoughts_cursor.reset();
    }

    // ---- thoughts ----

    fn owns(&self, thought: &Thought) -> bool {
        self.selected_game_id() == Some(thought.game_id)
    }

    /// Put a newly created thought at the top of the list.
    ///
    /// Ignored when the thought belongs to a game that is no longer selected.
    /// A thought a later fetch already brought in is replaced where it sits.
    pub fn prepend_thought(&mut self, thought: Thought) -> bool {
        if !self.owns(&thought) {
            return false;
        }
        match self.thoughts.iter_mut().find(|existing| existing.id == thought.id) {
            Some(existing) => *existing = thought,
            None => self.thoughts.insert(0, thought),
        }
        self.refresh();
        true
    }

    pub fn replace_thought(&mut self, thought: Thought) -> bool {
        if !self.owns(&thought) {
            return false;
        }
        let replaced = match self.thoughts.iter_mut().find(|existing| existing.id == thought.id) {
            Some(existing) => {
                *existing = thought;
                true
            }
            None => false,
        };
        self.refresh();
        replaced
    }

    pub fn remove_thought(&mut self, thought_id: i64) -> bool {
        let before = self.thoughts.len();
        self.thoughts.retain(|thought| thought.id != thought_id);
        self.refresh();
        self.thoughts.len() != before
    }

    /// Empty the list after a bulk delete, if `game_id` is still selected.
    pub fn clear_thoughts_for(&mut self, game_id: i64) -> bool {
        if self.selected_game_id() != Some(game_id) {
            return false;
        }
        self.thoughts.clear();
        self.refresh();
        true
    }

    // ---- filters and paging ----

    pub fn set_search_text(&mut self, text: String) {
        self.thought_filter.search_text = text;
        self.thoughts_cursor.reset();
        self.refresh();
    }

    pub fn set_mood_filter(&mut self, moods: MoodFilter) {
        self.thought_filter.moods = moods;
        self.thoughts_cursor.reset();
        self.refresh();
    }

    pub fn toggle_mood(&mut self, mood: Mood) -> bool {
        let included = self.thought_filter.moods.toggle(mood);
        self.thoughts_cursor.reset();
        self.refresh();
        included
    }

    pub fn set_game_search_text(&mut self, text: String) {
        self.game_filter.search_text = text;
        self.games_cursor.reset();
        self.refresh();
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        let total = self.thought_total_pages();
        self.thoughts_cursor.go_to(page, total)
    }

    pub fn go_to_games_page(&mut self, page: usize) -> usize {
        let total = self.game_total_pages();
        self.games_cursor.go_to(page, total)
    }

    pub fn set_page_sizes(&mut self, page_sizes: PageSizes) {
        self.page_sizes = page_sizes;
        self.refresh();
    }

    fn thought_total_pages(&self) -> usize {
        let matching = filter_thoughts(&self.thoughts, &self.thought_filter).len();
        total_pages(matching, self.page_sizes.thoughts)
    }

    fn game_total_pages(&self) -> usize {
        let matching = filter_games(&self.games, &self.game_filter).len();
        total_pages(matching, self.page_sizes.games)
    }

    /// Re-clamp both cursors against freshly filtered collections.
    fn refresh(&mut self) {
        let thought_pages = self.thought_total_pages();
        self.thoughts_cursor.clamp_to(thought_pages);
        let game_pages = self.game_total_pages();
        self.games_cursor.clamp_to(game_pages);
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let filtered_games: Vec<Game> = filter_games(&self.games, &self.game_filter)
            .into_iter()
            .cloned()
            .collect();
        let games = paginate(
            &filtered_games,
            self.page_sizes.games,
            self.games_cursor.current(),
        );

        let filtered_thoughts = filter_thoughts(&self.thoughts, &self.thought_filter);
        let trend = mood_trend(filtered_thoughts.iter().copied());
        let filtered_thoughts: Vec<Thought> = filtered_thoughts.into_iter().cloned().collect();
        let thoughts = paginate(
            &filtered_thoughts,
            self.page_sizes.thoughts,
            self.thoughts_cursor.current(),
        );

        let selected_game = self
            .selected_game_id()
            .and_then(|id| self.games.iter().find(|game| game.id == id).cloned());

        ViewSnapshot {
            selection: self.selection,
            selected_game,
            loading: self.is_loading(),
            game_filter: self.game_filter.clone(),
            games_state: ListState::classify(self.games.len(), filtered_games.len()),
            game_page_numbers: page_numbers(games.current_page, games.total_pages),
            games,
            thought_filter: self.thought_filter.clone(),
            thoughts_state: ListState::classify(self.thoughts.len(), filtered_thoughts.len()),
            thought_page_numbers: page_numbers(thoughts.current_page, thoughts.total_pages),
            thoughts,
            trend,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(PageSizes::default())
    }
}
