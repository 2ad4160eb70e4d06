//! Inclusion tests for the thought list and the game sidebar.
//!
//! Everything here is a pure function of its inputs; callers re-run the
//! filters whenever the canonical data or the criteria change.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::db::{Game, Mood, Thought};

/// Case-insensitive substring test. An empty query matches everything.
pub fn matches_text(haystack: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// The set of moods whose checkbox is ticked.
///
/// An empty set is an explicit "show nothing", not a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodFilter(BTreeSet<Mood>);

impl MoodFilter {
    pub fn all() -> Self {
        Self(Mood::ALL.into_iter().collect())
    }

    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, mood: Mood) -> bool {
        self.0.contains(&mood)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flip one checkbox. Returns whether the mood is now included.
    pub fn toggle(&mut self, mood: Mood) -> bool {
        if self.0.remove(&mood) {
            false
        } else {
            self.0.insert(mood);
            true
        }
    }

    pub fn moods(&self) -> impl Iterator<Item = Mood> + '_ {
        self.0.iter().copied()
    }
}

impl Default for MoodFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Mood> for MoodFilter {
    fn from_iter<I: IntoIterator<Item = Mood>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtFilter {
    pub search_text: String,
    pub moods: MoodFilter,
}

impl ThoughtFilter {
    pub fn matches(&self, thought: &Thought) -> bool {
        matches_text(&thought.content, &self.search_text) && self.moods.contains(thought.mood)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFilter {
    pub search_text: String,
}

impl GameFilter {
    pub fn matches(&self, game: &Game) -> bool {
        matches_text(&game.name, &self.search_text)
    }
}

/// Thoughts passing `filter`, in their original order.
pub fn filter_thoughts<'a>(thoughts: &'a [Thought], filter: &ThoughtFilter) -> Vec<&'a Thought> {
    thoughts.iter().filter(|thought| filter.matches(thought)).collect()
}

/// Games passing `filter`, in their original order.
pub fn filter_games<'a>(games: &'a [Game], filter: &GameFilter) -> Vec<&'a Game> {
    games.iter().filter(|game| filter.matches(game)).collect()
}
