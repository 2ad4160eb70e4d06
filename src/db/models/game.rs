use serde::{Deserialize, Serialize};

/// A tracked game. Thoughts hang off it by `game_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub name: String,
}
