pub mod game;
pub mod thought;

pub use game::Game;
pub use thought::{format_timestamp, format_timestamp_in, Mood, Thought};
