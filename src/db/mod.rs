pub mod connection;
pub mod helpers;
mod migrations;
pub mod models;
mod repositories;
mod seed;

pub use connection::{Database, OpenOptions, Startup};
pub use models::{Game, Mood, Thought};
