//! Filtered, paginated and charted projections of the canonical collections.

pub mod controller;
pub mod filter;
pub mod pagination;
pub mod state;
pub mod trend;

pub use controller::{SelectOutcome, ViewController};
pub use filter::{GameFilter, MoodFilter, ThoughtFilter};
pub use pagination::{page_numbers, paginate, Page, PageCursor, PageMarker};
pub use state::{ListState, Selection, ViewSnapshot, ViewState};
pub use trend::{mood_trend, TrendPoint};
