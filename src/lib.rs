//! Log mood-tagged thoughts about games and browse them through filtered,
//! paginated and charted views.
//!
//! - `db`: SQLite storage on a dedicated worker thread
//! - `store`: the async CRUD boundary the views consume
//! - `views`: filtering, pagination, the mood trend, and the controller that
//!   keeps them consistent with the canonical collections
//! - `settings`: persisted page sizes

pub mod db;
pub mod settings;
pub mod store;
mod utils;
pub mod views;

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use log::info;

pub use db::{Database, Game, Mood, OpenOptions, Thought};
pub use settings::{PageSizes, SettingsStore};
pub use store::ThoughtStore;
pub use views::{SelectOutcome, ViewController, ViewSnapshot};

const DATABASE_FILE: &str = "thought-tracker.sqlite3";
const SETTINGS_FILE: &str = "settings.json";

/// Install the global logger. Reads `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

/// Everything a frontend needs, wired together.
pub struct App {
    pub db: Database,
    pub settings: SettingsStore,
    pub views: ViewController<Database>,
}

impl App {
    /// Open (or create) the data directory and load the games list.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        Self::open_inner(data_dir, false).await
    }

    /// Like [`App::open`], but seeds sample data into an empty database first.
    pub async fn open_seeded(data_dir: &Path) -> Result<Self> {
        Self::open_inner(data_dir, true).await
    }

    async fn open_inner(data_dir: &Path, seed: bool) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let db = Database::open(
            data_dir.join(DATABASE_FILE),
            OpenOptions {
                seed_sample_data: seed,
            },
        )?;

        let settings = SettingsStore::new(data_dir.join(SETTINGS_FILE))?;
        let views = ViewController::new(Arc::new(db.clone()), settings.page_sizes());
        views.load_games().await?;

        info!("Thought tracker ready at {}", data_dir.display());

        Ok(Self {
            db,
            settings,
            views,
        })
    }

    /// Persist new page sizes and apply them to the live views.
    pub async fn update_page_sizes(&self, sizes: PageSizes) -> Result<()> {
        self.settings.update_page_sizes(sizes)?;
        self.views.set_page_sizes(sizes).await
    }
}
