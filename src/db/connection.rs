//! SQLite on a dedicated thread.
//!
//! Repositories never hold a `Connection`. They hand [`Database::read`] or
//! [`Database::write`] a closure and await the answer; the worker runs
//! closures one at a time in submission order. `write` closures get a
//! transaction that commits only when the closure returns `Ok`.

use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, bail, Context, Result};
use log::{error, info, warn};
use rusqlite::{Connection, Transaction};
use tokio::sync::oneshot;

use super::{
    migrations::{check_schema, run_migrations},
    seed::seed_if_empty,
};

type Job = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOptions {
    /// Insert the sample game when the file has no games yet.
    pub seed_sample_data: bool,
}

/// What the worker found and did while opening the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Startup {
    pub migrated_from: i32,
    pub schema_version: i32,
    pub seeded: bool,
}

struct Worker {
    jobs: Option<mpsc::Sender<Job>>,
    thread: Option<JoinHandle<()>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the queue lets the worker drain what is left and exit.
        drop(self.jobs.take());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Database worker panicked");
            }
        }
    }
}

/// Handle to the games/thoughts database.
///
/// Clones share one worker, which stops when the last clone is dropped.
#[derive(Clone)]
pub struct Database {
    worker: Arc<Worker>,
    path: Arc<PathBuf>,
    startup: Startup,
}

impl Database {
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::open(path, OpenOptions::default())
    }

    /// Open the file, bring the schema up to date and optionally seed it.
    ///
    /// Returns only once the worker is ready to serve queries.
    pub fn open(path: PathBuf, options: OpenOptions) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (jobs_tx, jobs_rx) = mpsc::channel::<Job>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<Startup>>();
        let worker_path = path.clone();

        let thread = thread::Builder::new()
            .name("thought-tracker-db".into())
            .spawn(move || {
                let mut conn = match prepare(&worker_path, options) {
                    Ok((conn, startup)) => {
                        if ready_tx.send(Ok(startup)).is_err() {
                            return;
                        }
                        conn
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };

                for job in jobs_rx {
                    job(&mut conn);
                }
                info!("Database worker stopped");
            })
            .context("failed to spawn database worker")?;

        let startup = match ready_rx.recv() {
            Ok(Ok(startup)) => startup,
            Ok(Err(err)) => {
                let _ = thread.join();
                return Err(err.context(format!("failed to open {}", path.display())));
            }
            Err(_) => {
                let _ = thread.join();
                bail!("database worker exited during startup");
            }
        };

        if startup.migrated_from != startup.schema_version {
            info!(
                "Migrated {} from schema v{} to v{}",
                path.display(),
                startup.migrated_from,
                startup.schema_version
            );
        }
        info!("Database ready at {}", path.display());

        Ok(Self {
            worker: Arc::new(Worker {
                jobs: Some(jobs_tx),
                thread: Some(thread),
            }),
            path: Arc::new(path),
            startup,
        })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn startup(&self) -> Startup {
        self.startup
    }

    /// Run a query on the worker.
    pub async fn read<F, T>(&self, query: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.submit(move |conn| query(conn)).await
    }

    /// Run a change on the worker inside a transaction. Nothing is kept if
    /// the closure fails.
    pub async fn write<F, T>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.submit(move |conn| {
            let tx = conn.transaction().context("failed to begin transaction")?;
            let value = change(&tx)?;
            tx.commit().context("failed to commit transaction")?;
            Ok(value)
        })
        .await
    }

    async fn submit<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job = Box::new(move |conn| {
            // The caller may have given up waiting; the work is done either way.
            let _ = reply_tx.send(task(conn));
        });

        self.worker
            .jobs
            .as_ref()
            .ok_or_else(|| anyhow!("database worker is shutting down"))?
            .send(job)
            .map_err(|_| anyhow!("database worker is gone"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("database worker dropped the request"))?
    }
}

/// Everything that has to hold before the first query is served.
fn prepare(path: &Path, options: OpenOptions) -> Result<(Connection, Startup)> {
    let mut conn = Connection::open(path).context("failed to open SQLite database")?;

    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        warn!("Staying on the rollback journal, WAL unavailable: {err}");
    }

    // Deleting a game relies on the cascade to drop its thoughts.
    conn.pragma_update(None, "foreign_keys", "ON")
        .context("failed to enable foreign keys")?;
    let enforced: bool = conn
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .context("failed to read foreign_keys pragma")?;
    if !enforced {
        bail!("SQLite refused to enforce foreign keys");
    }

    let migration = run_migrations(&mut conn).context("failed to run database migrations")?;
    check_schema(&conn)?;

    let seeded = if options.seed_sample_data {
        let tx = conn.transaction()?;
        let seeded = seed_if_empty(&tx)?;
        tx.commit()?;
        seeded
    } else {
        false
    };

    Ok((
        conn,
        Startup {
            migrated_from: migration.from,
            schema_version: migration.to,
            seeded,
        },
    ))
}
