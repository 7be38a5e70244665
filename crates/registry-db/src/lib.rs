pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub use models::{EncryptedSubmission, SubmissionRow};

/// File name of the SQLite database inside the data directory.
pub const DB_FILE_NAME: &str = "submissions.db";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Append-only store of encrypted submissions.
///
/// Holds only the database path. Each operation opens its own connection and
/// drops it before returning, on success and error alike; concurrent writers
/// are serialized by SQLite itself.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
    path: PathBuf,
}

impl SubmissionStore {
    /// Create the data directory if needed and make sure the schema exists.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("creating data directory {}", data_dir.display()))?;

        let store = Self {
            path: data_dir.join(DB_FILE_NAME),
        };
        store.ensure_schema()?;

        info!("Submission store opened at {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_schema(&self) -> Result<()> {
        self.with_conn(migrations::run)
    }

    pub(crate) fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = Connection::open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        f(&conn)
    }
}
