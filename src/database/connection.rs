/*!
 * Database connection management.
 *
 * This module handles SQLite database connection creation and
 * initialization, and serializes access behind a mutex so one
 * connection can be shared by both catalogs.
 */

use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::schema;
use crate::errors::CatalogError;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "isoref.db";

/// Default database directory name under user's data directory
const DEFAULT_DB_DIRNAME: &str = "isoref";

/// Path reported for in-memory databases
const IN_MEMORY_PATH: &str = ":memory:";

/// Database connection wrapper with thread-safe access
#[derive(Clone)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Thread-safe connection wrapped in Arc<Mutex>
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Create a new database connection at the default location
    pub fn new_default() -> Result<Self, CatalogError> {
        let db_path = Self::default_database_path()?;
        Self::new(&db_path)
    }

    /// Create a new database connection at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, CatalogError> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, CatalogError> {
        debug!("Creating in-memory database");

        let conn = Connection::open_in_memory()?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(IN_MEMORY_PATH),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the default database path
    pub fn default_database_path() -> Result<PathBuf, CatalogError> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| {
                CatalogError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine data directory",
                ))
            })?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Execute a database operation with the connection
    ///
    /// This method acquires the mutex lock and executes the provided closure
    /// with access to the connection.
    pub fn execute<F, T>(&self, f: F) -> Result<T, CatalogError>
    where
        F: FnOnce(&Connection) -> Result<T, CatalogError>,
    {
        let conn = self
            .connection
            .lock()
            .map_err(|e| CatalogError::Lock(e.to_string()))?;

        f(&conn)
    }

    /// Begin a transaction and execute operations within it
    ///
    /// The transaction rolls back when `f` returns an error.
    pub fn transaction<F, T>(&self, f: F) -> Result<T, CatalogError>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T, CatalogError>,
    {
        let mut conn = self
            .connection
            .lock()
            .map_err(|e| CatalogError::Lock(e.to_string()))?;

        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;

        Ok(result)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DatabaseStats, CatalogError> {
        self.execute(|conn| {
            let count = |table: &str| -> Result<i64, CatalogError> {
                Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?)
            };

            let country_count = count("countries")?;
            let language_count = count("languages")?;
            let basic_language_count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM languages WHERE alpha2 IS NOT NULL",
                [],
                |row| row.get(0),
            )?;
            let seed_run_count = count("seed_runs")?;

            let file_size = if self.db_path.to_string_lossy() != IN_MEMORY_PATH {
                std::fs::metadata(&self.db_path)
                    .map(|m| m.len())
                    .unwrap_or(0)
            } else {
                0
            };

            Ok(DatabaseStats {
                country_count,
                language_count,
                basic_language_count,
                seed_run_count,
                file_size_bytes: file_size,
            })
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// Number of countries
    pub country_count: i64,
    /// Number of languages
    pub language_count: i64,
    /// Number of languages with an ISO 639-1 code
    pub basic_language_count: i64,
    /// Number of recorded seed imports
    pub seed_run_count: i64,
    /// Database file size in bytes
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Countries: {}, Languages: {} ({} basic), Seed runs: {}, Size: {} KB",
            self.country_count,
            self.language_count,
            self.basic_language_count,
            self.seed_run_count,
            self.file_size_bytes / 1024
        )
    }
}
