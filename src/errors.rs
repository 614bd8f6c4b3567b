/*!
 * Error types for the isoref catalogs.
 *
 * Library code returns these thiserror enums; the binary wraps them
 * with anyhow context at its boundary.
 */

use thiserror::Error;

/// Errors raised by catalog queries and writes
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Natural-key lookup matched nothing
    #[error("{entity} matching '{key}' does not exist")]
    NotFound {
        /// Entity label (e.g. "country")
        entity: &'static str,
        /// The key that was looked up
        key: String,
    },

    /// Natural-key lookup matched more than one record
    #[error("{count} {entity} records match '{key}'")]
    MultipleFound {
        /// Entity label
        entity: &'static str,
        /// The key that was looked up
        key: String,
        /// Number of matching records
        count: usize,
    },

    /// A unique field already holds this value
    #[error("{entity} with {field} '{value}' already exists")]
    Duplicate {
        /// Entity label
        entity: &'static str,
        /// Column that collided
        field: String,
        /// Offending value
        value: String,
    },

    /// A field broke its length or character rules
    #[error("invalid {entity} {field}: {reason}")]
    Validation {
        /// Entity label
        entity: &'static str,
        /// Field name
        field: &'static str,
        /// Human-readable rule description
        reason: String,
    },

    /// Underlying SQLite failure
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The connection mutex was poisoned
    #[error("Failed to acquire database lock: {0}")]
    Lock(String),

    /// Filesystem failure while opening the database
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// True for the lookup-miss case
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

/// Errors that can occur while importing seed files
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed file could not be read
    #[error("Failed to read seed file {path}: {source}")]
    Read {
        /// Path of the seed file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not valid iso-codes JSON
    #[error("Failed to parse seed file {path}: {source}")]
    Parse {
        /// Path of the seed file
        path: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A record was rejected by the catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
