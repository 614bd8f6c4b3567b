/*!
 * Database module for persistent storage of the reference catalogs.
 *
 * This module provides SQLite-based persistence for:
 * - ISO 3166-1 countries
 * - ISO 639-2 languages
 * - Seed import bookkeeping
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use repository::Repository;
