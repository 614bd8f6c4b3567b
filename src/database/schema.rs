/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for the catalog tables
 * and handles schema migrations for version upgrades.
 */

use log::{debug, info};
use rusqlite::Connection;

use crate::errors::CatalogError;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<(), CatalogError> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating database schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32, CatalogError> {
    let table_exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), CatalogError> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<(), CatalogError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // ISO 3166-1 countries; every code and the name are unique
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            alpha2 TEXT NOT NULL UNIQUE,
            alpha3 TEXT NOT NULL UNIQUE,
            numeric TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL UNIQUE,
            slug TEXT NOT NULL UNIQUE,
            official_name TEXT
        );
        "#,
    )?;

    // ISO 639-2 languages; terminology is the lookup key but is not
    // constrained unique
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS languages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            alpha2 TEXT,
            bibliographic TEXT NOT NULL,
            terminology TEXT NOT NULL,
            name TEXT NOT NULL,
            slug TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_languages_terminology ON languages(terminology);
        CREATE INDEX IF NOT EXISTS idx_languages_name ON languages(name);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS seed_runs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            dataset TEXT NOT NULL,
            source_path TEXT NOT NULL,
            source_hash TEXT NOT NULL,
            inserted INTEGER NOT NULL,
            skipped INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_seed_runs_hash ON seed_runs(dataset, source_hash);
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}

/// Migrate the schema from one version to another
fn migrate_schema(conn: &Connection, from_version: i32) -> Result<(), CatalogError> {
    let current = from_version;

    if current < SCHEMA_VERSION {
        // No released schema predates v1, so there is nothing to replay.
        create_all_tables(conn)?;
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    info!("Schema migration completed to v{}", SCHEMA_VERSION);
    Ok(())
}
