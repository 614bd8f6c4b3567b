/*!
 * # isoref - ISO reference catalogs
 *
 * A Rust library holding ISO 3166-1 countries and ISO 639-2 languages as
 * reference data, with natural-key lookups and alphabetical listings.
 *
 * ## Features
 *
 * - Country catalog keyed by ISO 3166-1 alpha-3 code
 * - Language catalog keyed by ISO 639-2/T code, with the ISO 639-1 "basic" subset
 * - Deterministic URL slugs derived from display names
 * - SQLite persistence or an in-memory store behind the same traits
 * - Import from the Debian iso-codes JSON files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `catalog`: Store traits and the catalog query functions:
 *   - `catalog::country`: Country queries
 *   - `catalog::language`: Language queries
 *   - `catalog::memory`: In-memory store
 * - `database`: SQLite connection, schema, models and repository
 * - `seed`: iso-codes JSON import
 * - `slug`: Slug derivation
 * - `language_utils`: ISO language code utilities
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod catalog;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod seed;
pub mod slug;

// Re-export main types for easier usage
pub use app_config::Config;
pub use catalog::{CountryStore, ImportReport, LanguageStore, MemoryStore};
pub use database::models::{Country, Language, NewCountry, NewLanguage, simple_name};
pub use database::Repository;
pub use errors::{CatalogError, SeedError};
pub use slug::slugify;
