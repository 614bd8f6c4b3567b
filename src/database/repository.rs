/*!
 * Repository layer for database operations.
 *
 * This module implements the catalog store traits against SQLite,
 * abstracting away the SQL details and providing type-safe access.
 */

use log::{debug, warn};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

use super::connection::{DatabaseConnection, DatabaseStats};
use super::models::{
    COUNTRY_NAME_MAX_LEN, Country, LANGUAGE_NAME_MAX_LEN, Language, NewCountry, NewLanguage,
};
use crate::catalog::{CountryStore, ImportReport, LanguageCodeField, LanguageStore};
use crate::errors::CatalogError;
use crate::slug;

const COUNTRY_COLUMNS: &str = "id, alpha2, alpha3, numeric, name, slug, official_name";
const LANGUAGE_COLUMNS: &str = "id, alpha2, bibliographic, terminology, name, slug";

/// A previously recorded seed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRunRecord {
    /// Dataset label ("countries" or "languages")
    pub dataset: String,
    /// Path the file was read from
    pub source_path: String,
    /// SHA-256 of the file contents
    pub source_hash: String,
    /// Rows written by the run
    pub inserted: i64,
    /// Rows skipped by the run
    pub skipped: i64,
    /// Timestamp (RFC 3339)
    pub created_at: String,
}

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self, CatalogError> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, CatalogError> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Row counts and file size
    pub fn stats(&self) -> Result<DatabaseStats, CatalogError> {
        self.db.stats()
    }

    // =========================================================================
    // Country Operations
    // =========================================================================

    fn country_from_row(row: &Row<'_>) -> rusqlite::Result<Country> {
        Ok(Country {
            id: row.get(0)?,
            alpha2: row.get(1)?,
            alpha3: row.get(2)?,
            numeric: row.get(3)?,
            name: row.get(4)?,
            slug: row.get(5)?,
            official_name: row.get(6)?,
        })
    }

    /// Insert a country (synchronous version for use within transactions)
    fn insert_country_sync(conn: &Connection, country: &NewCountry) -> Result<Country, CatalogError> {
        country.validate()?;

        let base = slug::slug_or(&country.name, Country::ENTITY, COUNTRY_NAME_MAX_LEN);
        let slug = slug::unique_slug(&base, COUNTRY_NAME_MAX_LEN, |candidate| {
            Self::country_slug_taken(conn, candidate)
        })?;

        conn.execute(
            r#"
            INSERT INTO countries (alpha2, alpha3, numeric, name, slug, official_name)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                country.alpha2,
                country.alpha3,
                country.numeric,
                country.name,
                slug,
                country.official_name,
            ],
        )
        .map_err(|e| map_country_constraint(e, country))?;

        Ok(Country {
            id: conn.last_insert_rowid(),
            alpha2: country.alpha2.clone(),
            alpha3: country.alpha3.clone(),
            numeric: country.numeric.clone(),
            name: country.name.clone(),
            slug,
            official_name: country.official_name.clone(),
        })
    }

    fn country_slug_taken(conn: &Connection, slug: &str) -> Result<bool, CatalogError> {
        let taken: Option<i64> = conn
            .query_row("SELECT 1 FROM countries WHERE slug = ?1", [slug], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(taken.is_some())
    }

    fn country_exists_sync(conn: &Connection, alpha3: &str) -> Result<bool, CatalogError> {
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM countries WHERE alpha3 = ?1", [alpha3], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    // =========================================================================
    // Language Operations
    // =========================================================================

    fn language_from_row(row: &Row<'_>) -> rusqlite::Result<Language> {
        Ok(Language {
            id: row.get(0)?,
            alpha2: row.get(1)?,
            bibliographic: row.get(2)?,
            terminology: row.get(3)?,
            name: row.get(4)?,
            slug: row.get(5)?,
        })
    }

    /// Insert a language (synchronous version for use within transactions)
    fn insert_language_sync(
        conn: &Connection,
        language: &NewLanguage,
    ) -> Result<Language, CatalogError> {
        language.validate()?;

        let slug = slug::slug_or(&language.name, Language::ENTITY, LANGUAGE_NAME_MAX_LEN);

        conn.execute(
            r#"
            INSERT INTO languages (alpha2, bibliographic, terminology, name, slug)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                language.alpha2,
                language.bibliographic,
                language.terminology,
                language.name,
                slug,
            ],
        )?;

        Ok(Language {
            id: conn.last_insert_rowid(),
            alpha2: language.alpha2.clone(),
            bibliographic: language.bibliographic.clone(),
            terminology: language.terminology.clone(),
            name: language.name.clone(),
            slug,
        })
    }

    fn language_exists_sync(conn: &Connection, terminology: &str) -> Result<bool, CatalogError> {
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM languages WHERE terminology = ?1 LIMIT 1",
                [terminology],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // =========================================================================
    // Seed Run Operations
    // =========================================================================

    /// Record a completed seed import
    pub fn record_seed_run(
        &self,
        dataset: &str,
        source_path: &str,
        source_hash: &str,
        report: &ImportReport,
    ) -> Result<(), CatalogError> {
        let now = chrono::Utc::now().to_rfc3339();

        self.db.execute(|conn| {
            conn.execute(
                r#"
                INSERT INTO seed_runs (dataset, source_path, source_hash, inserted, skipped, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    dataset,
                    source_path,
                    source_hash,
                    report.inserted as i64,
                    report.skipped as i64,
                    now,
                ],
            )?;
            Ok(())
        })
    }

    /// Most recent seed run of `dataset` with the given file hash
    pub fn find_seed_run(
        &self,
        dataset: &str,
        source_hash: &str,
    ) -> Result<Option<SeedRunRecord>, CatalogError> {
        self.db.execute(|conn| {
            let result = conn
                .query_row(
                    r#"
                    SELECT dataset, source_path, source_hash, inserted, skipped, created_at
                    FROM seed_runs
                    WHERE dataset = ?1 AND source_hash = ?2
                    ORDER BY id DESC
                    LIMIT 1
                    "#,
                    params![dataset, source_hash],
                    |row| {
                        Ok(SeedRunRecord {
                            dataset: row.get(0)?,
                            source_path: row.get(1)?,
                            source_hash: row.get(2)?,
                            inserted: row.get(3)?,
                            skipped: row.get(4)?,
                            created_at: row.get(5)?,
                        })
                    },
                )
                .optional()?;

            Ok(result)
        })
    }
}

impl CountryStore for Repository {
    fn insert_country(&self, country: &NewCountry) -> Result<Country, CatalogError> {
        self.db
            .transaction(|tx| Self::insert_country_sync(tx, country))
    }

    fn countries_by_name(&self) -> Result<Vec<Country>, CatalogError> {
        self.db.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM countries ORDER BY name, id",
                COUNTRY_COLUMNS
            ))?;
            let countries = stmt
                .query_map([], Self::country_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(countries)
        })
    }

    fn countries_with_alpha3(&self, alpha3: &str) -> Result<Vec<Country>, CatalogError> {
        self.db.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM countries WHERE alpha3 = ?1",
                COUNTRY_COLUMNS
            ))?;
            let countries = stmt
                .query_map([alpha3], Self::country_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(countries)
        })
    }

    fn country_count(&self) -> Result<usize, CatalogError> {
        self.db.execute(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM countries", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    fn import_countries(&self, countries: &[NewCountry]) -> Result<ImportReport, CatalogError> {
        self.db.transaction(|tx| {
            let mut report = ImportReport::default();
            for country in countries {
                if Self::country_exists_sync(tx, &country.alpha3)? {
                    debug!("Skipping existing country {}", country.alpha3);
                    report.skipped += 1;
                    continue;
                }
                Self::insert_country_sync(tx, country)?;
                report.inserted += 1;
            }
            Ok(report)
        })
    }
}

impl LanguageStore for Repository {
    fn insert_language(&self, language: &NewLanguage) -> Result<Language, CatalogError> {
        self.db
            .transaction(|tx| Self::insert_language_sync(tx, language))
    }

    fn languages_by_name(&self, basic_only: bool) -> Result<Vec<Language>, CatalogError> {
        self.db.execute(|conn| {
            let filter = if basic_only {
                "WHERE alpha2 IS NOT NULL"
            } else {
                ""
            };
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM languages {} ORDER BY name, id",
                LANGUAGE_COLUMNS, filter
            ))?;
            let languages = stmt
                .query_map([], Self::language_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(languages)
        })
    }

    fn languages_with_code(
        &self,
        field: LanguageCodeField,
        code: &str,
    ) -> Result<Vec<Language>, CatalogError> {
        self.db.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM languages WHERE {} = ?1 ORDER BY id",
                LANGUAGE_COLUMNS,
                field.column()
            ))?;
            let languages = stmt
                .query_map([code], Self::language_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(languages)
        })
    }

    fn language_count(&self) -> Result<usize, CatalogError> {
        self.db.execute(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM languages", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    fn import_languages(&self, languages: &[NewLanguage]) -> Result<ImportReport, CatalogError> {
        self.db.transaction(|tx| {
            let mut report = ImportReport::default();
            for language in languages {
                if Self::language_exists_sync(tx, &language.terminology)? {
                    debug!("Skipping existing language {}", language.terminology);
                    report.skipped += 1;
                    continue;
                }
                Self::insert_language_sync(tx, language)?;
                report.inserted += 1;
            }
            Ok(report)
        })
    }
}

/// Turn a UNIQUE violation on `countries` into a `Duplicate` naming the column
fn map_country_constraint(error: rusqlite::Error, country: &NewCountry) -> CatalogError {
    let message = match &error {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(message.clone())
        }
        _ => None,
    };
    let Some(message) = message else {
        return CatalogError::Storage(error);
    };

    // SQLite reports "UNIQUE constraint failed: countries.<column>"
    let Some((_, column)) = message.split_once("countries.") else {
        warn!("Unrecognized constraint failure: {}", message);
        return CatalogError::Storage(error);
    };

    let value = match column {
        "alpha2" => country.alpha2.clone(),
        "alpha3" => country.alpha3.clone(),
        "numeric" => country.numeric.clone(),
        "name" => country.name.clone(),
        _ => String::new(),
    };

    CatalogError::Duplicate {
        entity: Country::ENTITY,
        field: column.to_string(),
        value,
    }
}
