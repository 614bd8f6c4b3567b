/*!
 * Catalog queries over a pluggable store.
 *
 * The storage seam is a pair of traits, `CountryStore` and `LanguageStore`.
 * `database::Repository` implements both against SQLite and `MemoryStore`
 * implements both in process. The query functions in `country` and
 * `language` work against either.
 */

pub mod country;
pub mod language;
pub mod memory;

use crate::database::models::{Country, Language, NewCountry, NewLanguage};
use crate::errors::CatalogError;

pub use memory::MemoryStore;

/// Outcome of a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Records written
    pub inserted: usize,
    /// Records whose natural key was already present
    pub skipped: usize,
}

impl ImportReport {
    /// Total records seen
    pub fn total(&self) -> usize {
        self.inserted + self.skipped
    }
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} inserted, {} skipped", self.inserted, self.skipped)
    }
}

/// Language code columns that lookups can match against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeField {
    /// ISO 639-2/T code
    Terminology,
    /// ISO 639-2/B code
    Bibliographic,
    /// ISO 639-1 code
    Alpha2,
}

impl LanguageCodeField {
    /// Column name in the `languages` table
    pub fn column(&self) -> &'static str {
        match self {
            Self::Terminology => "terminology",
            Self::Bibliographic => "bibliographic",
            Self::Alpha2 => "alpha2",
        }
    }

    /// Whether `language` holds `code` in this field
    pub fn matches(&self, language: &Language, code: &str) -> bool {
        match self {
            Self::Terminology => language.terminology == code,
            Self::Bibliographic => language.bibliographic == code,
            Self::Alpha2 => language.alpha2.as_deref() == Some(code),
        }
    }
}

/// Storage capability for countries
pub trait CountryStore {
    /// Validate, derive a unique slug and persist a country
    fn insert_country(&self, country: &NewCountry) -> Result<Country, CatalogError>;

    /// All countries ordered by name (codepoint order)
    fn countries_by_name(&self) -> Result<Vec<Country>, CatalogError>;

    /// Countries whose alpha-3 code equals `alpha3` exactly
    fn countries_with_alpha3(&self, alpha3: &str) -> Result<Vec<Country>, CatalogError>;

    /// Number of stored countries
    fn country_count(&self) -> Result<usize, CatalogError>;

    /// Insert every record whose alpha-3 code is not yet stored
    fn import_countries(&self, countries: &[NewCountry]) -> Result<ImportReport, CatalogError> {
        let mut report = ImportReport::default();
        for country in countries {
            if self.countries_with_alpha3(&country.alpha3)?.is_empty() {
                self.insert_country(country)?;
                report.inserted += 1;
            } else {
                report.skipped += 1;
            }
        }
        Ok(report)
    }
}

/// Storage capability for languages
pub trait LanguageStore {
    /// Validate, derive a slug and persist a language
    fn insert_language(&self, language: &NewLanguage) -> Result<Language, CatalogError>;

    /// Languages ordered by name, optionally only those with an alpha-2 code
    fn languages_by_name(&self, basic_only: bool) -> Result<Vec<Language>, CatalogError>;

    /// Languages whose `field` equals `code` exactly
    fn languages_with_code(
        &self,
        field: LanguageCodeField,
        code: &str,
    ) -> Result<Vec<Language>, CatalogError>;

    /// Number of stored languages
    fn language_count(&self) -> Result<usize, CatalogError>;

    /// Insert every record whose terminology code is not yet stored
    fn import_languages(&self, languages: &[NewLanguage]) -> Result<ImportReport, CatalogError> {
        let mut report = ImportReport::default();
        for language in languages {
            if self
                .languages_with_code(LanguageCodeField::Terminology, &language.terminology)?
                .is_empty()
            {
                self.insert_language(language)?;
                report.inserted += 1;
            } else {
                report.skipped += 1;
            }
        }
        Ok(report)
    }
}
