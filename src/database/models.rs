/*!
 * Catalog entity models.
 *
 * These structures map directly to the `countries` and `languages` tables.
 * `NewCountry` / `NewLanguage` carry the caller-supplied fields; the store
 * assigns the surrogate id and derives the slug on insert.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CatalogError;

/// Maximum length of a country name, official name and slug
pub const COUNTRY_NAME_MAX_LEN: usize = 75;

/// Maximum length of a language name and slug
pub const LANGUAGE_NAME_MAX_LEN: usize = 100;

/// Minimum length of an ISO 639-2 code column
pub const LANGUAGE_CODE_MIN_LEN: usize = 3;

/// Maximum length of an ISO 639-2 code column
pub const LANGUAGE_CODE_MAX_LEN: usize = 7;

/// Characters that end the primary part of a language name
const NAME_ANNOTATION_DELIMITERS: [char; 3] = [';', ',', '('];

/// A country covered by the ISO 3166-1 standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Surrogate key assigned by the store
    pub id: i64,
    /// ISO 3166-1 alpha-2 code
    pub alpha2: String,
    /// ISO 3166-1 alpha-3 code (natural key)
    pub alpha3: String,
    /// ISO 3166-1 numeric code, kept as a zero-padded string
    pub numeric: String,
    /// Short display name
    pub name: String,
    /// URL-safe identifier derived from `name`
    pub slug: String,
    /// Long-form name, if the standard defines one
    pub official_name: Option<String>,
}

impl Country {
    /// Entity label used in messages
    pub const ENTITY: &'static str = "country";
    /// Singular display label
    pub const VERBOSE_NAME: &'static str = "ISO 3166 country";
    /// Plural display label
    pub const VERBOSE_NAME_PLURAL: &'static str = "ISO 3166 countries";

    /// Business key used for lookups and fixtures
    pub fn natural_key(&self) -> &str {
        &self.alpha3
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Fields required to create a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCountry {
    pub alpha2: String,
    pub alpha3: String,
    pub numeric: String,
    pub name: String,
    #[serde(default)]
    pub official_name: Option<String>,
}

impl NewCountry {
    /// Create a country without an official name
    pub fn new(alpha2: &str, alpha3: &str, numeric: &str, name: &str) -> Self {
        Self {
            alpha2: alpha2.to_string(),
            alpha3: alpha3.to_string(),
            numeric: numeric.to_string(),
            name: name.to_string(),
            official_name: None,
        }
    }

    /// Set the official name
    pub fn with_official_name(mut self, official_name: &str) -> Self {
        self.official_name = Some(official_name.to_string());
        self
    }

    /// Check field lengths and characters before a write
    pub fn validate(&self) -> Result<(), CatalogError> {
        exact_len(Country::ENTITY, "alpha2", &self.alpha2, 2)?;
        exact_len(Country::ENTITY, "alpha3", &self.alpha3, 3)?;
        exact_len(Country::ENTITY, "numeric", &self.numeric, 3)?;
        if !self.numeric.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(Country::ENTITY, "numeric", "must contain only digits"));
        }
        bounded_len(Country::ENTITY, "name", &self.name, 1, COUNTRY_NAME_MAX_LEN)?;
        if let Some(official_name) = &self.official_name {
            bounded_len(
                Country::ENTITY,
                "official_name",
                official_name,
                0,
                COUNTRY_NAME_MAX_LEN,
            )?;
        }
        Ok(())
    }
}

/// A language covered by the ISO 639-2 standard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Surrogate key assigned by the store
    pub id: i64,
    /// ISO 639-1 code, present only for languages that standard covers
    pub alpha2: Option<String>,
    /// ISO 639-2/B code
    pub bibliographic: String,
    /// ISO 639-2/T code (natural key)
    pub terminology: String,
    /// Reference name, possibly with variants and date ranges
    pub name: String,
    /// URL-safe identifier derived from `name`
    pub slug: String,
}

impl Language {
    /// Entity label used in messages
    pub const ENTITY: &'static str = "language";
    /// Singular display label
    pub const VERBOSE_NAME: &'static str = "ISO 639 language";
    /// Plural display label
    pub const VERBOSE_NAME_PLURAL: &'static str = "ISO 639 languages";

    /// Business key used for lookups and fixtures
    pub fn natural_key(&self) -> &str {
        &self.terminology
    }

    /// Primary name with alternate spellings, variants and date ranges removed
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Whether the language is also in ISO 639-1
    pub fn is_basic(&self) -> bool {
        self.alpha2.is_some()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The part of a language name before the first `;`, `,` or `(`.
///
/// Trailing whitespace is trimmed, so `"Bantu (Other)"` gives `"Bantu"`.
/// The result is always a prefix of `name`.
pub fn simple_name(name: &str) -> &str {
    let end = name.find(NAME_ANNOTATION_DELIMITERS).unwrap_or(name.len());
    name[..end].trim_end()
}

/// Fields required to create a language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLanguage {
    #[serde(default)]
    pub alpha2: Option<String>,
    pub bibliographic: String,
    pub terminology: String,
    pub name: String,
}

impl NewLanguage {
    /// Create a language whose bibliographic and terminology codes agree
    pub fn new(terminology: &str, name: &str) -> Self {
        Self {
            alpha2: None,
            bibliographic: terminology.to_string(),
            terminology: terminology.to_string(),
            name: name.to_string(),
        }
    }

    /// Set the ISO 639-1 code
    pub fn with_alpha2(mut self, alpha2: &str) -> Self {
        self.alpha2 = Some(alpha2.to_string());
        self
    }

    /// Set a bibliographic code that differs from the terminology code
    pub fn with_bibliographic(mut self, bibliographic: &str) -> Self {
        self.bibliographic = bibliographic.to_string();
        self
    }

    /// Check field lengths before a write
    pub fn validate(&self) -> Result<(), CatalogError> {
        if let Some(alpha2) = &self.alpha2 {
            exact_len(Language::ENTITY, "alpha2", alpha2, 2)?;
        }
        bounded_len(
            Language::ENTITY,
            "bibliographic",
            &self.bibliographic,
            LANGUAGE_CODE_MIN_LEN,
            LANGUAGE_CODE_MAX_LEN,
        )?;
        bounded_len(
            Language::ENTITY,
            "terminology",
            &self.terminology,
            LANGUAGE_CODE_MIN_LEN,
            LANGUAGE_CODE_MAX_LEN,
        )?;
        bounded_len(Language::ENTITY, "name", &self.name, 1, LANGUAGE_NAME_MAX_LEN)?;
        Ok(())
    }
}

fn invalid(entity: &'static str, field: &'static str, reason: &str) -> CatalogError {
    CatalogError::Validation {
        entity,
        field,
        reason: reason.to_string(),
    }
}

fn exact_len(
    entity: &'static str,
    field: &'static str,
    value: &str,
    len: usize,
) -> Result<(), CatalogError> {
    let actual = value.chars().count();
    if actual != len {
        return Err(invalid(
            entity,
            field,
            &format!("expected {} characters, got {}", len, actual),
        ));
    }
    Ok(())
}

fn bounded_len(
    entity: &'static str,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), CatalogError> {
    let actual = value.chars().count();
    if actual < min || actual > max {
        return Err(invalid(
            entity,
            field,
            &format!("expected {} to {} characters, got {}", min, max, actual),
        ));
    }
    Ok(())
}
