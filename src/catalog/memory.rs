/*!
 * In-process catalog store.
 *
 * Mirrors the SQLite constraints: country codes, name and slug are unique,
 * language rows are not. Useful for embedding a seeded catalog without a
 * database file and for tests.
 */

use std::sync::{Mutex, MutexGuard};

use super::{CountryStore, LanguageCodeField, LanguageStore};
use crate::database::models::{
    COUNTRY_NAME_MAX_LEN, Country, LANGUAGE_NAME_MAX_LEN, Language, NewCountry, NewLanguage,
};
use crate::errors::CatalogError;
use crate::slug;

#[derive(Default)]
struct MemoryState {
    countries: Vec<Country>,
    languages: Vec<Language>,
    next_country_id: i64,
    next_language_id: i64,
}

/// Catalog store held entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, CatalogError> {
        self.state
            .lock()
            .map_err(|e| CatalogError::Lock(e.to_string()))
    }
}

fn duplicate(field: &str, value: &str) -> CatalogError {
    CatalogError::Duplicate {
        entity: Country::ENTITY,
        field: field.to_string(),
        value: value.to_string(),
    }
}

impl CountryStore for MemoryStore {
    fn insert_country(&self, country: &NewCountry) -> Result<Country, CatalogError> {
        country.validate()?;
        let mut state = self.lock()?;

        for existing in &state.countries {
            if existing.alpha2 == country.alpha2 {
                return Err(duplicate("alpha2", &country.alpha2));
            }
            if existing.alpha3 == country.alpha3 {
                return Err(duplicate("alpha3", &country.alpha3));
            }
            if existing.numeric == country.numeric {
                return Err(duplicate("numeric", &country.numeric));
            }
            if existing.name == country.name {
                return Err(duplicate("name", &country.name));
            }
        }

        let base = slug::slug_or(&country.name, Country::ENTITY, COUNTRY_NAME_MAX_LEN);
        let slug = slug::unique_slug::<_, CatalogError>(&base, COUNTRY_NAME_MAX_LEN, |candidate| {
            Ok(state.countries.iter().any(|c| c.slug == candidate))
        })?;

        state.next_country_id += 1;
        let created = Country {
            id: state.next_country_id,
            alpha2: country.alpha2.clone(),
            alpha3: country.alpha3.clone(),
            numeric: country.numeric.clone(),
            name: country.name.clone(),
            slug,
            official_name: country.official_name.clone(),
        };
        state.countries.push(created.clone());

        Ok(created)
    }

    fn countries_by_name(&self) -> Result<Vec<Country>, CatalogError> {
        let state = self.lock()?;
        let mut countries = state.countries.clone();
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    fn countries_with_alpha3(&self, alpha3: &str) -> Result<Vec<Country>, CatalogError> {
        let state = self.lock()?;
        Ok(state
            .countries
            .iter()
            .filter(|c| c.alpha3 == alpha3)
            .cloned()
            .collect())
    }

    fn country_count(&self) -> Result<usize, CatalogError> {
        Ok(self.lock()?.countries.len())
    }
}

impl LanguageStore for MemoryStore {
    fn insert_language(&self, language: &NewLanguage) -> Result<Language, CatalogError> {
        language.validate()?;
        let mut state = self.lock()?;

        state.next_language_id += 1;
        let created = Language {
            id: state.next_language_id,
            alpha2: language.alpha2.clone(),
            bibliographic: language.bibliographic.clone(),
            terminology: language.terminology.clone(),
            name: language.name.clone(),
            slug: slug::slug_or(&language.name, Language::ENTITY, LANGUAGE_NAME_MAX_LEN),
        };
        state.languages.push(created.clone());

        Ok(created)
    }

    fn languages_by_name(&self, basic_only: bool) -> Result<Vec<Language>, CatalogError> {
        let state = self.lock()?;
        let mut languages: Vec<Language> = state
            .languages
            .iter()
            .filter(|l| !basic_only || l.is_basic())
            .cloned()
            .collect();
        // Stable sort: ties keep id order, same as the SQLite store.
        languages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(languages)
    }

    fn languages_with_code(
        &self,
        field: LanguageCodeField,
        code: &str,
    ) -> Result<Vec<Language>, CatalogError> {
        let state = self.lock()?;
        Ok(state
            .languages
            .iter()
            .filter(|l| field.matches(l, code))
            .cloned()
            .collect())
    }

    fn language_count(&self) -> Result<usize, CatalogError> {
        Ok(self.lock()?.languages.len())
    }
}
