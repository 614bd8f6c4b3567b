/*!
 * Language catalog queries.
 *
 * `terminology` is the natural key. The column carries no uniqueness
 * constraint, so an exact lookup reports ambiguity instead of picking a row.
 */

use log::debug;

use super::{LanguageCodeField, LanguageStore};
use crate::database::models::{Language, NewLanguage};
use crate::errors::CatalogError;
use crate::language_utils::terminology_for_bibliographic;

/// All languages sorted by reference name
pub fn alphabetical<S: LanguageStore + ?Sized>(store: &S) -> Result<Vec<Language>, CatalogError> {
    store.languages_by_name(false)
}

/// Languages that also have an ISO 639-1 code, sorted by name
pub fn basic<S: LanguageStore + ?Sized>(store: &S) -> Result<Vec<Language>, CatalogError> {
    store.languages_by_name(true)
}

/// The language whose terminology code is exactly `terminology`
pub fn get_by_natural_key<S: LanguageStore + ?Sized>(
    store: &S,
    terminology: &str,
) -> Result<Language, CatalogError> {
    let matches = store.languages_with_code(LanguageCodeField::Terminology, terminology)?;
    single(matches, terminology)
}

/// Resolve an ISO 639-1, 639-2/T or 639-2/B code in any case.
///
/// Fields are tried in order: terminology, bibliographic, alpha-2. The
/// first field with any match decides the result.
pub fn find_by_code<S: LanguageStore + ?Sized>(
    store: &S,
    code: &str,
) -> Result<Language, CatalogError> {
    let normalized = code.trim().to_lowercase();

    let fields: &[LanguageCodeField] = if normalized.chars().count() == 2 {
        &[LanguageCodeField::Alpha2]
    } else {
        &[LanguageCodeField::Terminology, LanguageCodeField::Bibliographic]
    };

    for field in fields {
        let matches = store.languages_with_code(*field, &normalized)?;
        if !matches.is_empty() {
            debug!("Resolved language code '{}' via {}", code, field.column());
            return single(matches, &normalized);
        }
    }

    // Stores seeded without bibliographic codes still resolve the
    // well-known B/T pairs.
    if let Some(terminology) = terminology_for_bibliographic(&normalized) {
        return get_by_natural_key(store, terminology);
    }

    Err(CatalogError::NotFound {
        entity: Language::ENTITY,
        key: code.to_string(),
    })
}

/// Persist a new language
pub fn create<S: LanguageStore + ?Sized>(
    store: &S,
    language: &NewLanguage,
) -> Result<Language, CatalogError> {
    let created = store.insert_language(language)?;
    debug!("Created language {} ({})", created.terminology, created.slug);
    Ok(created)
}

/// Number of languages
pub fn count<S: LanguageStore + ?Sized>(store: &S) -> Result<usize, CatalogError> {
    store.language_count()
}

fn single(mut matches: Vec<Language>, key: &str) -> Result<Language, CatalogError> {
    match matches.len() {
        0 => Err(CatalogError::NotFound {
            entity: Language::ENTITY,
            key: key.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        count => Err(CatalogError::MultipleFound {
            entity: Language::ENTITY,
            key: key.to_string(),
            count,
        }),
    }
}
