/*!
 * Tests for the country and language catalog queries
 */

use isoref::catalog::{country, language};
use isoref::{CatalogError, Language, MemoryStore, NewCountry, NewLanguage, Repository};

use crate::common::{init_logging, populate};

fn seeded_repository() -> Repository {
    init_logging();
    let repo = Repository::new_in_memory().expect("Failed to create repository");
    populate(&repo).expect("Failed to populate repository");
    repo
}

/// Test that country listings come back in codepoint order of name
#[test]
fn test_countryAlphabetical_shouldOrderByName() {
    let repo = seeded_repository();

    let names: Vec<String> = country::alphabetical(&repo)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(
        names,
        vec![
            "Afghanistan",
            "Congo, The Democratic Republic of the",
            "France",
            "Germany",
            "Åland Islands",
        ]
    );
    assert!(names.windows(2).all(|w| w[0] <= w[1]));
}

/// Test natural-key lookup of a country
#[test]
fn test_countryGetByNaturalKey_withKnownCode_shouldReturnRecord() {
    let repo = seeded_repository();

    let france = country::get_by_natural_key(&repo, "FRA").unwrap();

    assert_eq!(france.alpha2, "FR");
    assert_eq!(france.numeric, "250");
    assert_eq!(france.slug, "france");
    assert_eq!(france.official_name.as_deref(), Some("French Republic"));
    assert_eq!(france.natural_key(), "FRA");
    assert_eq!(france.to_string(), "France");
}

/// Test natural-key lookup misses
#[test]
fn test_countryGetByNaturalKey_withUnknownCode_shouldReturnNotFound() {
    let repo = seeded_repository();

    let err = country::get_by_natural_key(&repo, "ZZZ").unwrap_err();
    assert!(err.is_not_found());

    // Lookups are exact, not case-folded
    let err = country::get_by_natural_key(&repo, "fra").unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { entity: "country", .. }));
}

/// Test that a second country with the same alpha-3 code is rejected
#[test]
fn test_countryCreate_withDuplicateAlpha3_shouldBeRejected() {
    let repo = seeded_repository();

    let err = country::create(&repo, &NewCountry::new("FX", "FRA", "249", "France, Metropolitan"))
        .unwrap_err();

    assert!(matches!(err, CatalogError::Duplicate { .. }));
    assert_eq!(country::count(&repo).unwrap(), 5);
}

/// Test that countries whose names slugify alike still get distinct slugs
#[test]
fn test_countryCreate_withCollidingSlug_shouldSuffix() {
    let repo = seeded_repository();

    let created = country::create(&repo, &NewCountry::new("XF", "XFR", "999", "FRANCE!")).unwrap();

    assert_eq!(created.slug, "france-2");
}

/// Test the derived simple name across the catalog
#[test]
fn test_languageSimpleName_shouldBePrefixWithoutDelimiters() {
    let repo = seeded_repository();

    for lang in language::alphabetical(&repo).unwrap() {
        let simple = lang.simple_name();
        assert!(lang.name.starts_with(simple), "{} vs {}", lang.name, simple);
        assert!(!simple.contains([';', ',', '(']));
    }

    let catalan = language::get_by_natural_key(&repo, "cat").unwrap();
    assert_eq!(catalan.simple_name(), "Catalan");
    let greek = language::get_by_natural_key(&repo, "grc").unwrap();
    assert_eq!(greek.simple_name(), "Greek");
}

/// Test the ISO 639-1 subset
#[test]
fn test_languageBasic_shouldOnlyIncludeAlpha2Languages() {
    let repo = seeded_repository();

    let basic = language::basic(&repo).unwrap();
    let all = language::alphabetical(&repo).unwrap();

    let codes: Vec<&str> = basic.iter().map(|l| l.terminology.as_str()).collect();
    assert_eq!(codes, vec!["cat", "fra", "deu"]);
    assert!(basic.iter().all(Language::is_basic));
    assert!(basic.iter().all(|l| all.contains(l)));
    assert_eq!(all.len(), 6);
}

/// Test that language listings are ordered by name
#[test]
fn test_languageAlphabetical_shouldOrderByName() {
    let repo = seeded_repository();

    let names: Vec<String> = language::alphabetical(&repo)
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();

    assert_eq!(names.first().map(String::as_str), Some("Achinese"));
    assert!(names.windows(2).all(|w| w[0] <= w[1]));
}

/// Test resolution of the different code forms
#[test]
fn test_languageFindByCode_withAnyForm_shouldResolveSameLanguage() {
    let repo = seeded_repository();

    for code in ["fra", "fre", "fr", " FR ", "FRE"] {
        let found = language::find_by_code(&repo, code).unwrap();
        assert_eq!(found.terminology, "fra", "code {}", code);
    }

    assert!(language::find_by_code(&repo, "xx").unwrap_err().is_not_found());
}

/// Test that a store seeded without bibliographic codes still resolves B codes
#[test]
fn test_languageFindByCode_withBibliographicMissing_shouldUseKnownPairs() {
    let store = MemoryStore::new();
    language::create(&store, &NewLanguage::new("deu", "German").with_alpha2("de")).unwrap();

    let found = language::find_by_code(&store, "ger").unwrap();

    assert_eq!(found.terminology, "deu");
}

/// Test that the unconstrained natural key reports ambiguity
#[test]
fn test_languageGetByNaturalKey_withDuplicateTerminology_shouldReportMultiple() {
    let repo = seeded_repository();
    language::create(&repo, &NewLanguage::new("bnt", "Bantu (Other)")).unwrap();

    let err = language::get_by_natural_key(&repo, "bnt").unwrap_err();

    assert!(matches!(err, CatalogError::MultipleFound { count: 2, .. }));
}

/// Test that languages with the same name share a slug
#[test]
fn test_languageCreate_withSameName_shouldNotDeduplicateSlug() {
    let repo = seeded_repository();

    let created = language::create(&repo, &NewLanguage::new("xfr", "French")).unwrap();

    assert_eq!(created.slug, "french");
}
