/*!
 * The SQLite repository and the in-memory store answer queries identically
 */

use isoref::catalog::{country, language};
use isoref::{CountryStore, LanguageStore, MemoryStore, Repository};

use crate::common::{populate, sample_countries_path, sample_languages_path};

fn fields_of_countries<S: CountryStore>(store: &S) -> Vec<(String, String)> {
    country::alphabetical(store)
        .unwrap()
        .into_iter()
        .map(|c| (c.alpha3, c.slug))
        .collect()
}

fn fields_of_languages<S: LanguageStore>(store: &S, basic: bool) -> Vec<(String, String)> {
    let languages = if basic {
        language::basic(store).unwrap()
    } else {
        language::alphabetical(store).unwrap()
    };
    languages.into_iter().map(|l| (l.terminology, l.slug)).collect()
}

/// Test both stores with the small sample set
#[test]
fn test_stores_withSampleRecords_shouldAgree() {
    let repo = Repository::new_in_memory().unwrap();
    let memory = MemoryStore::new();
    populate(&repo).unwrap();
    populate(&memory).unwrap();

    assert_eq!(fields_of_countries(&repo), fields_of_countries(&memory));
    assert_eq!(fields_of_languages(&repo, false), fields_of_languages(&memory, false));
    assert_eq!(fields_of_languages(&repo, true), fields_of_languages(&memory, true));
}

/// Test both stores with the bundled iso-codes sample files
#[test]
fn test_stores_withSeedFiles_shouldAgree() {
    let countries = isoref::seed::load_countries(sample_countries_path()).unwrap();
    let languages = isoref::seed::load_languages(sample_languages_path()).unwrap();

    let repo = Repository::new_in_memory().unwrap();
    let memory = MemoryStore::new();
    for store in [&repo as &dyn CountryStore, &memory as &dyn CountryStore] {
        store.import_countries(&countries.records).unwrap();
    }
    for store in [&repo as &dyn LanguageStore, &memory as &dyn LanguageStore] {
        store.import_languages(&languages.records).unwrap();
    }

    assert_eq!(fields_of_countries(&repo), fields_of_countries(&memory));
    assert_eq!(fields_of_languages(&repo, true), fields_of_languages(&memory, true));

    // Natural-key lookups through trait objects
    let dyn_store: &dyn CountryStore = &memory;
    let japan = country::get_by_natural_key(dyn_store, "JPN").unwrap();
    assert_eq!(japan.slug, "japan");
}
