/*!
 * End-to-end seeding tests: iso-codes files into a SQLite catalog
 */

use isoref::catalog::{country, language};
use isoref::database::DatabaseConnection;
use isoref::seed::{self, SeedOutcome};
use isoref::{ImportReport, Repository, SeedError};

use crate::common::{
    create_temp_dir, create_test_file, init_logging, sample_countries_path,
    sample_languages_path,
};

fn file_repository(dir: &std::path::Path) -> Repository {
    let db = DatabaseConnection::new(dir.join("catalog.db")).expect("Failed to open database");
    Repository::new(db)
}

/// Test seeding the bundled sample files
#[test]
fn test_seed_withSampleFiles_shouldPopulateBothCatalogs() {
    init_logging();
    let dir = create_temp_dir().unwrap();
    let repo = file_repository(dir.path());

    let countries = seed::seed_countries(&repo, sample_countries_path(), false).unwrap();
    let languages = seed::seed_languages(&repo, sample_languages_path(), false).unwrap();

    assert!(matches!(
        countries,
        SeedOutcome::Imported(ImportReport { inserted: 30, skipped: 0 })
    ));
    assert!(matches!(
        languages,
        SeedOutcome::Imported(ImportReport { inserted: 38, skipped: 0 })
    ));

    let france = country::get_by_natural_key(&repo, "FRA").unwrap();
    assert_eq!(france.name, "France");
    assert_eq!(france.official_name.as_deref(), Some("French Republic"));

    let ivory_coast = country::get_by_natural_key(&repo, "CIV").unwrap();
    assert_eq!(ivory_coast.slug, "cote-divoire");

    let french = language::find_by_code(&repo, "fre").unwrap();
    assert_eq!(french.terminology, "fra");
    assert_eq!(language::basic(&repo).unwrap().len(), 30);

    let stats = repo.stats().unwrap();
    assert_eq!(stats.country_count, 30);
    assert_eq!(stats.language_count, 38);
    assert_eq!(stats.basic_language_count, 30);
    assert_eq!(stats.seed_run_count, 2);
}

/// Test that reseeding the same file is a no-op, and forcing skips existing keys
#[test]
fn test_seed_twice_shouldBeIdempotent() {
    let dir = create_temp_dir().unwrap();
    let repo = file_repository(dir.path());

    seed::seed_countries(&repo, sample_countries_path(), false).unwrap();

    let again = seed::seed_countries(&repo, sample_countries_path(), false).unwrap();
    assert!(matches!(again, SeedOutcome::Unchanged(_)));

    let forced = seed::seed_countries(&repo, sample_countries_path(), true).unwrap();
    assert!(matches!(
        forced,
        SeedOutcome::Imported(ImportReport { inserted: 0, skipped: 30 })
    ));
    assert_eq!(country::count(&repo).unwrap(), 30);
}

/// Test that data survives reopening the database file
#[test]
fn test_seed_thenReopen_shouldKeepRecords() {
    let dir = create_temp_dir().unwrap();
    {
        let repo = file_repository(dir.path());
        seed::seed_languages(&repo, sample_languages_path(), false).unwrap();
    }

    let repo = file_repository(dir.path());
    let names: Vec<String> = language::alphabetical(&repo)
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();

    assert_eq!(names.len(), 38);
    assert!(names.windows(2).all(|w| w[0] <= w[1]));
}

/// Test that a file with a bad record imports nothing
#[test]
fn test_seed_withInvalidRecord_shouldRollBackWholeFile() {
    let dir = create_temp_dir().unwrap();
    let repo = file_repository(dir.path());
    let path = create_test_file(
        dir.path(),
        "countries.json",
        r#"{"3166-1": [
            {"alpha_2": "FR", "alpha_3": "FRA", "numeric": "250", "name": "France"},
            {"alpha_2": "XX", "alpha_3": "XXXX", "numeric": "999", "name": "Nowhere"}
        ]}"#,
    )
    .unwrap();

    let err = seed::seed_countries(&repo, &path, false).unwrap_err();

    assert!(matches!(err, SeedError::Catalog(_)));
    assert_eq!(country::count(&repo).unwrap(), 0);
    assert_eq!(repo.stats().unwrap().seed_run_count, 0);
}

/// Test error reporting for unreadable and malformed files
#[test]
fn test_seed_withBadFiles_shouldReportPath() {
    let dir = create_temp_dir().unwrap();
    let repo = file_repository(dir.path());

    let missing = dir.path().join("missing.json");
    let err = seed::seed_countries(&repo, &missing, false).unwrap_err();
    assert!(matches!(err, SeedError::Read { .. }));
    assert!(err.to_string().contains("missing.json"));

    let malformed = create_test_file(dir.path(), "languages.json", r#"{"639-3": []}"#).unwrap();
    let err = seed::seed_languages(&repo, &malformed, false).unwrap_err();
    assert!(matches!(err, SeedError::Parse { .. }));
}
