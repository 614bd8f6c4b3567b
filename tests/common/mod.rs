/*!
 * Common test utilities for the isoref test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use isoref::{CountryStore, LanguageStore, NewCountry, NewLanguage};

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Path to the bundled iso-codes country sample
pub fn sample_countries_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/iso_3166-1.json")
}

/// Path to the bundled iso-codes language sample
pub fn sample_languages_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/iso_639-2.json")
}

/// A handful of countries, deliberately not in name order
pub fn sample_countries() -> Vec<NewCountry> {
    vec![
        NewCountry::new("FR", "FRA", "250", "France").with_official_name("French Republic"),
        NewCountry::new("CD", "COD", "180", "Congo, The Democratic Republic of the"),
        NewCountry::new("AX", "ALA", "248", "Åland Islands"),
        NewCountry::new("DE", "DEU", "276", "Germany")
            .with_official_name("Federal Republic of Germany"),
        NewCountry::new("AF", "AFG", "004", "Afghanistan"),
    ]
}

/// A handful of languages, some without an ISO 639-1 code
pub fn sample_languages() -> Vec<NewLanguage> {
    vec![
        NewLanguage::new("fra", "French").with_alpha2("fr").with_bibliographic("fre"),
        NewLanguage::new("bnt", "Bantu languages"),
        NewLanguage::new("cat", "Catalan; Valencian").with_alpha2("ca"),
        NewLanguage::new("grc", "Greek, Ancient (to 1453)"),
        NewLanguage::new("deu", "German").with_alpha2("de").with_bibliographic("ger"),
        NewLanguage::new("ace", "Achinese"),
    ]
}

/// Fill any store with the sample records
pub fn populate<S: CountryStore + LanguageStore>(store: &S) -> Result<()> {
    store.import_countries(&sample_countries())?;
    store.import_languages(&sample_languages())?;
    Ok(())
}
