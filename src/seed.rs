/*!
 * Seed import from the Debian iso-codes JSON files.
 *
 * `iso_3166-1.json` and `iso_639-2.json` are the files pycountry ships.
 * Each import runs in one transaction and is recorded with the file's
 * SHA-256, so reseeding an unchanged file is skipped unless forced.
 */

use log::{debug, info, warn};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::catalog::{CountryStore, ImportReport, LanguageStore};
use crate::database::Repository;
use crate::database::models::{NewCountry, NewLanguage};
use crate::database::repository::SeedRunRecord;
use crate::errors::SeedError;
use crate::language_utils::expected_terminology_for_alpha2;

/// Dataset label for country imports
pub const COUNTRIES_DATASET: &str = "countries";

/// Dataset label for language imports
pub const LANGUAGES_DATASET: &str = "languages";

#[derive(Debug, Deserialize)]
struct CountryFile {
    #[serde(rename = "3166-1")]
    entries: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    alpha_2: String,
    alpha_3: String,
    numeric: String,
    name: String,
    #[serde(default)]
    official_name: Option<String>,
}

impl From<CountryEntry> for NewCountry {
    fn from(entry: CountryEntry) -> Self {
        NewCountry {
            alpha2: entry.alpha_2,
            alpha3: entry.alpha_3,
            numeric: entry.numeric,
            name: entry.name,
            official_name: entry.official_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LanguageFile {
    #[serde(rename = "639-2")]
    entries: Vec<LanguageEntry>,
}

#[derive(Debug, Deserialize)]
struct LanguageEntry {
    alpha_3: String,
    name: String,
    #[serde(default)]
    alpha_2: Option<String>,
    #[serde(default)]
    bibliographic: Option<String>,
}

impl From<LanguageEntry> for NewLanguage {
    fn from(entry: LanguageEntry) -> Self {
        NewLanguage {
            alpha2: entry.alpha_2,
            bibliographic: entry.bibliographic.unwrap_or_else(|| entry.alpha_3.clone()),
            terminology: entry.alpha_3,
            name: entry.name,
        }
    }
}

/// Records read from one seed file
#[derive(Debug, Clone)]
pub struct SeedFile<T> {
    /// Path the file was read from
    pub path: String,
    /// SHA-256 of the raw file contents, hex encoded
    pub hash: String,
    /// Parsed records in file order
    pub records: Vec<T>,
}

/// Result of seeding one dataset
#[derive(Debug, Clone)]
pub enum SeedOutcome {
    /// Records were imported
    Imported(ImportReport),
    /// The same file content was imported before
    Unchanged(SeedRunRecord),
}

impl std::fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedOutcome::Imported(report) => write!(f, "{}", report),
            SeedOutcome::Unchanged(run) => {
                write!(f, "unchanged since {} ({})", run.created_at, run.source_path)
            }
        }
    }
}

/// Parse the contents of an `iso_3166-1.json` file
pub fn parse_countries(json: &str) -> Result<Vec<NewCountry>, serde_json::Error> {
    let file: CountryFile = serde_json::from_str(json)?;
    Ok(file.entries.into_iter().map(NewCountry::from).collect())
}

/// Parse the contents of an `iso_639-2.json` file
pub fn parse_languages(json: &str) -> Result<Vec<NewLanguage>, serde_json::Error> {
    let file: LanguageFile = serde_json::from_str(json)?;
    Ok(file.entries.into_iter().map(NewLanguage::from).collect())
}

fn read_seed_file<T, P>(
    path: P,
    parse: fn(&str) -> Result<Vec<T>, serde_json::Error>,
) -> Result<SeedFile<T>, SeedError>
where
    P: AsRef<Path>,
{
    let path_str = path.as_ref().display().to_string();

    let content = std::fs::read_to_string(path.as_ref()).map_err(|source| SeedError::Read {
        path: path_str.clone(),
        source,
    })?;

    let records = parse(&content).map_err(|source| SeedError::Parse {
        path: path_str.clone(),
        source,
    })?;

    debug!("Read {} records from {}", records.len(), path_str);

    Ok(SeedFile {
        path: path_str,
        hash: content_hash(&content),
        records,
    })
}

/// Read and parse a country seed file
pub fn load_countries<P: AsRef<Path>>(path: P) -> Result<SeedFile<NewCountry>, SeedError> {
    read_seed_file(path, parse_countries)
}

/// Read and parse a language seed file
pub fn load_languages<P: AsRef<Path>>(path: P) -> Result<SeedFile<NewLanguage>, SeedError> {
    read_seed_file(path, parse_languages)
}

/// Hex-encoded SHA-256 of seed file contents
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Languages whose alpha-2 code maps to a different ISO 639-3 code in `isolang`
///
/// Returns `(terminology, alpha2, expected)` triples.
pub fn mismatched_alpha2(languages: &[NewLanguage]) -> Vec<(String, String, String)> {
    languages
        .iter()
        .filter_map(|language| {
            let alpha2 = language.alpha2.as_deref()?;
            let expected = expected_terminology_for_alpha2(alpha2)?;
            if expected == language.terminology {
                None
            } else {
                Some((
                    language.terminology.clone(),
                    alpha2.to_string(),
                    expected.to_string(),
                ))
            }
        })
        .collect()
}

/// Import countries from `path` into the repository
pub fn seed_countries<P: AsRef<Path>>(
    repo: &Repository,
    path: P,
    force: bool,
) -> Result<SeedOutcome, SeedError> {
    let file = load_countries(path)?;

    if let Some(previous) = previous_run(repo, COUNTRIES_DATASET, &file.hash, force)? {
        return Ok(SeedOutcome::Unchanged(previous));
    }

    let report = repo.import_countries(&file.records)?;
    repo.record_seed_run(COUNTRIES_DATASET, &file.path, &file.hash, &report)?;
    info!("Seeded countries from {}: {}", file.path, report);

    Ok(SeedOutcome::Imported(report))
}

/// Import languages from `path` into the repository
pub fn seed_languages<P: AsRef<Path>>(
    repo: &Repository,
    path: P,
    force: bool,
) -> Result<SeedOutcome, SeedError> {
    let file = load_languages(path)?;

    if let Some(previous) = previous_run(repo, LANGUAGES_DATASET, &file.hash, force)? {
        return Ok(SeedOutcome::Unchanged(previous));
    }

    for (terminology, alpha2, expected) in mismatched_alpha2(&file.records) {
        warn!(
            "Language {} has alpha-2 '{}' which usually maps to '{}'",
            terminology, alpha2, expected
        );
    }

    let report = repo.import_languages(&file.records)?;
    repo.record_seed_run(LANGUAGES_DATASET, &file.path, &file.hash, &report)?;
    info!("Seeded languages from {}: {}", file.path, report);

    Ok(SeedOutcome::Imported(report))
}

fn previous_run(
    repo: &Repository,
    dataset: &str,
    hash: &str,
    force: bool,
) -> Result<Option<SeedRunRecord>, SeedError> {
    if force {
        return Ok(None);
    }

    let previous = repo.find_seed_run(dataset, hash)?;
    if let Some(run) = &previous {
        info!(
            "Skipping {} seed: file unchanged since {}",
            dataset, run.created_at
        );
    }
    Ok(previous)
}
