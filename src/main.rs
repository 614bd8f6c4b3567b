// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use isoref::app_config::{Config, LogLevel};
use isoref::catalog::{country, language};
use isoref::database::{DatabaseConnection, Repository};
use isoref::seed;
use isoref::{Country, Language};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import countries and languages from iso-codes JSON files
    Seed {
        /// iso_3166-1.json file (overrides config)
        #[arg(long)]
        countries: Option<PathBuf>,

        /// iso_639-2.json file (overrides config)
        #[arg(long)]
        languages: Option<PathBuf>,

        /// Import even if the same file content was imported before
        #[arg(short, long)]
        force: bool,
    },

    /// List all countries alphabetically
    Countries,

    /// Show the country with the given ISO 3166-1 alpha-3 code
    Country {
        /// Alpha-3 code, e.g. FRA
        alpha3: String,
    },

    /// List languages alphabetically
    Languages {
        /// Only languages that also have an ISO 639-1 code
        #[arg(short, long)]
        basic: bool,
    },

    /// Show a language by code
    Language {
        /// ISO 639-1, 639-2/T or 639-2/B code
        code: String,

        /// Match the terminology code exactly instead of resolving any form
        #[arg(long)]
        exact: bool,
    },

    /// Show database statistics
    Stats,

    /// Generate shell completions for isoref
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// isoref - ISO 3166-1 and ISO 639-2 reference catalogs
#[derive(Parser, Debug)]
#[command(name = "isoref")]
#[command(version)]
#[command(about = "ISO country and language reference catalogs")]
#[command(long_about = "isoref keeps ISO 3166-1 countries and ISO 639-2 languages in a SQLite catalog.

EXAMPLES:
    isoref seed                                 # Import the files named in conf.json
    isoref country FRA                          # Look up a country by alpha-3 code
    isoref languages --basic                    # Languages that have an ISO 639-1 code
    isoref language fre                         # Resolve a bibliographic code
    isoref --json countries                     # JSON output")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// SQLite database file (overrides config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself passes everything; log::max_level does the filtering.
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "isoref", &mut std::io::stdout());
        return Ok(());
    }

    // Command line level applies before the config is read
    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).into());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if let Some(database) = &cli.database {
        config.database_path = Some(database.clone());
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.into());

    let db_path = config.resolved_database_path()?;
    debug!("Using database {}", db_path.display());
    let db = DatabaseConnection::new(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
    let repo = Repository::new(db);

    run(cli.command, &config, &repo, cli.json)
}

fn run(command: Commands, config: &Config, repo: &Repository, json: bool) -> Result<()> {
    match command {
        Commands::Seed {
            countries,
            languages,
            force,
        } => {
            let countries_file = countries.unwrap_or_else(|| config.countries_file.clone());
            let languages_file = languages.unwrap_or_else(|| config.languages_file.clone());

            let outcome = seed::seed_countries(repo, &countries_file, force)
                .context("Country seeding failed")?;
            info!("Countries: {}", outcome);

            let outcome = seed::seed_languages(repo, &languages_file, force)
                .context("Language seeding failed")?;
            info!("Languages: {}", outcome);
        }
        Commands::Countries => {
            let countries = country::alphabetical(repo)?;
            print_records(&countries, json, format_country)?;
        }
        Commands::Country { alpha3 } => {
            let found = country::get_by_natural_key(repo, &alpha3)?;
            print_records(&[found], json, format_country)?;
        }
        Commands::Languages { basic } => {
            let languages = if basic {
                language::basic(repo)?
            } else {
                language::alphabetical(repo)?
            };
            print_records(&languages, json, format_language)?;
        }
        Commands::Language { code, exact } => {
            let found = if exact {
                language::get_by_natural_key(repo, &code)?
            } else {
                language::find_by_code(repo, &code)?
            };
            print_records(&[found], json, format_language)?;
        }
        Commands::Stats => {
            println!("{}", repo.stats()?);
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn print_records<T: Serialize>(records: &[T], json: bool, format: fn(&T) -> String) -> Result<()> {
    let mut stdout = std::io::stdout().lock();

    if json {
        let output =
            serde_json::to_string_pretty(records).context("Failed to serialize records")?;
        writeln!(stdout, "{}", output)?;
        return Ok(());
    }

    for record in records {
        writeln!(stdout, "{}", format(record))?;
    }
    Ok(())
}

fn format_country(country: &Country) -> String {
    match &country.official_name {
        Some(official) => format!(
            "{}  {}  {}  {} ({})  [{}]",
            country.alpha3, country.alpha2, country.numeric, country, official, country.slug
        ),
        None => format!(
            "{}  {}  {}  {}  [{}]",
            country.alpha3, country.alpha2, country.numeric, country, country.slug
        ),
    }
}

fn format_language(language: &Language) -> String {
    format!(
        "{:<7}  {:<7}  {:<2}  {}  [{}]",
        language.terminology,
        language.bibliographic,
        language.alpha2.as_deref().unwrap_or("--"),
        language.simple_name(),
        language.slug
    )
}
