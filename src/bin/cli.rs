//! Eatery menu CLI
//!
//! Local entry point for the scheduled update job and for cache lookups.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use eatery::{
    error::{AppError, Result},
    models::{CacheEntry, Config, RawWeeklyBlob},
    parser::MenuParser,
    pipeline,
    storage::{LocalMenuCache, MenuStorage, migrate_legacy_layout},
    utils::fs::load_json,
};

/// Eatery - weekly lunch menu parser and cache
#[derive(Parser, Debug)]
#[command(name = "eatery", version, about = "Weekly lunch menu parser and cache")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download, parse and cache the configured menus
    Update {
        /// Ignore the minimum update interval
        #[arg(long)]
        force: bool,
    },

    /// Parse a saved provider menu object and print the result
    Parse {
        /// JSON file holding one provider menu object
        file: PathBuf,

        /// Also save the result to the cache under this menu id
        #[arg(long)]
        save_as: Option<String>,
    },

    /// Print a cached menu as an API response
    Show {
        /// Menu slug or legacy numeric id
        menu_id: String,

        /// ISO week (default: current week)
        #[arg(short, long)]
        week: Option<u32>,

        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Day number, 1 = Monday
        #[arg(short, long)]
        day: Option<u8>,
    },

    /// Move year-less week directories to the {week}-{year} layout
    Migrate {
        /// Year the legacy menus were downloaded in
        #[arg(long)]
        year: i32,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging from the verbosity flag or the configured level.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    log::info!("Loaded configuration from {}", cli.config.display());
    let cache = LocalMenuCache::new(&config.cache)?;

    match cli.command {
        Command::Update { force } => {
            let parser = MenuParser::new(&config.parser)?;
            let summary = pipeline::run_update(&config, &parser, &cache, force).await?;
            log::info!(
                "Saved {} menus ({} changed)",
                summary.saved,
                summary.changed
            );
        }

        Command::Parse { file, save_as } => {
            let blob: RawWeeklyBlob = load_json(&file)?
                .ok_or_else(|| AppError::config(format!("{} not found", file.display())))?;
            let parser = MenuParser::new(&config.parser)?;
            let menu = parser.parse(&blob)?;
            println!("{}", serde_json::to_string_pretty(&menu)?);

            if let Some(menu_id) = save_as {
                let outcome = cache.save(&menu_id, &CacheEntry::new(menu_id.as_str(), menu))?;
                log::info!("Saved to {}", outcome.path.display());
            }
        }

        Command::Show {
            menu_id,
            week,
            year,
            day,
        } => {
            let (current_week, current_year) = cache.week_and_year(Utc::now());
            let response = pipeline::lookup(
                &cache,
                &menu_id,
                week.unwrap_or(current_week),
                year.unwrap_or(current_year),
                day,
            );
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Migrate { year } => {
            let report = migrate_legacy_layout(cache.root(), year)?;
            log::info!(
                "Moved {} week directories, skipped {}",
                report.moved.len(),
                report.skipped.len()
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
