//! Filemap CLI - lookups against self-refreshing `key: value` files.
//!
//! Provides the `fmap` command for querying a backing file through the same
//! cache the library uses, dumping its parsed contents, and evaluating record
//! timestamps against a time window.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, FmtSubscriber};

use commands::{dump, get, timediff};
use config::FilemapConfig;

/// Filemap CLI - key/value lookups over flat files
#[derive(Parser, Debug)]
#[command(
    name = "fmap",
    author,
    version,
    about = "Filemap - lookups against self-refreshing key: value files"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// TOML configuration file with optional [cache] and [timediff] tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up one or more keys
    ///
    /// Prints each value found on its own line. Exits with status 1 if any
    /// key is missing.
    Get {
        /// Backing file (overrides [cache].path)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Keys to look up
        #[arg(required = true)]
        keys: Vec<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every parsed entry in key order
    Dump {
        /// Backing file (overrides [cache].path)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check record timestamps against a time window
    ///
    /// A timestamp matches when it is at least FUTURE seconds ahead of now or
    /// at least PAST seconds behind it.
    Timediff {
        /// Future offset in seconds (overrides [timediff].future)
        #[arg(long)]
        future: Option<u64>,

        /// Past offset in seconds (overrides [timediff].past)
        #[arg(long)]
        past: Option<u64>,

        /// RFC 3339 timestamps or unix seconds
        #[arg(required = true, allow_hyphen_values = true)]
        timestamps: Vec<String>,
    },
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .without_time()
                    .with_target(false),
            )
            .try_init()?;
        return Ok(());
    }

    let level = match log_level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let config = match &args.config {
        Some(path) => FilemapConfig::load_from_file(path)?,
        None => FilemapConfig::default(),
    };

    match args.command {
        Command::Get { file, keys, json } => get::execute(&config, file, &keys, json),
        Command::Dump { file, json } => dump::execute(&config, file, json),
        Command::Timediff { future, past, timestamps } => {
            timediff::execute(&config, future, past, &timestamps)
        }
    }
}
