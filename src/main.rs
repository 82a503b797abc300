//! Strategy builder - main entry point
//!
//! This binary provides six subcommands:
//! - render: Wire JSON to config text
//! - parse: Config text to wire JSON
//! - edit: Apply builder edits and print the new config text
//! - validate: Structural checks on JSON or config text
//! - presets: List or render the built-in default strategies
//! - default: Render the starting strategy of the builder

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use strategy_builder::Settings;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "strategy-builder")]
#[command(about = "Build, render and check trading strategy configurations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to settings file (JSON)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render strategy JSON as config text
    Render {
        /// Strategy JSON file ("-" for stdin)
        input: PathBuf,
    },

    /// Parse config text into strategy JSON
    Parse {
        /// Config text file ("-" for stdin)
        input: PathBuf,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Apply edits to a strategy given as JSON or config text
    Edit {
        /// Strategy file ("-" for stdin)
        input: PathBuf,

        /// Symbols to add (comma-separated). E.g., "AAPL,NVDA"
        #[arg(long, value_delimiter = ',')]
        add_symbol: Vec<String>,

        /// Symbols to remove (comma-separated)
        #[arg(long, value_delimiter = ',')]
        remove_symbol: Vec<String>,

        /// New timeframe. E.g., "1h", "4h", "1d"
        #[arg(short, long)]
        timeframe: Option<String>,

        /// Catalogue indicators to add (comma-separated). E.g., "SMA,MACD"
        #[arg(long, value_delimiter = ',')]
        add_indicator: Vec<String>,
    },

    /// Validate a strategy given as JSON or config text
    Validate {
        /// Strategy file ("-" for stdin)
        input: PathBuf,
    },

    /// List default strategies
    Presets {
        /// Render the preset with this key
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Render the default strategy
    Default,
}

fn setup_logging(verbose: bool, command_name: &str, log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    // Log file naming pattern: {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = log_dir.join(&log_filename);

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = tracing_appender::rolling::never(log_dir, &log_filename);

    // Console goes to stderr; stdout carries command output
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    debug!("Log file: {}", log_path.display());
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.settings.as_deref())?;

    let command_name = match &cli.command {
        Commands::Render { .. } => "render",
        Commands::Parse { .. } => "parse",
        Commands::Edit { .. } => "edit",
        Commands::Validate { .. } => "validate",
        Commands::Presets { .. } => "presets",
        Commands::Default => "default",
    };

    setup_logging(cli.verbose, command_name, &settings.log_dir)?;
    info!("Catalogue mode: {:?}", settings.catalogue);

    match cli.command {
        Commands::Render { input } => commands::render::run(input),
        Commands::Parse { input, compact } => commands::parse::run(input, compact),
        Commands::Edit {
            input,
            add_symbol,
            remove_symbol,
            timeframe,
            add_indicator,
        } => commands::edit::run(
            input,
            commands::edit::EditArgs {
                add_symbols: add_symbol,
                remove_symbols: remove_symbol,
                timeframe,
                add_indicators: add_indicator,
            },
            settings.catalogue,
        ),
        Commands::Validate { input } => commands::validate::run(input),
        Commands::Presets { key } => commands::presets::run(key),
        Commands::Default => commands::render::run_default(),
    }
}
