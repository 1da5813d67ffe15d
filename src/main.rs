//! Credit spread calculator - main entry point
//!
//! This binary provides three subcommands:
//! - calc: Compute trigger prices and the delta advisory once
//! - table: Print the take-profit / stop-loss comparison table
//! - watch: Recompute from a stream of form edits on stdin

use anyhow::Result;
use clap::{Parser, Subcommand};
use credit_spread_calculator::Config;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "credit-spread")]
#[command(about = "Per-leg take-profit / stop-loss prices for vertical credit spreads", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute trigger prices, win rate and delta recommendation
    Calc {
        /// Sell (short leg) price
        #[arg(long)]
        sell: Option<String>,

        /// Buy (long leg) price
        #[arg(long)]
        buy: Option<String>,

        /// Take-profit, percent of net credit (default 75)
        #[arg(long)]
        tp: Option<String>,

        /// Stop-loss, percent of net credit (default 200)
        #[arg(long)]
        sl: Option<String>,

        /// Query string to restore, e.g. "sell=2&buy=0.5&tp=75&sl=200"
        #[arg(short, long)]
        query: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the preset comparison table
    Table {
        /// Current take-profit percent, marks the matching row
        #[arg(long)]
        tp: Option<String>,

        /// Current stop-loss percent, marks the matching row
        #[arg(long)]
        sl: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Read `field=value` edits and `!field=value` commits from stdin
    Watch {
        /// Query string used for the initial form
        #[arg(short, long)]
        query: Option<String>,

        /// Debounce window in milliseconds (overrides config)
        #[arg(long)]
        debounce_ms: Option<u64>,

        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
}

fn setup_logging(verbose: bool, command_name: &str, config: &Config) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Stdout carries the rendered results, so the console layer goes to stderr
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    let file_layer = if config.logging.file {
        std::fs::create_dir_all(&config.logging.dir)?;
        let log_filename = format!(
            "{}_{}.log",
            command_name,
            chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
        );
        let file_appender = tracing_appender::rolling::never(&config.logging.dir, &log_filename);
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if config.logging.file {
        info!("Log directory: {}", config.logging.dir);
    }

    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let command_name = match &cli.command {
        Commands::Calc { .. } => "calc",
        Commands::Table { .. } => "table",
        Commands::Watch { .. } => "watch",
    };
    setup_logging(cli.verbose, command_name, &config)?;

    match cli.command {
        Commands::Calc {
            sell,
            buy,
            tp,
            sl,
            query,
            json,
        } => commands::calc::run(sell, buy, tp, sl, query, json),

        Commands::Table { tp, sl, json } => commands::table::run(tp, sl, json),

        Commands::Watch {
            query,
            debounce_ms,
            json,
        } => commands::watch::run(&config, query, debounce_ms, json),
    }
}
