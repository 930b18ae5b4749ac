mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rulecheck")]
#[command(version, about = "Field Rules Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON record against a ruleset
    Validate {
        /// Path to the ruleset file (YAML or TOML)
        ruleset: String,

        /// Path to the record file (JSON object)
        record: String,

        /// Evaluation instant (RFC 3339), defaults to the wall clock
        #[arg(long)]
        now: Option<String>,

        /// Temporal tolerance in seconds
        #[arg(long)]
        tolerance: Option<i64>,

        /// Report every failing field instead of the first
        #[arg(short, long)]
        all: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a ruleset definition without validating a record
    Check {
        /// Path to the ruleset file (YAML or TOML)
        ruleset: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List built-in constraints and registered predicates
    Predicates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Validate {
            ruleset,
            record,
            now,
            tolerance,
            all,
            format,
        } => commands::validate::execute(commands::validate::ValidateArgs {
            ruleset: &ruleset,
            record: &record,
            now: now.as_deref(),
            tolerance_secs: tolerance,
            all,
            format: &format,
        }),

        Commands::Check { ruleset, format } => commands::check::execute(&ruleset, &format),

        Commands::Predicates => commands::predicates::execute(),
    }
}
