//! # Liberation CLI Module
//!
//! This module implements the CLI interface for Liberation.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `evaluate` - Evaluate one alumni record from a JSON file
//! - `batch` - Run the auto-update gate over a JSON array of records
//! - `track` - Compare an expected and an actual stage on a path
//! - `paths` - List every path with its stages

mod commands;

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use liberation_core::ProgressionError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Liberation - alumni progression engine
///
/// Derives life path, stage, tracking status and auto-advancement for
/// alumni records.
#[derive(Parser, Debug)]
#[command(name = "liberation")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "LIBERATION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides the config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Evaluate one alumni record
    Evaluate {
        /// Path to a JSON file holding one record
        #[arg(short, long)]
        file: PathBuf,

        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        today: Option<String>,
    },

    /// Run the auto-update gate over a batch of records
    Batch {
        /// Path to a JSON file holding an array of records
        #[arg(short, long)]
        file: PathBuf,

        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        today: Option<String>,
    },

    /// Compare an expected and an actual stage
    Track {
        /// Expected stage (e.g. yr3)
        #[arg(short, long)]
        expected: String,

        /// Actual stage (e.g. yr2)
        #[arg(short, long)]
        actual: String,

        /// Path to compare on (college, vocation, employment)
        #[arg(short, long)]
        path: String,
    },

    /// List every path with its stages
    Paths,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ProgressionError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    if cli.verbose {
        tracing::info!(
            median = config.engine.national_median_income,
            cutoff_month = config.engine.academic_cutoff_month,
            "Engine configuration"
        );
    }

    match cli.command {
        Some(Commands::Server { host, port }) => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            cmd_server(&config, &host, port).await
        }
        Some(Commands::Evaluate { file, today }) => {
            cmd_evaluate(&config, json_mode, &file, today.as_deref())
        }
        Some(Commands::Batch { file, today }) => {
            cmd_batch(&config, json_mode, &file, today.as_deref())
        }
        Some(Commands::Track {
            expected,
            actual,
            path,
        }) => cmd_track(json_mode, &expected, &actual, &path),
        Some(Commands::Paths) | None => cmd_paths(json_mode),
    }
}
