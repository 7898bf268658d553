//! # Liberation - Alumni Progression Server
//!
//! The main binary for the Liberation progression engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface over JSON record files
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │            apps/liberation (THE BINARY)           │
//! │                                                   │
//! │   ┌─────────────┐        ┌─────────────┐          │
//! │   │    CLI      │        │  HTTP API   │          │
//! │   │   (clap)    │        │   (axum)    │          │
//! │   └──────┬──────┘        └──────┬──────┘          │
//! │          └──────────┬───────────┘                 │
//! │                     ▼                             │
//! │           ┌──────────────────┐                    │
//! │           │  liberation-core │                    │
//! │           │    (THE RULES)   │                    │
//! │           └──────────────────┘                    │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! liberation server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! liberation paths
//! liberation evaluate -f alumnus.json -t 2025-09-01
//! liberation batch -f cohort.json
//! liberation track -e yr3 -a yr2 -p college
//! ```

use clap::Parser;
use liberation::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // LIBERATION_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("LIBERATION_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "liberation=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Liberation startup banner.
fn print_banner() {
    println!(
        r#"
  Liberation v{}

  College • Vocation • Employment
"#,
        env!("CARGO_PKG_VERSION")
    );
}
