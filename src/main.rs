use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use paperqa::{Config, ConfigOverrides, QueryClientBuilder, RequestError};

/// paperqa - ask questions about research papers from the terminal
#[derive(Parser)]
#[command(name = "paperqa")]
#[command(about = "Terminal client for the RAG Research Paper Assistant")]
#[command(version)]
struct Cli {
    /// Base URL of the question-answering backend [env: PAPERQA_API_URL]
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// File that receives log output [env: PAPERQA_LOG_FILE]
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset [env: PAPERQA_LOG]
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url,
            log_file: self.log_file,
            log_level: self.log_level,
        }
    }
}

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors are configuration mistakes such as a malformed API URL.
fn is_user_error(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<RequestError>(),
        Some(RequestError::InvalidUrl(_))
    )
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.overrides())?;

    paperqa::logging::init_logging(&config).context("Failed to initialize logging")?;
    tracing::info!(api_url = %config.api_url, "configuration resolved");

    let client = QueryClientBuilder::new()
        .base_url(&config.api_url)
        .build()?;

    paperqa::tui::run(Arc::new(client))
}
