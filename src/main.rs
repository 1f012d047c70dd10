//! taiga - command-line client for the Taiga REST API.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use taiga_api::api::SessionExpiredHook;
use taiga_api::cli::{self, Cli};
use taiga_api::config::Settings;
use taiga_api::{logging, AppError, Taiga};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    logging::init(args.verbose).context("failed to initialize logging")?;

    let code = match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("{}", action);
            }
            if let Some(dir) = logging::log_directory() {
                eprintln!("Logs: {}", dir.display());
            }
            ExitCode::FAILURE
        }
    };

    info!("taiga shutting down");
    Ok(code)
}

async fn run(args: &Cli) -> Result<(), AppError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?.with_env_overrides(),
        None => Settings::load()?,
    };
    if let Some(api) = &args.api {
        settings.api = Some(api.clone());
    }

    let hook: SessionExpiredHook = Arc::new(|| {
        eprintln!("Session expired. Run 'taiga login' to log in again.");
    });
    let taiga = Taiga::bootstrap(&settings, Some(hook)).await?;
    cli::run(&args.command, &taiga).await
}
