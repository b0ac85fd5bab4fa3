//! TalentBase CLI - a terminal client for the TalentBase job board.
//!
//! Logs in against the TalentBase gateway, keeps the session across runs,
//! and lists jobs, companies and applications.

mod app;
mod cli;
mod output;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use cli::Cli;

/// Environment variable naming a directory for daily log files
const ENV_LOG_DIR: &str = "TALENTBASE_LOG_DIR";

/// Initialize the tracing subscriber for logging.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr));

    match std::env::var(ENV_LOG_DIR) {
        Ok(dir) if !dir.is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "talentbase.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        _ => {
            registry.init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _log_guard = init_tracing();
    info!("TalentBase CLI starting");

    let mut app = App::new(cli.api_url.clone()).await?;
    let result = app.run(cli.command).await;

    info!("TalentBase CLI finished");
    result
}
