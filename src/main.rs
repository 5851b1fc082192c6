//! Greeter: a minimal HTTP greeting service.
//!
//! This is the application entry point. It initializes tracing, reads the bind
//! address from the environment, builds the router, and serves until a
//! termination signal arrives.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greeter::config::{ServerConfig, DEFAULT_LOG_FILTER};
use greeter::error::AppError;
use greeter::http::start_server;
use greeter::routes::create_router;

/// Greeter: answers GET / with "Hello World!"
///
/// The bind address is read from the IP (default 0.0.0.0) and PORT
/// (default 8080) environment variables.
#[derive(Parser, Debug)]
#[command(name = "greeter", version, about)]
struct Args {
    /// Log level filter (e.g., "greeter=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            // The log filter may suppress the event above
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = config.port, "Loaded configuration");

    let app = create_router();
    start_server(app, &config).await
}
