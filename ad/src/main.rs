//! applydaemon CLI entry point

use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use applydaemon::applier::Applier;
use applydaemon::cli::Cli;
use applydaemon::config::Config;
use applydaemon::executor::EchoExecutor;
use applydaemon::server;

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{other}', defaulting to INFO");
            tracing::Level::INFO
        }
        None => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_cli_overrides(cli.port, cli.request_timeout_seconds);

    info!(
        port = config.server.port,
        request_timeout_ms = config.applier.request_timeout_ms,
        queue_capacity = config.applier.queue_capacity,
        "starting applydaemon"
    );

    let applier = Arc::new(Applier::new(
        config.applier.clone(),
        Arc::new(EchoExecutor::new()),
    ));

    server::serve(config.server.port, applier).await
}
