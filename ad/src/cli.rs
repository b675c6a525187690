//! CLI definitions

use clap::Parser;
use std::path::PathBuf;

/// applydaemon - single-writer command serialization daemon
#[derive(Debug, Parser)]
#[command(
    name = "ad",
    about = "Serializes concurrent commands through a single worker",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Listener port (overrides the config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Request timeout in seconds; bounds both the enqueue wait and the
    /// wait for the result (overrides the config file)
    #[arg(long = "request-timeout-seconds")]
    pub request_timeout_seconds: Option<u64>,
}
