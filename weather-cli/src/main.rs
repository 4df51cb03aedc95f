//! Binary crate for the `weather` command-line widget.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive search and provider configuration
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}

/// Logs go to stderr so the rendered widget on stdout stays readable.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
