//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_chain` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing summary output
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use redirect_chain::initialization::init_logger_with;
use redirect_chain::{run_resolve, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Chains go to stdout, so the summary goes to stderr
    match run_resolve(config).await {
        Ok(report) => {
            eprintln!(
                "Resolved {} URL{} ({} succeeded, {} failed, {} truncated) in {:.1}s",
                report.total_urls,
                if report.total_urls == 1 { "" } else { "s" },
                report.resolved,
                report.failed,
                report.truncated,
                report.elapsed_seconds
            );
            if report.skipped > 0 {
                eprintln!("Skipped {} invalid input line(s)", report.skipped);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("redirect_chain error: {:#}", e);
            process::exit(1);
        }
    }
}
