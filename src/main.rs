//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_expiry` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_expiry::initialization::init_logger_with;
use domain_expiry::{run_pipeline, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_pipeline(config).await {
        Ok(report) => {
            println!(
                "Resolved {} unique link{} ({} read) in {:.1}s: {} accepted, {} target host{}",
                report.links_unique,
                if report.links_unique == 1 { "" } else { "s" },
                report.links_total,
                report.elapsed_seconds,
                report.resolved_ok,
                report.unique_hosts,
                if report.unique_hosts == 1 { "" } else { "s" },
            );
            println!(
                "WHOIS: {} queried, {} skipped via ledger/exclude list, {} expired",
                report.hosts_queried, report.hosts_skipped, report.expired
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_expiry error: {:#}", e);
            process::exit(1);
        }
    }
}
