//! domain_expiry library: search-result link resolution and domain expiry tracking.
//!
//! Takes candidate links harvested from a search engine's result pages (an
//! external scraping step produces them), resolves each link's true redirect
//! destination, classifies it, and checks whether the destination's domain
//! registration has expired via WHOIS. Hosts already confirmed not-expired
//! are remembered in a persistent ledger keyed by their own expiry instant,
//! so repeated runs skip live queries that cannot change the answer yet.
//!
//! # Example
//!
//! ```no_run
//! use domain_expiry::{run_pipeline, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     links_file: PathBuf::from("extracted_links.csv"),
//!     output_dir: PathBuf::from("./results/20260829"),
//!     ..Default::default()
//! };
//!
//! let report = run_pipeline(config).await?;
//! println!(
//!     "{} unique links, {} target hosts, {} expired",
//!     report.links_unique, report.unique_hosts, report.expired
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod initialization;
pub mod ledger;
pub mod resolve;
pub mod storage;
pub mod whois;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::InitializationError;
pub use run::{run_pipeline, PipelineReport};

// Internal run module (contains the pipeline coordination logic)
mod run {
    use anyhow::{Context, Result};
    use chrono::Utc;
    use log::info;
    use std::time::Duration;

    use crate::config::{Config, TARGET_HOSTS_FILE, WHOIS_EXCLUDE_FILE, WHOIS_NOT_EXPIRED_FILE};
    use crate::initialization::init_redirect_client;
    use crate::ledger::filter_hosts;
    use crate::resolve::{dedup_links, extract_target_hosts, resolve_links, ResolveFilters};
    use crate::storage;
    use crate::whois::{lookup_hosts, ExpiryExtractor};

    /// Summary of one completed pipeline run.
    #[derive(Debug, Clone)]
    pub struct PipelineReport {
        /// Candidate links read from the input file
        pub links_total: usize,
        /// Links remaining after URL deduplication
        pub links_unique: usize,
        /// Links that resolved to an accepted redirect target
        pub resolved_ok: usize,
        /// Unique target hosts extracted from accepted redirects
        pub unique_hosts: usize,
        /// Hosts skipped via the exclude list or the not-expired ledger
        pub hosts_skipped: usize,
        /// Hosts queried live over WHOIS this run
        pub hosts_queried: usize,
        /// Hosts whose registration has expired
        pub expired: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the full pipeline with the provided configuration.
    ///
    /// Sequence: load links → dedup by URL → resolve redirects in batches →
    /// persist verdict tables → extract unique target hosts → drop hosts on
    /// the exclude list or still covered by the not-expired ledger → WHOIS
    /// the rest in batches → persist WHOIS tables and the updated ledger.
    ///
    /// Per-item failures surface as verdicts in the persisted tables; this
    /// function only errors on startup problems (missing input file, invalid
    /// reject pattern, unwritable output directory).
    pub async fn run_pipeline(config: Config) -> Result<PipelineReport> {
        let start_time = std::time::Instant::now();

        let filters = ResolveFilters::compile(
            &config.reject_patterns,
            config.inurl_filter,
            config.indomain_filter,
        )
        .context("Failed to compile reject patterns")?;

        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("Failed to create output dir '{}'", config.output_dir.display())
        })?;
        std::fs::create_dir_all(&config.whois_dir).with_context(|| {
            format!("Failed to create whois dir '{}'", config.whois_dir.display())
        })?;

        let client =
            init_redirect_client(&config).context("Failed to initialize HTTP client")?;

        let links = storage::load_links(&config.links_file)?;
        let links_total = links.len();
        let links = dedup_links(links);
        info!(
            "resolving {} unique links ({} read, batches of {})",
            links.len(),
            links_total,
            config.resolve_concurrency
        );

        let verdicts =
            resolve_links(&client, &links, &filters, config.resolve_concurrency).await;
        storage::write_link_verdicts(&config.output_dir, &verdicts)?;

        let hosts = extract_target_hosts(&verdicts);
        let resolved_ok = verdicts
            .iter()
            .filter(|v| matches!(v.outcome, crate::resolve::ResolutionOutcome::Ok { .. }))
            .count();
        storage::write_hosts(&config.output_dir.join(TARGET_HOSTS_FILE), &hosts)?;
        info!("{} accepted redirects, {} unique target hosts", resolved_ok, hosts.len());

        let exclude = storage::load_exclude_hosts(&config.whois_dir.join(WHOIS_EXCLUDE_FILE))?;
        let ledger_path = config.whois_dir.join(WHOIS_NOT_EXPIRED_FILE);
        let prior_ledger = storage::load_ledger(&ledger_path)?;

        let now = Utc::now();
        let (eligible, retained) = filter_hosts(&hosts, &exclude, &prior_ledger, now);
        let hosts_skipped = hosts.len() - eligible.len();
        info!(
            "whois: {} hosts to query, {} skipped ({} ledger entries retained)",
            eligible.len(),
            hosts_skipped,
            retained.len()
        );

        let extractor = ExpiryExtractor::new();
        let whois_verdicts = lookup_hosts(
            &eligible,
            &extractor,
            &config.whois_server,
            config.whois_concurrency,
            Duration::from_secs(config.whois_timeout_seconds),
        )
        .await;

        let summary = storage::write_whois_results(
            &config.whois_dir,
            &ledger_path,
            &whois_verdicts,
            &retained,
            now,
        )?;
        info!(
            "whois done: {} expired, {} fresh not-expired entries",
            summary.expired, summary.fresh_not_expired
        );

        Ok(PipelineReport {
            links_total,
            links_unique: links.len(),
            resolved_ok,
            unique_hosts: hosts.len(),
            hosts_skipped,
            hosts_queried: eligible.len(),
            expired: summary.expired,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
