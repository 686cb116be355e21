//! Configuration types and CLI options.
//!
//! This module defines the enums and the main `Config` struct used for
//! command-line argument parsing and library configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_REJECT_PATTERN, DEFAULT_RESOLVE_CONCURRENCY,
    DEFAULT_USER_AGENT, DEFAULT_WHOIS_CONCURRENCY, DEFAULT_WHOIS_SERVER,
    DEFAULT_WHOIS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Application configuration.
///
/// Every recognized option is enumerated here with an explicit default; there
/// are no implicit fallbacks at use sites. The struct doubles as the CLI
/// surface (via `clap`) and the library configuration, so it can also be
/// constructed programmatically:
///
/// ```no_run
/// use domain_expiry::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     links_file: PathBuf::from("extracted_links.csv"),
///     resolve_concurrency: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_expiry",
    about = "Resolves search-result redirect links and tracks expired target domains via WHOIS"
)]
pub struct Config {
    /// CSV file of harvested candidate links: url, origin query, page token
    pub links_file: PathBuf,

    /// Directory where this run's result tables are written
    #[arg(long, default_value = "./results")]
    pub output_dir: PathBuf,

    /// Directory holding the persistent WHOIS ledger and exclude list
    #[arg(long, default_value = "./whois")]
    pub whois_dir: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Concurrent requests per link-resolution batch
    #[arg(long, default_value_t = DEFAULT_RESOLVE_CONCURRENCY)]
    pub resolve_concurrency: usize,

    /// Concurrent queries per WHOIS batch
    #[arg(long, default_value_t = DEFAULT_WHOIS_CONCURRENCY)]
    pub whois_concurrency: usize,

    /// Per-request timeout for link resolution, in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_seconds: u64,

    /// Per-host WHOIS query timeout in seconds
    #[arg(long, default_value_t = DEFAULT_WHOIS_TIMEOUT_SECS)]
    pub whois_timeout_seconds: u64,

    /// WHOIS bootstrap server (optionally host:port)
    #[arg(long, default_value = DEFAULT_WHOIS_SERVER)]
    pub whois_server: String,

    /// Reject a redirect unless its full target URL contains the origin query
    #[arg(long)]
    pub inurl_filter: bool,

    /// Reject a redirect unless its target host contains the origin query
    #[arg(long)]
    pub indomain_filter: bool,

    /// Reject patterns tested against redirect targets (repeatable)
    #[arg(long = "reject-pattern", default_values_t = [DEFAULT_REJECT_PATTERN.to_string()])]
    pub reject_patterns: Vec<String>,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            links_file: PathBuf::from("extracted_links.csv"),
            output_dir: PathBuf::from("./results"),
            whois_dir: PathBuf::from("./whois"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            resolve_concurrency: DEFAULT_RESOLVE_CONCURRENCY,
            whois_concurrency: DEFAULT_WHOIS_CONCURRENCY,
            fetch_timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            whois_timeout_seconds: DEFAULT_WHOIS_TIMEOUT_SECS,
            whois_server: DEFAULT_WHOIS_SERVER.to_string(),
            inurl_filter: false,
            indomain_filter: false,
            reject_patterns: vec![DEFAULT_REJECT_PATTERN.to_string()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
