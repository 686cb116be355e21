//! WHOIS data structures.

use chrono::{DateTime, Utc};

/// An expiry field extracted from raw WHOIS output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    /// The parsed expiry instant, in UTC
    pub expires_at: DateTime<Utc>,
    /// The field value exactly as it appeared in the output
    pub expires_raw: String,
}

/// The classified outcome of one WHOIS lookup.
///
/// `expires_at` is carried if and only if the outcome is `Ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoisOutcome {
    /// The query succeeded and an expiry timestamp was parsed
    Ok {
        /// Parsed expiry instant
        expires_at: DateTime<Utc>,
        /// The expiry field as it appeared in the output
        expires_raw: String,
        /// Trimmed lines of the raw query output
        raw_lines: Vec<String>,
    },
    /// The query succeeded but the output carried no parseable expiry field
    NoExpires {
        /// Trimmed lines of the raw query output
        raw_lines: Vec<String>,
    },
    /// The registry reports the domain as unregistered
    NotFound {
        /// The registry's response line
        message: String,
    },
    /// Transport failure, timeout, or an expiry value that would not parse
    Failed {
        /// What went wrong
        message: String,
    },
}

impl WhoisOutcome {
    /// Status label used in persisted tables and logs.
    pub fn label(&self) -> &'static str {
        match self {
            WhoisOutcome::Ok { .. } => "OK",
            WhoisOutcome::NoExpires { .. } => "NO_EXPIRES",
            WhoisOutcome::NotFound { .. } => "NOT_FOUND",
            WhoisOutcome::Failed { .. } => "FAILED",
        }
    }
}

/// One verdict per queried host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoisVerdict {
    /// The hostname that was queried
    pub host: String,
    /// Its classified outcome
    pub outcome: WhoisOutcome,
}
