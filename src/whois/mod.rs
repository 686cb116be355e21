//! WHOIS lifecycle engine.
//!
//! Turns a hostname into an expiry-dated verdict: query the registry, detect
//! "no such domain" responses, and run the expiry extractor over everything
//! else. Hosts are processed in fixed-size concurrent batches with the same
//! discipline as the link resolution engine, under an independently
//! configured concurrency and timeout.

mod expiry;
mod query;
mod types;

#[cfg(test)]
mod tests;

pub use expiry::ExpiryExtractor;
pub use types::{Expiry, WhoisOutcome, WhoisVerdict};

use std::time::Duration;

use futures::future::join_all;
use log::debug;

/// Leading-line markers registries use to report an unregistered domain.
///
/// Only the first non-empty, non-comment line of the response is checked:
/// phrases like "No matching record" also show up deep inside otherwise-valid
/// records (referral sections, disclaimers), and matching anywhere would
/// misfile registered domains as NOT_FOUND.
const NOT_FOUND_MARKERS: &[&str] = &[
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "domain not found",
    "the queried object does not exist",
];

/// Not-found phrasings that do not lead the response but that only ever
/// appear as a whole line of their own, so matching them anywhere is safe.
/// DENIC answers `Status: free` under a `Domain:` line; IANA reports zero
/// objects after its comment header when a TLD has no referral record.
const NOT_FOUND_LINE_MARKERS: &[&str] = &["status: free", "this query returned 0 objects."];

/// Looks up every host, `concurrency` at a time, yielding one verdict each.
///
/// `bootstrap_server` is the referral bootstrap (normally `whois.iana.org`);
/// an explicit `:port` is honored.
pub async fn lookup_hosts(
    hosts: &[String],
    extractor: &ExpiryExtractor,
    bootstrap_server: &str,
    concurrency: usize,
    query_timeout: Duration,
) -> Vec<WhoisVerdict> {
    let batch_size = concurrency.max(1);
    let mut verdicts = Vec::with_capacity(hosts.len());

    for batch in hosts.chunks(batch_size) {
        let batch_verdicts = join_all(
            batch
                .iter()
                .map(|host| lookup_host(host, extractor, bootstrap_server, query_timeout)),
        )
        .await;
        verdicts.extend(batch_verdicts);
    }

    verdicts
}

/// Queries one host and classifies the result.
///
/// Transport failures, registry not-found responses, a missing expiry field,
/// and an unparseable expiry value each map to their own outcome; nothing
/// here returns `Err`.
pub async fn lookup_host(
    host: &str,
    extractor: &ExpiryExtractor,
    bootstrap_server: &str,
    query_timeout: Duration,
) -> WhoisVerdict {
    debug!("checking whois for {host}");

    let raw_output = match query::query_domain(host, bootstrap_server, query_timeout).await {
        Ok(raw) => raw,
        Err(e) => {
            debug!("whois failed for '{host}': {e:#}");
            return WhoisVerdict {
                host: host.to_string(),
                outcome: WhoisOutcome::Failed {
                    message: format!("{e:#}"),
                },
            };
        }
    };

    if let Some(message) = registry_not_found(&raw_output) {
        debug!("whois not found for '{host}': {message}");
        return WhoisVerdict {
            host: host.to_string(),
            outcome: WhoisOutcome::NotFound { message },
        };
    }

    classify_output(host, &raw_output, extractor)
}

/// Runs the extractor over a successful query's output.
fn classify_output(host: &str, raw_output: &str, extractor: &ExpiryExtractor) -> WhoisVerdict {
    let raw_lines: Vec<String> = raw_output.lines().map(|l| l.trim().to_string()).collect();

    let outcome = match extractor.extract(raw_output) {
        Ok(Some(expiry)) => {
            debug!(
                "whois for '{}': expires {} ('{}')",
                host, expiry.expires_at, expiry.expires_raw
            );
            WhoisOutcome::Ok {
                expires_at: expiry.expires_at,
                expires_raw: expiry.expires_raw,
                raw_lines,
            }
        }
        Ok(None) => {
            debug!("no expiry field in whois for '{host}'");
            WhoisOutcome::NoExpires { raw_lines }
        }
        Err(e) => {
            debug!("bad expiry value in whois for '{host}': {e:#}");
            WhoisOutcome::Failed {
                message: format!("{e:#}"),
            }
        }
    };

    WhoisVerdict {
        host: host.to_string(),
        outcome,
    }
}

/// Checks whether the registry's answer reports an unregistered domain.
fn registry_not_found(raw_output: &str) -> Option<String> {
    let lead = raw_output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('%'))?;
    let lowered = lead.to_lowercase();
    if NOT_FOUND_MARKERS
        .iter()
        .any(|marker| lowered.starts_with(marker))
    {
        return Some(lead.to_string());
    }

    raw_output
        .lines()
        .map(str::trim)
        .find(|l| NOT_FOUND_LINE_MARKERS.contains(&l.to_lowercase().as_str()))
        .map(str::to_string)
}
