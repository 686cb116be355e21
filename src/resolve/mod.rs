//! Link resolution engine.
//!
//! Drives one request per candidate link through a client with redirects
//! disabled, in fixed-size concurrent batches, and classifies each response.
//! A batch completes in full before its verdicts are emitted and the next
//! batch starts; a single slow request therefore gates its batch, but results
//! are never interleaved across batches and every input URL gets exactly one
//! verdict.

mod classify;
mod types;


pub use classify::classify;
pub use types::{CandidateLink, FetchOutcome, ResolutionOutcome, ResolutionVerdict, ResolveFilters};

use futures::future::join_all;
use log::debug;

/// Drops repeated URLs, keeping the first occurrence in input order.
///
/// The same link routinely shows up under several search queries and pages;
/// resolving it once is enough.
pub fn dedup_links(links: Vec<CandidateLink>) -> Vec<CandidateLink> {
    let mut seen = std::collections::HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}

/// Resolves all links, `concurrency` at a time, yielding one verdict per link.
///
/// Failure of any single request surfaces as a `Failed` verdict for that URL
/// only; it never aborts the batch or the engine.
pub async fn resolve_links(
    client: &reqwest::Client,
    links: &[CandidateLink],
    filters: &ResolveFilters,
    concurrency: usize,
) -> Vec<ResolutionVerdict> {
    let batch_size = concurrency.max(1);
    let mut verdicts = Vec::with_capacity(links.len());

    for batch in links.chunks(batch_size) {
        let outcomes = join_all(batch.iter().map(|link| fetch_outcome(client, &link.url))).await;

        for (link, outcome) in batch.iter().zip(outcomes) {
            let classified = classify(&outcome, &link.origin_query, filters);
            match &classified {
                ResolutionOutcome::Ok { host, location } => {
                    debug!(
                        "redirect URL: '{}', host: '{}', location: '{}'",
                        link.url, host, location
                    );
                }
                ResolutionOutcome::Failed { message } => {
                    debug!("failed URL: '{}', {}", link.url, message);
                }
                ResolutionOutcome::Rejected { reason } => {
                    debug!("rejected URL: '{}', {}", link.url, reason);
                }
                ResolutionOutcome::Empty { message } => {
                    debug!("empty URL: '{}', {}", link.url, message);
                }
                ResolutionOutcome::Other { status, detail } => {
                    debug!("other URL: '{}', status: {}, {}", link.url, status, detail);
                }
            }
            verdicts.push(ResolutionVerdict {
                request_url: link.url.clone(),
                outcome: classified,
            });
        }
    }

    verdicts
}

/// Issues one GET without following redirects and captures what came back.
async fn fetch_outcome(client: &reqwest::Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string());
            FetchOutcome::Response { status, location }
        }
        Err(e) => FetchOutcome::TransportError {
            message: transport_error_message(&e),
        },
    }
}

/// Formats a transport failure as "<kind>: <message>".
fn transport_error_message(e: &reqwest::Error) -> String {
    let kind = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_request() {
        "request"
    } else {
        "transport"
    };
    format!("{kind}: {e}")
}

/// Collects the unique target hosts from successful verdicts.
///
/// First-occurrence order is preserved so the output is deterministic for a
/// given verdict sequence.
pub fn extract_target_hosts(verdicts: &[ResolutionVerdict]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut hosts = Vec::new();
    for verdict in verdicts {
        if let ResolutionOutcome::Ok { host, .. } = &verdict.outcome {
            if seen.insert(host.clone()) {
                hosts.push(host.clone());
            }
        }
    }
    hosts
}
