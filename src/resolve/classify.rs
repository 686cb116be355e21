//! Redirect classification.
//!
//! A pure decision function: given the transport outcome for one link and the
//! active filter configuration, produce a verdict. No I/O and no hidden
//! state, so every branch is unit-testable.

use url::Url;

use super::types::{FetchOutcome, ResolutionOutcome, ResolveFilters};

/// Classifies one resolution outcome.
///
/// Rules are applied in order, short-circuiting on the first that matches:
///
/// 1. Transport error: `Failed`.
/// 2. HTTP 200: `Failed`; the redirector answering with its own page means
///    the link is dead, not that the target was reached.
/// 3. Any status other than 301/302: `Failed`.
/// 4. Missing or empty `Location` header: `Rejected`.
/// 5. `Location` matching a reject pattern: `Rejected`.
/// 6. `indomain_filter` set and the origin query not in the target host:
///    `Rejected`.
/// 7. `inurl_filter` set and the origin query not in the full target URL:
///    `Rejected`.
/// 8. Otherwise `Ok { host, location }`.
///
/// Substring checks are case-insensitive. An unset or empty origin query
/// fails the filter checks when the corresponding filter is enabled.
pub fn classify(
    outcome: &FetchOutcome,
    origin_query: &str,
    filters: &ResolveFilters,
) -> ResolutionOutcome {
    let (status, location) = match outcome {
        FetchOutcome::TransportError { message } => {
            return ResolutionOutcome::Failed {
                message: message.clone(),
            };
        }
        FetchOutcome::Response { status, location } => (*status, location.as_deref()),
    };

    if status == 200 {
        return ResolutionOutcome::Failed {
            message: format!("status: {status}, not a redirect"),
        };
    }

    if status != 301 && status != 302 {
        return ResolutionOutcome::Failed {
            message: format!("status: {status}, bad status"),
        };
    }

    let location = match location {
        Some(loc) if !loc.is_empty() => loc,
        Some(_) => {
            return ResolutionOutcome::Rejected {
                reason: format!("status: {status}, empty location"),
            };
        }
        None => {
            return ResolutionOutcome::Rejected {
                reason: format!("status: {status}, no location"),
            };
        }
    };

    for pattern in &filters.reject_patterns {
        if pattern.is_match(location) {
            return ResolutionOutcome::Rejected {
                reason: format!("status: {status}, rejected location: '{location}'"),
            };
        }
    }

    let host = match Url::parse(location).ok().and_then(|u| {
        u.host_str().map(|h| h.to_string())
    }) {
        Some(host) => host,
        None => {
            return ResolutionOutcome::Rejected {
                reason: format!("status: {status}, unparseable location: '{location}'"),
            };
        }
    };

    let query_lower = origin_query.to_lowercase();

    if filters.indomain_filter
        && (query_lower.is_empty() || !host.to_lowercase().contains(&query_lower))
    {
        return ResolutionOutcome::Rejected {
            reason: format!(
                "status: {status}, `{origin_query}` is not in domain: '{host}', location: '{location}'"
            ),
        };
    }

    if filters.inurl_filter
        && (query_lower.is_empty() || !location.to_lowercase().contains(&query_lower))
    {
        return ResolutionOutcome::Rejected {
            reason: format!("status: {status}, `{origin_query}` is not in url: '{location}'"),
        };
    }

    ResolutionOutcome::Ok {
        host,
        location: location.to_string(),
    }
}
