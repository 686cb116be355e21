//! The "not expired" ledger.
//!
//! Hosts confirmed to expire in the future are persisted across runs so they
//! are not re-queried. The ledger is a cache whose invalidation condition is
//! domain-specific: each entry carries its own expiry instant and becomes
//! stale the moment that instant passes, not after a fixed TTL. Filtering is
//! a pure function over in-memory data; loading and saving live in the
//! storage module.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::debug;

/// One persisted record of a host whose registration was confirmed, as of
/// some past run, to expire in the future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotExpiredEntry {
    /// The hostname
    pub host: String,
    /// Verdict label recorded at the time ("OK" for parsed-expiry entries)
    pub status: String,
    /// The recorded expiry instant; entries without one are never retained
    pub expires_at: Option<DateTime<Utc>>,
    /// The expiry field as it appeared in the WHOIS output
    pub expires_raw: String,
    /// Encoded raw WHOIS output lines
    pub raw_lines: String,
}

/// Splits candidate hosts into those needing a live WHOIS query and the
/// ledger entries worth carrying forward.
///
/// The exclusion set starts from the operator exclude list; every ledger
/// entry whose `expires_at` is still in the future relative to `now` adds its
/// host and is retained unchanged. Everything else ages out: a host whose
/// recorded expiry has passed is re-queried and its stale entry dropped.
///
/// Eligible hosts come back in candidate input order. The function is pure
/// and idempotent for a fixed `now`.
pub fn filter_hosts(
    candidates: &[String],
    exclude: &HashSet<String>,
    ledger: &[NotExpiredEntry],
    now: DateTime<Utc>,
) -> (Vec<String>, Vec<NotExpiredEntry>) {
    let mut excluded: HashSet<&str> = exclude.iter().map(String::as_str).collect();
    let mut retained = Vec::new();

    for entry in ledger {
        match entry.expires_at {
            Some(expires_at) if expires_at > now => {
                excluded.insert(entry.host.as_str());
                retained.push(entry.clone());
            }
            Some(expires_at) => {
                debug!(
                    "ledger entry for '{}' expired at {}, host eligible for re-query",
                    entry.host, expires_at
                );
            }
            None => {
                debug!(
                    "ledger entry for '{}' has no parseable expiry, dropping",
                    entry.host
                );
            }
        }
    }

    let eligible = candidates
        .iter()
        .filter(|host| !host.is_empty() && !excluded.contains(host.as_str()))
        .cloned()
        .collect();

    (eligible, retained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(host: &str, expires_at: Option<DateTime<Utc>>) -> NotExpiredEntry {
        NotExpiredEntry {
            host: host.to_string(),
            status: "OK".to_string(),
            expires_at,
            expires_raw: expires_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
            raw_lines: String::new(),
        }
    }

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_future_entry_excludes_and_is_retained() {
        let now = Utc::now();
        let ledger = vec![entry("held.example", Some(now + Duration::days(30)))];
        let (eligible, retained) = filter_hosts(
            &hosts(&["held.example", "fresh.example"]),
            &HashSet::new(),
            &ledger,
            now,
        );
        assert_eq!(eligible, hosts(&["fresh.example"]));
        assert_eq!(retained, ledger);
    }

    #[test]
    fn test_past_entry_is_requeried_and_dropped() {
        let now = Utc::now();
        let ledger = vec![entry("lapsed.example", Some(now - Duration::days(1)))];
        let (eligible, retained) = filter_hosts(
            &hosts(&["lapsed.example"]),
            &HashSet::new(),
            &ledger,
            now,
        );
        assert_eq!(eligible, hosts(&["lapsed.example"]));
        assert!(retained.is_empty());
    }

    #[test]
    fn test_exact_now_is_stale() {
        // expires_at <= now means stale: only strictly-future entries hold
        let now = Utc::now();
        let ledger = vec![entry("edge.example", Some(now))];
        let (eligible, retained) =
            filter_hosts(&hosts(&["edge.example"]), &HashSet::new(), &ledger, now);
        assert_eq!(eligible, hosts(&["edge.example"]));
        assert!(retained.is_empty());
    }

    #[test]
    fn test_exclude_list_always_wins() {
        let now = Utc::now();
        let exclude: HashSet<String> = ["banned.example".to_string()].into();
        let (eligible, _) = filter_hosts(
            &hosts(&["banned.example", "ok.example"]),
            &exclude,
            &[],
            now,
        );
        assert_eq!(eligible, hosts(&["ok.example"]));
    }

    #[test]
    fn test_entry_without_expiry_is_not_retained() {
        let now = Utc::now();
        let ledger = vec![entry("odd.example", None)];
        let (eligible, retained) =
            filter_hosts(&hosts(&["odd.example"]), &HashSet::new(), &ledger, now);
        assert_eq!(eligible, hosts(&["odd.example"]));
        assert!(retained.is_empty());
    }

    #[test]
    fn test_membership_iff_property() {
        let now = Utc::now();
        let exclude: HashSet<String> = ["x.example".to_string()].into();
        let ledger = vec![
            entry("future.example", Some(now + Duration::days(10))),
            entry("past.example", Some(now - Duration::hours(1))),
        ];
        let candidates = hosts(&["x.example", "future.example", "past.example", "new.example"]);
        let (eligible, _) = filter_hosts(&candidates, &exclude, &ledger, now);

        for host in &candidates {
            let in_exclude = exclude.contains(host);
            let future_entry = ledger
                .iter()
                .any(|e| &e.host == host && e.expires_at.map(|d| d > now).unwrap_or(false));
            let expected = !in_exclude && !future_entry;
            assert_eq!(eligible.contains(host), expected, "host: {host}");
        }
    }

    #[test]
    fn test_idempotence_for_fixed_now() {
        let now = Utc::now();
        let exclude: HashSet<String> = ["x.example".to_string()].into();
        let ledger = vec![
            entry("a.example", Some(now + Duration::days(5))),
            entry("b.example", Some(now - Duration::days(5))),
        ];
        let candidates = hosts(&["a.example", "b.example", "c.example", "x.example"]);

        let first = filter_hosts(&candidates, &exclude, &ledger, now);
        let second = filter_hosts(&candidates, &exclude, &ledger, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_eligible_preserves_candidate_order() {
        let now = Utc::now();
        let candidates = hosts(&["c.example", "a.example", "b.example"]);
        let (eligible, _) = filter_hosts(&candidates, &HashSet::new(), &[], now);
        assert_eq!(eligible, candidates);
    }
}
