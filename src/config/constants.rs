//! Configuration constants.
//!
//! Defaults for concurrency, timeouts, and the on-disk table names the
//! pipeline reads and writes.

// Concurrency defaults
/// Link resolution batch size (requests issued per batch)
pub const DEFAULT_RESOLVE_CONCURRENCY: usize = 6;
/// WHOIS lookup batch size
pub const DEFAULT_WHOIS_CONCURRENCY: usize = 3;

// Network operation timeouts
/// Per-request connect/read timeout for link resolution, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
/// Per-host WHOIS query timeout in seconds
pub const DEFAULT_WHOIS_TIMEOUT_SECS: u64 = 10;

/// WHOIS bootstrap server queried for the authoritative registry per TLD.
/// A name without a port uses the standard WHOIS port 43.
pub const DEFAULT_WHOIS_SERVER: &str = "whois.iana.org";

/// Default User-Agent string for HTTP requests.
///
/// Search-engine redirectors answer plain clients fine, but a browser-like
/// User-Agent avoids the occasional 403 from intermediate CDNs. Users can
/// override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Default reject pattern: redirects that land back on the search engine's
/// own properties are dead ends, not targets.
pub const DEFAULT_REJECT_PATTERN: &str = r"//([^./]+\.)?baidu\.";

// Result tables written per run (resolution verdicts, split by outcome)
/// Accepted redirects: url, host, location
pub const LINKS_SUCCESS_FILE: &str = "links_success.csv";
/// Transport failures and non-redirect statuses: url, message
pub const LINKS_FAILED_FILE: &str = "links_failed.csv";
/// Reserved table for the EMPTY verdict slot: url, message
pub const LINKS_EMPTY_FILE: &str = "links_empty.csv";
/// Filtered-out redirects: url, reason
pub const LINKS_REJECTED_FILE: &str = "links_rejected.csv";
/// Reserved table for unclassified statuses: url, status, detail
pub const LINKS_OTHER_FILE: &str = "links_other.csv";

/// Unique target hosts extracted from successful resolutions, one per line
pub const TARGET_HOSTS_FILE: &str = "target_hosts.txt";

// WHOIS tables, split by verdict
/// Domains whose recorded expiry has passed: host, expiry ISO-8601, raw field, raw lines
pub const WHOIS_EXPIRED_FILE: &str = "whois_expired.csv";
/// Domains the registry reports as unregistered: host, message
pub const WHOIS_NOT_FOUND_FILE: &str = "whois_not_found.csv";
/// Failed lookups: host, message
pub const WHOIS_FAILED_FILE: &str = "whois_failed.csv";
/// Successful lookups with no parseable expiry field: host, status, raw field, raw lines
pub const WHOIS_NO_EXPIRES_FILE: &str = "whois_no_expires.csv";

/// The persistent "not expired" ledger, read at run start and rewritten at
/// run end. Entries invalidate on their own recorded expiry instant.
pub const WHOIS_NOT_EXPIRED_FILE: &str = "whois_not_expired.csv";

/// Operator-maintained exclude list (one hostname per line, read-only)
pub const WHOIS_EXCLUDE_FILE: &str = "whois_exclude.txt";
