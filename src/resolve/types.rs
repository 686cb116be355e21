//! Resolution data structures.

use regex::Regex;

use crate::error_handling::InitializationError;

/// One candidate link harvested from a search results page.
///
/// Produced by the external scraping step; this crate only deduplicates and
/// resolves them. `origin_query` is the search query the link was found
/// under and drives the in-url/in-domain filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// The raw redirector URL to resolve
    pub url: String,
    /// Search query this link was harvested under
    pub origin_query: String,
    /// Pagination token of the results page the link came from
    pub page_token: String,
}

/// Filter configuration for redirect classification.
///
/// Reject patterns are compiled once at startup and passed in explicitly; the
/// classifier itself holds no global state.
#[derive(Debug)]
pub struct ResolveFilters {
    /// Patterns tested against the redirect target; a match rejects the link
    pub reject_patterns: Vec<Regex>,
    /// Require the origin query to appear in the full target URL
    pub inurl_filter: bool,
    /// Require the origin query to appear in the target host
    pub indomain_filter: bool,
}

impl ResolveFilters {
    /// Compiles the configured reject patterns into a filter set.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::RejectPatternError` for the first pattern
    /// that fails to compile. A malformed pattern is a configuration error and
    /// fatal at startup.
    pub fn compile(
        patterns: &[String],
        inurl_filter: bool,
        indomain_filter: bool,
    ) -> Result<Self, InitializationError> {
        let mut reject_patterns = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| {
                InitializationError::RejectPatternError {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                }
            })?;
            reject_patterns.push(regex);
        }
        Ok(Self {
            reject_patterns,
            inurl_filter,
            indomain_filter,
        })
    }
}

/// What came back from one resolution request, before classification.
///
/// Transport failures are data here, not errors: the classifier turns them
/// into `Failed` verdicts.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The server answered; status code plus the Location header, if any
    Response {
        /// HTTP status code
        status: u16,
        /// Value of the Location header, if present
        location: Option<String>,
    },
    /// The request never produced a response
    TransportError {
        /// Error kind and message, concatenated
        message: String,
    },
}

/// The classified outcome of resolving one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// A redirect to a location that passed all filters
    Ok {
        /// Host component of the redirect target
        host: String,
        /// Full redirect target URL
        location: String,
    },
    /// Transport failure or a non-redirect status
    Failed {
        /// What went wrong
        message: String,
    },
    /// A redirect existed but a reject pattern or filter disqualified it
    Rejected {
        /// Which rule disqualified it
        reason: String,
    },
    /// Reserved: a redirect with no resolvable location. Part of the output
    /// taxonomy (it gets its own table) but no classification rule currently
    /// produces it.
    Empty {
        /// Diagnostic message
        message: String,
    },
    /// Reserved: a status outside the classified set. Kept for forward
    /// compatibility; no classification rule currently produces it.
    Other {
        /// HTTP status code
        status: u16,
        /// Diagnostic message
        detail: String,
    },
}

/// Exactly one verdict is emitted per distinct input URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionVerdict {
    /// The URL that was resolved
    pub request_url: String,
    /// Its classified outcome
    pub outcome: ResolutionOutcome,
}
