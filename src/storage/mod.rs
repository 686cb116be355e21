//! On-disk persistence.
//!
//! All tables are delimited text with every field quoted, one record per
//! line, matching what downstream tooling already consumes. Resolution and
//! WHOIS verdicts are split into one table per outcome; the "not expired"
//! ledger is rewritten wholesale at the end of a run (retained entries first,
//! then fresh ones). Reads happen once at run start, writes once at run end;
//! there is no mid-run appending.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use log::{debug, info};

use crate::config::{
    LINKS_EMPTY_FILE, LINKS_FAILED_FILE, LINKS_OTHER_FILE, LINKS_REJECTED_FILE,
    LINKS_SUCCESS_FILE, WHOIS_EXPIRED_FILE, WHOIS_FAILED_FILE, WHOIS_NOT_FOUND_FILE,
    WHOIS_NO_EXPIRES_FILE,
};
use crate::ledger::NotExpiredEntry;
use crate::resolve::{CandidateLink, ResolutionOutcome, ResolutionVerdict};
use crate::whois::{WhoisOutcome, WhoisVerdict};

/// Separator used to pack raw WHOIS output lines into one quoted CSV field.
const RAW_LINES_SEPARATOR: &str = "\n";

/// Counts of interest from persisting a run's WHOIS verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhoisWriteSummary {
    /// Hosts whose recorded expiry is already in the past
    pub expired: usize,
    /// Fresh not-expired entries appended to the ledger this run
    pub fresh_not_expired: usize,
}

fn csv_writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    Ok(WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(file))
}

/// Loads candidate links from the scraper's CSV output.
///
/// Rows are `url[, origin_query[, page_token]]`; short rows are tolerated and
/// missing fields default to empty. Fields are trimmed.
pub fn load_links(path: &Path) -> Result<Vec<CandidateLink>> {
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open links file '{}'", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut links = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| {
            format!("failed to parse links file '{}'", path.display())
        })?;
        let url = record.get(0).unwrap_or_default().trim().to_string();
        if url.is_empty() {
            continue;
        }
        links.push(CandidateLink {
            url,
            origin_query: record.get(1).unwrap_or_default().trim().to_string(),
            page_token: record.get(2).unwrap_or_default().trim().to_string(),
        });
    }
    debug!("loaded {} candidate links from '{}'", links.len(), path.display());
    Ok(links)
}

/// Writes the per-outcome resolution tables.
///
/// Every table is (re)created even when empty so a run's output directory
/// always carries the full set.
pub fn write_link_verdicts(dir: &Path, verdicts: &[ResolutionVerdict]) -> Result<()> {
    let mut success = csv_writer(&dir.join(LINKS_SUCCESS_FILE))?;
    let mut failed = csv_writer(&dir.join(LINKS_FAILED_FILE))?;
    let mut empty = csv_writer(&dir.join(LINKS_EMPTY_FILE))?;
    let mut rejected = csv_writer(&dir.join(LINKS_REJECTED_FILE))?;
    let mut other = csv_writer(&dir.join(LINKS_OTHER_FILE))?;

    for verdict in verdicts {
        let url = verdict.request_url.as_str();
        match &verdict.outcome {
            ResolutionOutcome::Ok { host, location } => {
                success.write_record([url, host.as_str(), location.as_str()])?;
            }
            ResolutionOutcome::Failed { message } => {
                failed.write_record([url, message.as_str()])?;
            }
            ResolutionOutcome::Empty { message } => {
                empty.write_record([url, message.as_str()])?;
            }
            ResolutionOutcome::Rejected { reason } => {
                rejected.write_record([url, reason.as_str()])?;
            }
            ResolutionOutcome::Other { status, detail } => {
                let status = status.to_string();
                other.write_record([url, status.as_str(), detail.as_str()])?;
            }
        }
    }

    for writer in [&mut success, &mut failed, &mut empty, &mut rejected, &mut other] {
        writer.flush()?;
    }
    Ok(())
}

/// Writes the unique target hosts, one per line.
pub fn write_hosts(path: &Path, hosts: &[String]) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    for host in hosts {
        writeln!(file, "{host}")?;
    }
    Ok(())
}

/// Loads the operator exclude list; a missing file is an empty list.
pub fn load_exclude_hosts(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read exclude list '{}'", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Loads the persisted ledger; a missing file is an empty ledger.
///
/// Rows are `host, status[, expires_iso[, expires_raw[, raw_lines]]]`. An
/// unparseable or absent expiry column yields `expires_at: None`, which the
/// ledger filter treats as not worth retaining.
pub fn load_ledger(path: &Path) -> Result<Vec<NotExpiredEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open ledger '{}'", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut entries = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to parse ledger '{}'", path.display()))?;
        let host = record.get(0).unwrap_or_default().trim().to_string();
        if host.is_empty() {
            continue;
        }
        let expires_at = record
            .get(2)
            .map(str::trim)
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|dt| dt.with_timezone(&Utc));
        entries.push(NotExpiredEntry {
            host,
            status: record.get(1).unwrap_or_default().trim().to_string(),
            expires_at,
            expires_raw: record.get(3).unwrap_or_default().to_string(),
            raw_lines: record.get(4).unwrap_or_default().to_string(),
        });
    }
    debug!("loaded {} ledger entries from '{}'", entries.len(), path.display());
    Ok(entries)
}

/// Writes the per-outcome WHOIS tables and rewrites the ledger.
///
/// A verdict lands in exactly one place:
/// - `Ok` with `expires_at <= now` → the expired table
/// - `Ok` with `expires_at > now` → a fresh ledger entry
/// - `NotFound`, `Failed`, `NoExpires` → their own tables
///
/// The ledger is written with the retained entries from the previous run
/// first, then this run's fresh not-expired results.
pub fn write_whois_results(
    dir: &Path,
    ledger_path: &Path,
    verdicts: &[WhoisVerdict],
    retained: &[NotExpiredEntry],
    now: DateTime<Utc>,
) -> Result<WhoisWriteSummary> {
    let mut expired = csv_writer(&dir.join(WHOIS_EXPIRED_FILE))?;
    let mut not_found = csv_writer(&dir.join(WHOIS_NOT_FOUND_FILE))?;
    let mut failed = csv_writer(&dir.join(WHOIS_FAILED_FILE))?;
    let mut no_expires = csv_writer(&dir.join(WHOIS_NO_EXPIRES_FILE))?;
    let mut ledger = csv_writer(ledger_path)?;

    let mut summary = WhoisWriteSummary::default();

    for entry in retained {
        let expires_iso = entry
            .expires_at
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        ledger.write_record([
            entry.host.as_str(),
            entry.status.as_str(),
            expires_iso.as_str(),
            entry.expires_raw.as_str(),
            entry.raw_lines.as_str(),
        ])?;
    }

    for verdict in verdicts {
        let host = verdict.host.as_str();
        match &verdict.outcome {
            WhoisOutcome::Ok {
                expires_at,
                expires_raw,
                raw_lines,
            } => {
                let expires_iso = expires_at.to_rfc3339();
                let encoded = raw_lines.join(RAW_LINES_SEPARATOR);
                if *expires_at <= now {
                    info!("expired domain: {host} (expired {expires_iso})");
                    expired.write_record([
                        host,
                        expires_iso.as_str(),
                        expires_raw.as_str(),
                        encoded.as_str(),
                    ])?;
                    summary.expired += 1;
                } else {
                    ledger.write_record([
                        host,
                        verdict.outcome.label(),
                        expires_iso.as_str(),
                        expires_raw.as_str(),
                        encoded.as_str(),
                    ])?;
                    summary.fresh_not_expired += 1;
                }
            }
            WhoisOutcome::NotFound { message } => {
                not_found.write_record([host, message.as_str()])?;
            }
            WhoisOutcome::Failed { message } => {
                failed.write_record([host, message.as_str()])?;
            }
            WhoisOutcome::NoExpires { raw_lines } => {
                let encoded = raw_lines.join(RAW_LINES_SEPARATOR);
                no_expires.write_record([host, verdict.outcome.label(), "", encoded.as_str()])?;
            }
        }
    }

    for writer in [&mut expired, &mut not_found, &mut failed, &mut no_expires, &mut ledger] {
        writer.flush()?;
    }
    Ok(summary)
}
