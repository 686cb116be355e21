// WHOIS engine tests: expiry extraction, not-found detection, output
// classification.

use super::expiry::parse_date_string;
use super::*;
use chrono::{TimeZone, Utc};

#[test]
fn test_extract_registry_expiry_date() {
    let extractor = ExpiryExtractor::new();
    let raw = "\
Domain Name: EXAMPLE.COM
Updated Date: 2024-08-14T07:01:44Z
Creation Date: 1995-08-14T04:00:00Z
Registry Expiry Date: 2025-01-01T00:00:00Z
Registrar: RESERVED-Internet Assigned Numbers Authority";

    let expiry = extractor.extract(raw).unwrap().unwrap();
    assert_eq!(
        expiry.expires_at,
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(expiry.expires_raw, "2025-01-01T00:00:00Z");
}

#[test]
fn test_extract_ignores_other_date_lines() {
    // Decoy date-like lines before and after must not win over the first
    // labeled expiry field
    let extractor = ExpiryExtractor::new();
    let raw = "\
Updated Date: 2030-12-31T23:59:59Z
Creation Date: 1999-06-01T00:00:00Z
Registry Expiry Date: 2025-01-01T00:00:00Z
Registrar Registration Expiration Date: 2099-01-01T00:00:00Z";

    let expiry = extractor.extract(raw).unwrap().unwrap();
    assert_eq!(
        expiry.expires_at,
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_extract_expiration_time_variant() {
    let extractor = ExpiryExtractor::new();
    let raw = "Expiration Time: 2026-03-12 08:30:00";
    let expiry = extractor.extract(raw).unwrap().unwrap();
    assert_eq!(
        expiry.expires_at,
        Utc.with_ymd_and_hms(2026, 3, 12, 8, 30, 0).unwrap()
    );
    assert_eq!(expiry.expires_raw, "2026-03-12 08:30:00");
}

#[test]
fn test_extract_no_field_returns_none() {
    let extractor = ExpiryExtractor::new();
    let raw = "Domain Status: active\nRegistrar: Example Registrar";
    assert!(extractor.extract(raw).unwrap().is_none());
}

#[test]
fn test_extract_bad_value_is_error_not_none() {
    // A labeled field with garbage is bad data, which must stay distinct
    // from no data
    let extractor = ExpiryExtractor::new();
    let raw = "Registry Expiry Date: pending-renewal";
    assert!(extractor.extract(raw).is_err());
}

#[test]
fn test_parse_date_string_formats() {
    assert_eq!(
        parse_date_string("2025-01-01T00:00:00Z").unwrap(),
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        parse_date_string("2025-06-15").unwrap(),
        Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()
    );
    assert_eq!(
        parse_date_string("15-Mar-2026").unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap()
    );
    assert!(parse_date_string("soon").is_none());
}

#[test]
fn test_not_found_marker_on_first_line() {
    let raw = "No match for \"UNREGISTERED-EXAMPLE.COM\".\n>>> Last update of whois database <<<";
    assert_eq!(
        registry_not_found(raw),
        Some("No match for \"UNREGISTERED-EXAMPLE.COM\".".to_string())
    );
}

#[test]
fn test_not_found_status_free_line() {
    // DENIC reports an unregistered domain below the Domain: line, not on
    // the lead line
    let raw = "Domain: unregistered-beispiel.de\nStatus: free";
    assert_eq!(registry_not_found(raw), Some("Status: free".to_string()));

    // A registered .de record must not match
    let registered = "Domain: beispiel.de\nStatus: connect\nChanged: 2024-01-01T00:00:00+01:00";
    assert_eq!(registry_not_found(registered), None);
}

#[test]
fn test_not_found_iana_zero_objects() {
    // A TLD with no referral record returns the bootstrap text as the
    // record, comment header first
    let raw = "\
% IANA WHOIS server
% for more information on IANA, visit http://www.iana.org

This query returned 0 objects.";
    assert_eq!(
        registry_not_found(raw),
        Some("This query returned 0 objects.".to_string())
    );
}

#[test]
fn test_not_found_lead_line_skips_comments() {
    let raw = "% IANA WHOIS server\n\nNo match for \"nosuch.example\".";
    assert_eq!(
        registry_not_found(raw),
        Some("No match for \"nosuch.example\".".to_string())
    );
}

#[test]
fn test_not_found_marker_must_lead_response() {
    // "No matching record" buried mid-record is not a registry not-found;
    // this output has no expiry line so it classifies as NO_EXPIRES
    let raw = "Domain Status: active\nNo matching record";
    assert_eq!(registry_not_found(raw), None);

    let extractor = ExpiryExtractor::new();
    let verdict = classify_output("example.com", raw, &extractor);
    assert!(matches!(verdict.outcome, WhoisOutcome::NoExpires { .. }));
}

#[test]
fn test_classify_output_ok_carries_raw_lines() {
    let extractor = ExpiryExtractor::new();
    let raw = "  Domain Name: EXAMPLE.ORG  \n  Registry Expiry Date: 2027-02-03T04:05:06Z  ";
    let verdict = classify_output("example.org", raw, &extractor);
    match verdict.outcome {
        WhoisOutcome::Ok {
            expires_at,
            expires_raw,
            raw_lines,
        } => {
            assert_eq!(
                expires_at,
                Utc.with_ymd_and_hms(2027, 2, 3, 4, 5, 6).unwrap()
            );
            assert_eq!(expires_raw, "2027-02-03T04:05:06Z");
            // Lines are trimmed on capture
            assert_eq!(raw_lines[0], "Domain Name: EXAMPLE.ORG");
        }
        other => panic!("expected Ok, got {other:?}"),
    }
}

#[test]
fn test_classify_output_bad_date_is_failed() {
    let extractor = ExpiryExtractor::new();
    let verdict = classify_output(
        "example.net",
        "Registry Expiry Date: not-a-date",
        &extractor,
    );
    assert!(matches!(verdict.outcome, WhoisOutcome::Failed { .. }));
}

#[test]
fn test_outcome_labels() {
    assert_eq!(
        WhoisOutcome::NoExpires { raw_lines: vec![] }.label(),
        "NO_EXPIRES"
    );
    assert_eq!(
        WhoisOutcome::NotFound {
            message: String::new()
        }
        .label(),
        "NOT_FOUND"
    );
    assert_eq!(
        WhoisOutcome::Failed {
            message: String::new()
        }
        .label(),
        "FAILED"
    );
}
