//! Tests for candidate link input parsing and deduplication.

use std::io::Write;

use domain_expiry::resolve::dedup_links;
use domain_expiry::storage::load_links;
use tempfile::NamedTempFile;

fn links_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_rows() {
    let file = links_file(
        "\"https://a.example/link?url=X1\",\"widgets\",\"0000000010\"\n\
         \"https://a.example/link?url=X2\",\"widgets\",\"0000000020\"\n",
    );
    let links = load_links(file.path()).unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].url, "https://a.example/link?url=X1");
    assert_eq!(links[0].origin_query, "widgets");
    assert_eq!(links[0].page_token, "0000000010");
}

#[test]
fn test_load_short_rows_tolerated() {
    // The scraper sometimes emits url-only or url+query rows
    let file = links_file(
        "https://a.example/link?url=X1\n\
         \"https://a.example/link?url=X2\",\"gadgets\"\n",
    );
    let links = load_links(file.path()).unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].origin_query, "");
    assert_eq!(links[0].page_token, "");
    assert_eq!(links[1].origin_query, "gadgets");
    assert_eq!(links[1].page_token, "");
}

#[test]
fn test_load_trims_fields_and_skips_empty_urls() {
    let file = links_file(
        "\" https://a.example/link?url=X1 \",\" widgets \"\n\
         \"\",\"orphan\"\n",
    );
    let links = load_links(file.path()).unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://a.example/link?url=X1");
    assert_eq!(links[0].origin_query, "widgets");
}

#[test]
fn test_duplicate_urls_resolve_once() {
    // The same link under two queries must reach the resolution engine once
    let file = links_file(
        "\"https://a.example/link?url=X1\",\"widgets\",\"0\"\n\
         \"https://a.example/link?url=X1\",\"gadgets\",\"10\"\n",
    );
    let links = load_links(file.path()).unwrap();
    assert_eq!(links.len(), 2);

    let unique = dedup_links(links);
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].url, "https://a.example/link?url=X1");
    assert_eq!(unique[0].origin_query, "widgets");
}

#[test]
fn test_missing_links_file_is_an_error() {
    let result = load_links(std::path::Path::new("/nonexistent/links.csv"));
    assert!(result.is_err());
}
