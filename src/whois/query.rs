//! Raw WHOIS transport (RFC 3912).
//!
//! A WHOIS query is a single line written to port 43 followed by reading the
//! connection to EOF. The registry for a TLD is discovered through a
//! bootstrap server (`whois.iana.org` by default), whose record carries a
//! `refer:` line naming the authoritative server. If no referral is present
//! the bootstrap response itself is returned. Server names may carry an
//! explicit `:port`; port 43 is assumed otherwise.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// WHOIS service port (RFC 3912), used when a server name has no port.
const WHOIS_PORT: u16 = 43;

/// Performs one raw WHOIS exchange against a specific server.
///
/// The whole exchange (connect, write, read to EOF) runs under the given
/// timeout.
///
/// # Errors
///
/// Returns an error on connect failure, I/O failure, or timeout.
pub(crate) async fn query_server(
    server: &str,
    query: &str,
    query_timeout: Duration,
) -> Result<String> {
    let addr = server_addr(server);
    let exchange = async {
        let mut stream = TcpStream::connect(&addr)
            .await
            .with_context(|| format!("failed to connect to whois server '{addr}'"))?;

        stream
            .write_all(format!("{query}\r\n").as_bytes())
            .await
            .with_context(|| format!("failed to send query to '{addr}'"))?;

        let mut raw = Vec::new();
        stream
            .read_to_end(&mut raw)
            .await
            .with_context(|| format!("failed to read response from '{addr}'"))?;

        // Registries are not reliably UTF-8; replace rather than fail
        Ok(String::from_utf8_lossy(&raw).into_owned())
    };

    timeout(query_timeout, exchange)
        .await
        .map_err(|_| anyhow::anyhow!("whois query to '{addr}' timed out"))?
}

/// Resolves the authoritative server for a host's TLD and queries it.
///
/// Queries the bootstrap server first; when its record carries a `refer:`
/// line the referred server is asked for the full record. Both legs share one
/// `query_timeout` budget, so a slow bootstrap leaves only the remainder for
/// the referral.
pub(crate) async fn query_domain(
    host: &str,
    bootstrap_server: &str,
    query_timeout: Duration,
) -> Result<String> {
    let deadline = Instant::now() + query_timeout;
    let bootstrap = query_server(bootstrap_server, host, query_timeout).await?;

    match parse_referral(&bootstrap) {
        Some(server) => {
            let remaining = deadline.saturating_duration_since(Instant::now());
            query_server(&server, host, remaining).await
        }
        None => Ok(bootstrap),
    }
}

/// Appends the default WHOIS port unless the server name already has one.
fn server_addr(server: &str) -> String {
    if server.contains(':') {
        server.to_string()
    } else {
        format!("{server}:{WHOIS_PORT}")
    }
}

/// Pulls the `refer:` value out of a bootstrap response, if present.
fn parse_referral(bootstrap: &str) -> Option<String> {
    for line in bootstrap.lines() {
        let line = line.trim();
        if let Some(value) = line
            .strip_prefix("refer:")
            .or_else(|| line.strip_prefix("whois:"))
        {
            let server = value.trim();
            if !server.is_empty() {
                return Some(server.to_string());
            }
        }
    }
    None
}
