//! HTTP client initialization.
//!
//! The resolution engine must observe redirects rather than follow them, so
//! the client is built with redirect following disabled.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the shared HTTP client for redirect resolution.
///
/// Creates a `reqwest::Client` configured with:
/// - Redirect following disabled (the engine classifies the redirect itself)
/// - Connect and total timeouts from the configuration
/// - User-Agent header from the configuration
///
/// # Arguments
///
/// * `config` - Application configuration containing user-agent and timeout settings
///
/// # Returns
///
/// A configured HTTP client with redirects disabled.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(config.fetch_timeout_seconds))
        .timeout(Duration::from_secs(config.fetch_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_defaults() {
        let config = Config::default();
        assert!(init_redirect_client(&config).is_ok());
    }
}
