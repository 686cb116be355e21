//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources the
//! pipeline needs:
//! - The HTTP client used for redirect resolution (redirects disabled)
//! - The logger
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::init_redirect_client;
pub use logger::init_logger_with;
