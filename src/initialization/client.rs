//! HTTP client initialization.

use std::sync::Arc;

use crate::config::Config;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used by the HTTP session backend.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Per-request timeout from the configuration
/// - Default redirect following
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
