//! Prompt hub factory.
//!
//! Builds the hub client described by the application configuration. The API
//! key check happens here, so a missing credential is reported before any
//! remote call is attempted.

use crate::client::PromptHub;
use crate::providers::LangSmithClient;
use promptsync_core::{AppConfig, AppResult};
use std::sync::Arc;

/// Create the hub client for `config`.
///
/// # Errors
/// Returns a configuration error when `LANGSMITH_API_KEY` is unset, and a hub
/// error when the HTTP client cannot be built.
pub fn create_hub(config: &AppConfig) -> AppResult<Arc<dyn PromptHub>> {
    let api_key = config.require_api_key()?;

    let client = match config.timeout() {
        Some(timeout) => LangSmithClient::with_timeout(&config.endpoint, api_key, timeout)?,
        None => LangSmithClient::with_base_url(&config.endpoint, api_key),
    };

    tracing::debug!("Using LangSmith hub at {}", config.endpoint);
    Ok(Arc::new(client))
}
