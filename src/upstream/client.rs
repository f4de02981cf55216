use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::UpstreamConfig;
use crate::errors::UpstreamError;

/// HTTP client for the upstream number provider.
///
/// Every fetch is bounded by the configured timeout; there are no retries.
/// The window lock is never involved here, callers fetch first and lock
/// afterwards.
#[derive(Debug, Clone)]
pub struct NumberClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NumberClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build upstream HTTP client")?;

        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid upstream base URL: {}", config.base_url))?;

        Ok(Self { http, base_url })
    }

    /// Fetch the batch of numbers for an upstream resource name.
    ///
    /// The upstream contract is a JSON object with a `numbers` array; a
    /// missing or wrong-typed `numbers` field yields an empty batch rather
    /// than an error. Timeouts, connection failures, non-2xx statuses and
    /// undecodable bodies are errors for the caller to absorb.
    pub async fn fetch_numbers(&self, resource: &str) -> Result<Vec<i64>, UpstreamError> {
        let url = self.resource_url(resource);
        debug!(%url, "fetching numbers from upstream");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }

        let payload: Value = response.json().await?;
        Ok(extract_numbers(&payload))
    }

    fn resource_url(&self, resource: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().unwrap();
            segments.pop_if_empty().push(resource);
        }
        url
    }
}

/// Pull the integer batch out of an upstream payload, defaulting to empty
/// when the `numbers` field is missing or not an array. Non-integer entries
/// within the array are skipped.
fn extract_numbers(payload: &Value) -> Vec<i64> {
    payload
        .get("numbers")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}
