//! HTTP client for the AwesomeAPI currency quotes service.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::{types::ExchangeQuote, CurrencyPair, Error};

/// Production base URL of the quotes API.
pub const DEFAULT_BASE_URL: &str = "https://economia.awesomeapi.com.br";

/// HTTP client for the AwesomeAPI `/json/last` endpoint.
///
/// Each call builds a fresh `reqwest::Client` bounded by the timeout the
/// caller passes in, so the timeout covers connect, headers and body.
pub struct Client {
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_api_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    async fn get_body(&self, path: &str, timeout: Duration) -> Result<String, Error> {
        let url = self.get_url(path)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                transport_error(&e)
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            transport_error(&e)
        })?;

        if status != reqwest::StatusCode::OK {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Fetches the latest quote for `pair`.
    ///
    /// `timeout` bounds the whole exchange. Only HTTP 200 is accepted.
    pub async fn get_last_quote(
        &self,
        pair: &CurrencyPair,
        timeout: Duration,
    ) -> Result<ExchangeQuote, Error> {
        let body = self
            .get_body(format!("/json/last/{}", pair).as_str(), timeout)
            .await?;

        // Only the requested pair has to look like a quote; sibling keys are ignored.
        let mut entries = serde_json::from_str::<HashMap<String, Value>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode(e.to_string())
        })?;

        let key = pair.response_key();
        let entry = entries.remove(&key).ok_or_else(|| {
            tracing::error!("Response has no {} object", key);
            Error::MissingPair(key.clone())
        })?;

        serde_json::from_value::<ExchangeQuote>(entry).map_err(|e| {
            tracing::error!("Failed to parse {} quote: {}", key, e);
            Error::Decode(e.to_string())
        })
    }
}

fn transport_error(e: &reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::RequestFailed
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
