//! Error types for the API client.

/// Errors that can occur when fetching quotes.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request did not complete within its timeout.
    #[error("Request timed out")]
    Timeout,
    /// An HTTP request failed (connection refused, reset, bad URL).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was not the expected JSON document.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// The body decoded but did not carry the requested pair.
    #[error("Response has no quote for {0}")]
    MissingPair(String),
    /// A currency pair string could not be parsed.
    #[error("Invalid currency pair: {0}")]
    InvalidPair(String),
}
