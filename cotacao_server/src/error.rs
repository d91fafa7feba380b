//! Errors that make `GET /cotacao` fail.

/// Why a quote could not be produced for the caller.
///
/// Persistence problems are not part of this type: a stored row is a side
/// effect, and its failure is reported separately in [`crate::Fetched`].
#[derive(thiserror::Error, Debug)]
pub enum QuoteError {
    #[error("upstream error: {0}")]
    Upstream(#[from] economia_api::Error),
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}
