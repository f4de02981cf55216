use thiserror::Error;

/// Errors surfaced by the request layer. Only `InvalidCategory` ever reaches
/// the caller as an HTTP failure; upstream trouble is absorbed into the
/// fallback response.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid number ID. Use p, f, e, or r.")]
    InvalidCategory { code: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Failures talking to the upstream number provider. All of these are
/// recoverable: the handler logs them and degrades to a no-op read.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
}
