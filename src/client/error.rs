use thiserror::Error;

/// Failure modes surfaced by the API client.
///
/// `Transport` covers network failures and unparseable bodies; it is never
/// retried. `Request` carries the status code and raw body text of a
/// non-success response so callers can decide how to present it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid base URL: {0}")]
    BaseUrl(String),
    #[error("request failed ({status}): {body}")]
    Request { status: u16, body: String },
}

impl ApiError {
    /// Status code of a failed request, if this is a `Request` error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
