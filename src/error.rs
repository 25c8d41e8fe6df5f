use thiserror::Error;

/// Failure talking to the remote recommendation service. Every variant is
/// recoverable: the orchestrator answers with local recommendations instead.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("service rejected the request: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            RemoteError::Status(status.as_u16())
        } else {
            RemoteError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("feedback not accepted: {0}")]
    Remote(#[from] RemoteError),
}
