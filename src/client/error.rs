use thiserror::Error;

/// Failures surfaced by the GitHub Models API client. Every failure is
/// returned to the caller; the client never retries or swallows one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing GitHub token")]
    MissingToken,

    #[error("GitHub Models API error: {message} (status code: {status})")]
    Status { status: u16, message: String },

    #[error("failed to call GitHub Models API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode GitHub Models API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
