use kataru_core::error::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl From<MalError> for ServiceError {
    fn from(err: MalError) -> Self {
        match err {
            MalError::Http(e) => ServiceError::Transport(e.to_string()),
            MalError::Api { status, .. } => ServiceError::Status(status),
            MalError::Parse(msg) => ServiceError::Parse(msg),
        }
    }
}
