use thiserror::Error;

/// Errors returned by the fitness API collaborators
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build an error from a non-success HTTP status
    pub fn from_status(status: u16, body: impl Into<String>, what: &str) -> Self {
        if status == 404 {
            ApiError::NotFound(what.to_string())
        } else {
            ApiError::Status {
                status,
                body: body.into(),
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}
