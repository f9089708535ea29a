use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP {0}")]
    Status(u16),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feed schema error: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Transport-level failure (connection refused, timeout, non-2xx) as
    /// opposed to a payload that arrived but could not be understood.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Http(_) | AppError::Status(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
