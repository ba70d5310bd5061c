use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("failed to obtain download address")]
    Resolution,

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    ServerDownload(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Network(err.to_string())
    }
}
