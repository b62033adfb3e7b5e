use reqwest::{Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{method} {path} failed with status {status}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid base url: {url}")]
    InvalidBaseUrl { url: String },
}

impl ClientError {
    /// Upstream status code, when the failure was an HTTP error response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(err) => err.status(),
            ClientError::InvalidBaseUrl { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
