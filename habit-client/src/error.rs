//! Client error types

use reqwest::StatusCode;
use shared::client::ErrorBody;
use thiserror::Error;

/// Discriminant of [`ClientError`], convenient for matching and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Network,
    Server,
}

/// Client error type
///
/// Variants other than `Network` carry the human-readable message taken from
/// the server's error body (or from local validation). `None` means no message
/// was available and the display falls back to a generic one.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required field is missing/empty, or the server rejected the payload
    #[error("{}", .0.as_deref().unwrap_or("Validation failed"))]
    Validation(Option<String>),

    /// Unknown habit id for this identity
    #[error("{}", .0.as_deref().unwrap_or("Habit not found"))]
    NotFound(Option<String>),

    /// Missing, invalid or expired credential
    #[error("{}", .0.as_deref().unwrap_or("Authentication required"))]
    Unauthorized(Option<String>),

    /// Transport failure (timeout, DNS, connection reset)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Unexpected status or malformed payload
    #[error("{}", .0.as_deref().unwrap_or("Unexpected server response"))]
    Server(Option<String>),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(Some(msg.into()))
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(Some(msg.into()))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Network(_) => ErrorKind::Network,
            Self::Server(_) => ErrorKind::Server,
        }
    }

    /// The message sourced from the server's error body or local validation,
    /// if there was one
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Validation(m) | Self::NotFound(m) | Self::Unauthorized(m) | Self::Server(m) => {
                m.as_deref()
            }
            Self::Network(_) => None,
        }
    }

    /// Classify a non-success response
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = ErrorBody::message_from(body);
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Validation(message)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Server(message.or_else(|| Some(format!("Unexpected status {}", status)))),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Server(Some(format!("Malformed response: {}", err)))
        } else {
            Self::Network(err)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Server(Some(format!("Malformed response: {}", err)))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
