//! API error types

use std::time::Duration;

/// Errors that can occur while submitting to the contact endpoint.
///
/// A response that parses but reports `success: false` is not an error;
/// it comes back as a [`ContactResponse`](crate::ContactResponse).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network error during the call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The request was abandoned before an answer arrived.
    #[error("Request interrupted: {0}")]
    Interrupted(String),

    /// Invalid base URL or endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body was not the expected JSON object.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the raw body of an unparseable response.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Parse { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Interrupted(_)
        )
    }
}
