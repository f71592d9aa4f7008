//! Error types for the vision API client.

use thiserror::Error;

/// Errors that can occur when calling the vision API.
#[derive(Debug, Error)]
pub enum VisionError {
    /// HTTP request failed (network error, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body was not in the shape we expect.
    #[error("parse error: {0}")]
    Parse(String),
}

impl VisionError {
    /// True when the failure happened before a response arrived, i.e. a
    /// transport problem worth one retry.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { .. } | Self::Parse(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_error_display() {
        let err = VisionError::Api {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 429 - rate limited");

        let err = VisionError::Parse("no choices".to_string());
        assert_eq!(err.to_string(), "parse error: no choices");
    }

    #[test]
    fn test_api_and_parse_errors_are_not_transport() {
        assert!(
            !VisionError::Api {
                status: 500,
                message: String::new()
            }
            .is_transport()
        );
        assert!(!VisionError::Parse("bad".to_string()).is_transport());
    }
}
