use serde_json::Value;
use thiserror::Error;

use crate::transport::BoxError;

/// Result type alias for Teams webhook operations
pub type Result<T> = std::result::Result<T, TeamsError>;

/// Broad category of a [`TeamsError`]
///
/// Useful when the caller only wants to branch on what went wrong,
/// not on the details carried by each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing webhook URL or the webhook rejected the credentials
    Unauthorized,
    /// The webhook does not exist (or refused the submit method)
    NotFound,
    /// The webhook rejected the payload as invalid
    Validation,
    /// Any other failure while delivering the message
    FailedAction,
    /// Local setup failure (HTTP client construction, payload encoding)
    Client,
}

/// Errors that can occur when posting to a Teams webhook
#[derive(Debug, Error)]
pub enum TeamsError {
    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// Failed to serialize the card
    #[error("Failed to serialize card: {0}")]
    Serialize(#[source] serde_json::Error),

    /// No webhook URL configured, or HTTP 401/403
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// HTTP status code, `None` when the request was never sent
        status: Option<u16>,
        /// Human readable reason
        message: String,
    },

    /// HTTP 404/405
    #[error("Webhook not found: HTTP {status}")]
    NotFound {
        /// HTTP status code
        status: u16,
    },

    /// HTTP 422
    #[error("Validation failed{}", validation_detail(.errors))]
    Validation {
        /// Decoded response body, when it was valid JSON
        errors: Option<Value>,
    },

    /// Any other non-success status or a transport failure
    #[error("Failed action: {message}")]
    FailedAction {
        /// HTTP status code, `None` when no response was received
        status: Option<u16>,
        /// Response body or transport error message
        message: String,
        /// Underlying transport error
        #[source]
        source: Option<BoxError>,
    },
}

fn validation_detail(errors: &Option<Value>) -> String {
    match errors {
        Some(errors) => format!(": {errors}"),
        None => String::new(),
    }
}

impl TeamsError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::FailedAction { .. } => ErrorKind::FailedAction,
            Self::BuildHttpClient(_) | Self::Serialize(_) => ErrorKind::Client,
        }
    }

    /// HTTP status code returned by the webhook, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::FailedAction { status, .. } => *status,
            Self::NotFound { status } => Some(*status),
            Self::Validation { .. } => Some(422),
            _ => None,
        }
    }

    /// Check if the error is retryable
    ///
    /// Returns `true` for:
    /// - Connection and timeout errors from the reqwest transport
    /// - Server errors (5xx status codes)
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::FailedAction {
                status: Some(status),
                ..
            } => *status >= 500,
            Self::FailedAction {
                status: None,
                source: Some(source),
                ..
            } => {
                if let Some(err) = source.downcast_ref::<reqwest_middleware::Error>() {
                    return match err {
                        reqwest_middleware::Error::Reqwest(err) => {
                            err.is_connect() || err.is_timeout()
                        }
                        reqwest_middleware::Error::Middleware(_) => false,
                    };
                }
                if let Some(err) = source.downcast_ref::<reqwest::Error>() {
                    return err.is_connect() || err.is_timeout();
                }
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failed(status: u16) -> TeamsError {
        TeamsError::FailedAction {
            status: Some(status),
            message: String::new(),
            source: None,
        }
    }

    #[test]
    fn test_failed_action_retryable_5xx() {
        assert!(failed(500).is_retryable());
        assert!(failed(502).is_retryable());
        assert!(failed(503).is_retryable());
    }

    #[test]
    fn test_failed_action_not_retryable_4xx() {
        assert!(!failed(400).is_retryable());
        assert!(!failed(404).is_retryable());
    }

    #[test]
    fn test_taxonomy_not_retryable() {
        let error = TeamsError::Unauthorized {
            status: Some(403),
            message: "Forbidden".to_string(),
        };
        assert!(!error.is_retryable());
        assert!(!TeamsError::NotFound { status: 404 }.is_retryable());
        assert!(!TeamsError::Validation { errors: None }.is_retryable());
    }

    #[test]
    fn test_transport_error_without_reqwest_source_not_retryable() {
        let error = TeamsError::FailedAction {
            status: None,
            message: "boom".to_string(),
            source: Some("boom".into()),
        };
        assert!(!error.is_retryable());
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            TeamsError::Unauthorized {
                status: None,
                message: String::new(),
            }
            .kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(TeamsError::NotFound { status: 405 }.kind(), ErrorKind::NotFound);
        assert_eq!(
            TeamsError::Validation { errors: None }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(failed(400).kind(), ErrorKind::FailedAction);

        let json_err = serde_json::from_str::<Value>("invalid").unwrap_err();
        assert_eq!(TeamsError::Serialize(json_err).kind(), ErrorKind::Client);
    }

    #[test]
    fn test_status() {
        assert_eq!(TeamsError::NotFound { status: 404 }.status(), Some(404));
        assert_eq!(TeamsError::Validation { errors: None }.status(), Some(422));
        assert_eq!(failed(503).status(), Some(503));
        let error = TeamsError::Unauthorized {
            status: None,
            message: String::new(),
        };
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TeamsError::NotFound { status: 404 }.to_string(),
            "Webhook not found: HTTP 404"
        );
        assert_eq!(
            TeamsError::Validation { errors: None }.to_string(),
            "Validation failed"
        );
        assert_eq!(
            TeamsError::Validation {
                errors: Some(json!({"foo": "bar"}))
            }
            .to_string(),
            r#"Validation failed: {"foo":"bar"}"#
        );
        let error = TeamsError::FailedAction {
            status: Some(500),
            message: "Internal server error".to_string(),
            source: None,
        };
        assert_eq!(error.to_string(), "Failed action: Internal server error");
    }
}
