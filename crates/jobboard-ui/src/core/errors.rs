//! Error taxonomy for backend calls.
//!
//! # Design
//! - Classify once at the transport boundary from status code and body.
//! - Callers match on the variant; only `Unauthorized` has a global policy.

use jobboard_api_models::{ErrorBody, FieldErrors};
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Credential missing, expired or rejected (401).
    #[error("authentication required")]
    Unauthorized {
        /// Server-provided message.
        message: Option<String>,
    },
    /// Authenticated but not allowed (403).
    #[error("{}", .message.as_deref().unwrap_or("forbidden"))]
    Forbidden {
        /// Server-provided message.
        message: Option<String>,
    },
    /// Resource does not exist (404).
    #[error("{}", .message.as_deref().unwrap_or("not found"))]
    NotFound {
        /// Server-provided message.
        message: Option<String>,
    },
    /// Structured field errors from the server.
    #[error("validation failed")]
    Validation {
        /// Top-level message sent alongside the field map, if any.
        message: Option<String>,
        /// Per-field messages.
        fields: FieldErrors,
    },
    /// Any other non-success status.
    #[error("request failed with status {status}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided message.
        message: Option<String>,
    },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The request could not be assembled (multipart body, headers).
    #[error("request could not be built: {0}")]
    Request(String),
    /// A success response could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// A protected call was attempted without a stored credential.
    #[error("User is not authenticated")]
    MissingCredential,
}

impl ApiError {
    /// Classify a non-success response.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = ErrorBody::parse(body).unwrap_or_default();
        let message = parsed.message().map(str::to_string);
        match status {
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            400 | 422 if !parsed.fields.is_empty() => Self::Validation {
                message,
                fields: parsed.fields,
            },
            _ => Self::Server { status, message },
        }
    }

    /// Whether the global forced-logout policy applies.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Server `error`/`detail` message carried by the failure, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Request(_) | Self::Decode(_) | Self::MissingCredential => {
                None
            }
        }
    }

    /// Field-level messages for validation failures.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Server message when present, else `fallback`.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_taxonomy() {
        assert_eq!(
            ApiError::from_response(401, ""),
            ApiError::Unauthorized { message: None }
        );
        assert!(matches!(
            ApiError::from_response(403, r#"{"detail":"nope"}"#),
            ApiError::Forbidden { message: Some(ref m) } if m == "nope"
        ));
        assert!(matches!(
            ApiError::from_response(404, "<html></html>"),
            ApiError::NotFound { message: None }
        ));
        assert!(matches!(
            ApiError::from_response(500, ""),
            ApiError::Server { status: 500, message: None }
        ));
    }

    #[test]
    fn field_maps_become_validation_errors() {
        let err = ApiError::from_response(400, r#"{"title":["This field is required."]}"#);
        let fields = err.field_errors().expect("validation");
        assert_eq!(fields["title"], vec!["This field is required.".to_string()]);
    }

    #[test]
    fn bad_request_with_error_message_is_not_validation() {
        let err = ApiError::from_response(400, r#"{"error":"Already applied"}"#);
        assert!(err.field_errors().is_none());
        assert_eq!(err.server_message(), Some("Already applied"));
        assert_eq!(err.message_or("fallback"), "Already applied");
        assert_eq!(ApiError::Network("offline".into()).message_or("fallback"), "fallback");
    }

    #[test]
    fn only_401_triggers_forced_logout() {
        assert!(ApiError::Unauthorized { message: None }.is_unauthorized());
        assert!(!ApiError::Forbidden { message: None }.is_unauthorized());
        assert!(!ApiError::MissingCredential.is_unauthorized());
    }
}
