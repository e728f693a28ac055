//! Error types
//!
//! Every public operation fails with [`Error`], which keeps the three failure
//! classes apart: local validation, dimension decoding, and transport.

use crate::api::transport::TransportError;
use crate::dimensions::DecodeError;
use crate::model::ShapeType;

/// Result alias used across the SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level SDK error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected locally, before any request was sent
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    /// The server returned a shape whose dimensions do not fit its type
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// Anything from the HTTP layer, passed through unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Invalid caller input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {value:?}")]
    InvalidId { field: &'static str, value: String },
    #[error("{found} dimensions given for a {expected} shape")]
    DimensionsMismatch {
        expected: ShapeType,
        found: ShapeType,
    },
}

impl Error {
    /// HTTP status code of a transport failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

/// Format an API error for display
/// Security: Sanitizes error messages to avoid leaking server response bodies
pub fn format_api_error(error: &Error) -> String {
    match error {
        Error::Validation(e) => return e.to_string(),
        Error::Decode(e) => return format!("Server returned malformed shape data: {}", e),
        Error::Transport(_) => {}
    }

    match error.status() {
        Some(401) => return "Authentication failed. Check the configured API token.".to_string(),
        Some(403) => return "Permission denied.".to_string(),
        Some(404) => return "Resource not found.".to_string(),
        Some(409) => {
            return "Resource conflict. The resource may already exist or be in use.".to_string()
        }
        Some(429) => return "Rate limit exceeded. Please try again later.".to_string(),
        Some(400) | Some(422) => return "Invalid request. Check your parameters.".to_string(),
        Some(s) if s >= 500 => {
            return "World API temporarily unavailable. Please try again.".to_string()
        }
        Some(_) => return "Request failed.".to_string(),
        None => {}
    }

    // Truncate long error messages and remove potential sensitive data
    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16) -> Error {
        Error::Transport(TransportError::Status {
            status,
            body: "secret internals".to_string(),
        })
    }

    #[test]
    fn test_format_maps_common_statuses() {
        assert_eq!(format_api_error(&status_error(404)), "Resource not found.");
        assert!(format_api_error(&status_error(401)).contains("token"));
        assert!(format_api_error(&status_error(503)).contains("unavailable"));
    }

    #[test]
    fn test_format_never_leaks_body() {
        for status in [400, 418, 500] {
            assert!(!format_api_error(&status_error(status)).contains("secret"));
        }
    }

    #[test]
    fn test_format_validation_is_verbatim() {
        let err = Error::from(ValidationError::MissingField("material"));
        assert_eq!(format_api_error(&err), "material is required");
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_format_truncates_long_messages() {
        let err = Error::Transport(TransportError::Body("x".repeat(200)));
        let msg = format_api_error(&err);
        assert!(msg.ends_with("..."));
        assert!(msg.len() <= 83);
    }
}
