//! Error handling for imgup
//!
//! This module defines the error types used throughout the library.
//! Every error is terminal for the upload it belongs to; nothing is
//! retried automatically.

use bytesize::ByteSize;
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ImgupError>;

/// Broad classification of an error, used for status rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network call was made
    Validation,
    /// The host answered with a non-success HTTP status
    Upload,
    /// The request never completed, or the response body was unusable
    Transport,
}

/// Error types that can occur when uploading an image
#[derive(Error, Debug)]
pub enum ImgupError {
    /// The selected file is not an image
    #[error("Please select an image file (JPEG, PNG, etc.), got '{mime}'")]
    NotAnImage { mime: String },

    /// The selected file is larger than the host accepts
    #[error("File size {} exceeds {} limit", ByteSize::b(*size), ByteSize::b(*limit))]
    TooLarge { size: u64, limit: u64 },

    /// Invalid parameter
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The host rejected the upload with an HTTP error status
    #[error("Upload failed: {status_text}")]
    Rejected { status: u16, status_text: String },

    /// The request could not be carried out at all
    #[error("Upload failed: {message}")]
    Transport { message: String },

    /// The host answered with success but the body was not usable
    #[error("Malformed response from host: {message}")]
    MalformedResponse { message: String },

    /// Clipboard access failed
    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImgupError {
    /// Create a new not-an-image validation error
    pub fn not_an_image(mime: impl Into<String>) -> Self {
        ImgupError::NotAnImage { mime: mime.into() }
    }

    /// Create a new size-limit validation error
    pub fn too_large(size: u64, limit: u64) -> Self {
        ImgupError::TooLarge { size, limit }
    }

    /// Create a new invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        ImgupError::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ImgupError::Config {
            message: message.into(),
        }
    }

    /// Create a new rejected-by-host error
    pub fn rejected(status: u16, status_text: impl Into<String>) -> Self {
        ImgupError::Rejected {
            status,
            status_text: status_text.into(),
        }
    }

    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        ImgupError::Transport {
            message: message.into(),
        }
    }

    /// Create a new malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        ImgupError::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a new clipboard error
    pub fn clipboard(message: impl Into<String>) -> Self {
        ImgupError::Clipboard {
            message: message.into(),
        }
    }

    /// Classify this error for status rendering
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImgupError::NotAnImage { .. }
            | ImgupError::TooLarge { .. }
            | ImgupError::InvalidParameter { .. }
            | ImgupError::Config { .. } => ErrorKind::Validation,
            ImgupError::Rejected { .. } => ErrorKind::Upload,
            ImgupError::Transport { .. }
            | ImgupError::MalformedResponse { .. }
            | ImgupError::Clipboard { .. }
            | ImgupError::Io(_)
            | ImgupError::Json(_) => ErrorKind::Transport,
        }
    }
}

impl From<reqwest::Error> for ImgupError {
    fn from(err: reqwest::Error) -> Self {
        ImgupError::transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ImgupError::not_an_image("text/plain");
        assert!(matches!(err, ImgupError::NotAnImage { .. }));

        let err = ImgupError::rejected(400, "Bad Request");
        assert!(matches!(err, ImgupError::Rejected { status: 400, .. }));

        let err = ImgupError::transport("connection reset");
        assert!(matches!(err, ImgupError::Transport { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = ImgupError::rejected(400, "Bad Request");
        assert_eq!(err.to_string(), "Upload failed: Bad Request");

        let err = ImgupError::too_large(11 * 1024 * 1024, 10 * 1024 * 1024);
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            ImgupError::not_an_image("application/pdf").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ImgupError::rejected(500, "Internal Server Error").kind(),
            ErrorKind::Upload
        );
        assert_eq!(
            ImgupError::transport("dns failure").kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            ImgupError::malformed_response("missing secure_url").kind(),
            ErrorKind::Transport
        );
    }
}
