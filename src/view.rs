//! Result rendering
//!
//! Turns a settled upload into the two things the user sees: a preview
//! (image source plus copyable URL, both carrying the secure URL exactly)
//! and a classified status line.

use crate::error::{ErrorKind, ImgupError};
use crate::upload::UploadReceipt;

/// Classification attached to a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// A user-visible status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }
}

/// The displayed result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// URL usable as an image source
    pub image_src: String,
    /// The same URL, as the copyable text value
    pub copyable_url: String,
}

impl Preview {
    pub fn new(receipt: &UploadReceipt) -> Self {
        Self {
            image_src: receipt.secure_url.clone(),
            copyable_url: receipt.secure_url.clone(),
        }
    }
}

/// Status shown when an upload settles successfully
pub fn success_status() -> Status {
    Status::success("Image uploaded successfully!")
}

/// Status shown when an upload fails
pub fn error_status(err: &ImgupError) -> Status {
    Status::error(err.to_string())
}

/// Whether the failure was caught before any network traffic
pub fn failed_preflight(err: &ImgupError) -> bool {
    err.kind() == ErrorKind::Validation
}
