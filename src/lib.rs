//! imgup — upload an image to a hosting API with an unsigned preset
//!
//! The library owns the full lifecycle of one upload: boundary validation
//! (MIME type and size), a synthetic progress animation while the single
//! multipart POST is in flight, settlement into a secure URL or a
//! classified error, and a clipboard copy of the displayed URL.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod upload;
pub mod view;

pub use clipboard::{copy_url, ClipboardTarget, CopyConfirmation, SystemClipboard};

pub use config::{HostConfig, DEFAULT_API_BASE, DEFAULT_UPLOAD_PRESET};

pub use error::{ErrorKind, ImgupError, Result};

pub use upload::{
    HttpTransport, ProgressFn, Transport, TransportResponse, UploadOptions, UploadReceipt,
    UploadRequest, UploadState, Uploader, MAX_UPLOAD_BYTES,
};

pub use view::{error_status, success_status, Preview, Status, StatusKind};
