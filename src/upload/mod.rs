//! Upload workflow for imgup
//!
//! This module provides the upload lifecycle: request construction and
//! validation, the synthetic progress animation, and the single multipart
//! POST to the host.

pub mod operations;
pub mod progress;
pub mod transport;
pub mod types;

pub use operations::{UploadState, Uploader};
pub use progress::{ProgressTicker, PROGRESS_STALL_AT, PROGRESS_STEP, PROGRESS_TICK};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use types::{
    ProgressFn, UploadOptions, UploadReceipt, UploadRequest, MAX_UPLOAD_BYTES, REVEAL_DELAY,
};
