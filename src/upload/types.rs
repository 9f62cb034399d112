use crate::error::{ImgupError, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Largest payload the host accepts through the unsigned preset: 10 MiB
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Delay between a successful response and handing the receipt back,
/// so the progress display is seen reaching 100
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);

/// Progress callback, invoked with an integer percentage in 0..=100
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// A single file selected for upload
///
/// Immutable once constructed; one request produces exactly one receipt
/// or one error.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    /// Read a file from disk, guessing its MIME type from the extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImgupError::invalid_parameter(
                "path",
                format!("File does not exist: {}", path.display()),
            ));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        let bytes = std::fs::read(path)?;

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Build a request from in-memory data
    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Enforce the boundary constraints: MIME type must be `image/*` and
    /// the payload must fit the host's size limit
    pub fn validate(&self) -> Result<()> {
        if !self.mime_type.starts_with("image/") {
            return Err(ImgupError::not_an_image(&self.mime_type));
        }

        if self.size() > MAX_UPLOAD_BYTES {
            return Err(ImgupError::too_large(self.size(), MAX_UPLOAD_BYTES));
        }

        Ok(())
    }
}

/// Options for a single upload
#[derive(Clone)]
pub struct UploadOptions {
    pub on_progress: Option<ProgressFn>,
    pub reveal_delay: Duration,
}

impl std::fmt::Debug for UploadOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadOptions")
            .field("on_progress", &self.on_progress.is_some())
            .field("reveal_delay", &self.reveal_delay)
            .finish()
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            on_progress: None,
            reveal_delay: REVEAL_DELAY,
        }
    }
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub fn reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }
}

/// What the host stored, as reported by a successful upload
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// HTTPS URL of the stored asset
    pub secure_url: String,
    /// Payload size that was sent
    pub bytes: u64,
    /// Wall-clock duration of the request
    pub duration_ms: u64,
}

impl UploadReceipt {
    pub fn new(secure_url: String, bytes: u64) -> Self {
        Self {
            secure_url,
            bytes,
            duration_ms: 0,
        }
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Success body returned by the host; only the field we use
#[derive(Debug, Deserialize)]
pub(crate) struct HostUploadResponse {
    pub secure_url: String,
}
