//! Upload workflow
//!
//! One `Uploader` owns the lifecycle of a single upload at a time:
//! pre-flight validation, the synthetic progress animation, the multipart
//! POST, and settlement. `submit` takes `&mut self`, so two uploads can
//! never be in flight on the same controller.

use crate::config::HostConfig;
use crate::error::{ImgupError, Result};
use crate::upload::progress::ProgressTicker;
use crate::upload::transport::{HttpTransport, Transport};
use crate::upload::types::{HostUploadResponse, UploadOptions, UploadReceipt, UploadRequest};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Lifecycle of the controller's current (or most recent) upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Controller for uploads to one configured host account
pub struct Uploader {
    config: HostConfig,
    transport: Arc<dyn Transport>,
    state: UploadState,
}

impl Uploader {
    /// Create an uploader that talks to the host over HTTP
    pub fn new(config: HostConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Create an uploader with a caller-supplied transport
    pub fn with_transport(config: HostConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            state: UploadState::Idle,
        })
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Upload one image and return the host's receipt
    ///
    /// Constraint violations fail before any network traffic. A new call
    /// re-enters the running state from any terminal state.
    pub async fn submit(
        &mut self,
        request: UploadRequest,
        options: UploadOptions,
    ) -> Result<UploadReceipt> {
        if let Err(err) = request.validate() {
            warn!("rejecting {}: {}", request.file_name, err);
            self.state = UploadState::Failed;
            return Err(err);
        }

        info!(
            "uploading {} ({} bytes, {})",
            request.file_name,
            request.size(),
            request.mime_type
        );
        self.state = UploadState::Running;

        // Owns the animation for exactly as long as the request is in
        // flight; every early return below drops and thereby cancels it.
        let ticker = ProgressTicker::start(options.on_progress.clone());
        let started = Instant::now();

        let endpoint = self.config.upload_endpoint();
        let response = match self
            .transport
            .send(&endpoint, &request, &self.config.upload_preset)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                self.state = UploadState::Failed;
                return Err(err);
            }
        };

        if !response.is_success() {
            debug!("host answered {} {}", response.status, response.status_text);
            self.state = UploadState::Failed;
            return Err(ImgupError::rejected(response.status, response.status_text));
        }

        let parsed: HostUploadResponse = match serde_json::from_str(&response.body) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.state = UploadState::Failed;
                return Err(ImgupError::malformed_response(err.to_string()));
            }
        };

        ticker.finish();
        self.state = UploadState::Succeeded;

        let receipt = UploadReceipt::new(parsed.secure_url, request.size())
            .duration_ms(started.elapsed().as_millis() as u64);
        info!("stored as {}", receipt.secure_url);

        if !options.reveal_delay.is_zero() {
            tokio::time::sleep(options.reveal_delay).await;
        }

        Ok(receipt)
    }
}
