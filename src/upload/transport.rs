//! Outbound HTTP seam
//!
//! The workflow talks to the host through the `Transport` trait so the
//! upload lifecycle can be exercised against a fake in tests. The real
//! implementation is a single multipart POST via reqwest.

use crate::error::Result;
use crate::upload::types::UploadRequest;
use async_trait::async_trait;

/// A settled HTTP exchange, reduced to what the workflow needs
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries one upload request to the host
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue the multipart POST with the file payload and the unsigned
    /// preset identifier. Errors here mean the exchange never settled.
    async fn send(
        &self,
        endpoint: &str,
        request: &UploadRequest,
        upload_preset: &str,
    ) -> Result<TransportResponse>;
}

/// Transport backed by a shared reqwest client
///
/// No explicit timeout is configured; the client default applies.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: &str,
        request: &UploadRequest,
        upload_preset: &str,
    ) -> Result<TransportResponse> {
        let file_part = reqwest::multipart::Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("upload_preset", upload_preset.to_string());

        let response = self.client.post(endpoint).multipart(form).send().await?;

        let status = response.status();
        let status_text = status
            .canonical_reason()
            .unwrap_or_else(|| status.as_str())
            .to_string();
        let body = response.text().await?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_statuses() {
        let ok = TransportResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: String::new(),
        };
        assert!(ok.is_success());

        let bad = TransportResponse {
            status: 400,
            status_text: "Bad Request".to_string(),
            body: String::new(),
        };
        assert!(!bad.is_success());
    }
}
