//! Host configuration for imgup
//!
//! The destination account (cloud name) is deliberately not baked into the
//! binary: it comes from the environment or from explicit builder calls,
//! and validation refuses to run without it.

use crate::error::{ImgupError, Result};

/// Default unsigned upload preset, matching the host's out-of-the-box one
pub const DEFAULT_UPLOAD_PRESET: &str = "ml_default";

/// Default API base of the image host
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Configuration for the image-hosting account uploads go to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Account identifier at the image host
    pub cloud_name: String,
    /// Named server-side preset permitting unsigned uploads
    pub upload_preset: String,
    /// API base URL, without trailing slash
    pub api_base: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from `IMGUP_CLOUD_NAME`, `IMGUP_UPLOAD_PRESET`
    /// and `IMGUP_API_BASE`, falling back to defaults where unset
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            cloud_name: std::env::var("IMGUP_CLOUD_NAME").unwrap_or(default.cloud_name),
            upload_preset: std::env::var("IMGUP_UPLOAD_PRESET").unwrap_or(default.upload_preset),
            api_base: std::env::var("IMGUP_API_BASE").unwrap_or(default.api_base),
        }
    }

    pub fn cloud_name(mut self, cloud_name: impl Into<String>) -> Self {
        self.cloud_name = cloud_name.into();
        self
    }

    pub fn upload_preset(mut self, upload_preset: impl Into<String>) -> Self {
        self.upload_preset = upload_preset.into();
        self
    }

    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cloud_name.is_empty() {
            return Err(ImgupError::config_error(
                "cloud name is not set; pass --cloud-name or set IMGUP_CLOUD_NAME",
            ));
        }

        if self.upload_preset.is_empty() {
            return Err(ImgupError::config_error("upload preset must not be empty"));
        }

        Ok(())
    }

    /// Full URL of the image upload endpoint for this account
    pub fn upload_endpoint(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = HostConfig::new()
            .cloud_name("demo")
            .upload_preset("unsigned_demo")
            .api_base("https://api.example.test/v1_1");

        assert_eq!(config.cloud_name, "demo");
        assert_eq!(config.upload_preset, "unsigned_demo");
        assert_eq!(config.api_base, "https://api.example.test/v1_1");
    }

    #[test]
    fn test_validate_requires_cloud_name() {
        let config = HostConfig::new();
        assert!(config.validate().is_err());

        let config = config.cloud_name("demo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_upload_endpoint() {
        let config = HostConfig::new().cloud_name("demo");
        assert_eq!(
            config.upload_endpoint(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );

        let config = config.api_base("https://api.example.test/v1_1/");
        assert_eq!(
            config.upload_endpoint(),
            "https://api.example.test/v1_1/demo/image/upload"
        );
    }
}
