//! Clipboard copy with timed confirmation

use crate::error::{ImgupError, Result};
use crate::view::Preview;
use std::time::Duration;

/// How long the copy confirmation is shown before reverting
pub const CONFIRMATION_DURATION: Duration = Duration::from_millis(2000);

/// Destination for the copyable URL
pub trait ClipboardTarget {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, via arboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| ImgupError::clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardTarget for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ImgupError::clipboard(e.to_string()))
    }
}

/// Transient confirmation that a copy happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyConfirmation {
    /// Exactly what was placed on the clipboard
    pub copied: String,
}

impl CopyConfirmation {
    /// How long the indicator stays up before reverting
    pub fn revert_after(&self) -> Duration {
        CONFIRMATION_DURATION
    }
}

/// Copy the currently displayed URL to the clipboard
pub fn copy_url<C: ClipboardTarget>(clipboard: &mut C, preview: &Preview) -> Result<CopyConfirmation> {
    clipboard.set_text(&preview.copyable_url)?;
    Ok(CopyConfirmation {
        copied: preview.copyable_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::UploadReceipt;

    #[derive(Default)]
    struct FakeClipboard {
        contents: Option<String>,
    }

    impl ClipboardTarget for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_places_exact_url() {
        let receipt = UploadReceipt::new("https://x/y.png".to_string(), 1);
        let preview = Preview::new(&receipt);
        let mut clipboard = FakeClipboard::default();

        let confirmation = copy_url(&mut clipboard, &preview).unwrap();

        assert_eq!(clipboard.contents.as_deref(), Some("https://x/y.png"));
        assert_eq!(confirmation.copied, "https://x/y.png");
    }

    #[test]
    fn test_confirmation_reverts_after_fixed_duration() {
        let confirmation = CopyConfirmation {
            copied: "https://x/y.png".to_string(),
        };
        assert_eq!(confirmation.revert_after(), Duration::from_millis(2000));
    }

    #[test]
    fn test_copy_failure_surfaces() {
        struct BrokenClipboard;
        impl ClipboardTarget for BrokenClipboard {
            fn set_text(&mut self, _text: &str) -> Result<()> {
                Err(ImgupError::clipboard("no display"))
            }
        }

        let receipt = UploadReceipt::new("https://x/y.png".to_string(), 1);
        let preview = Preview::new(&receipt);
        let err = copy_url(&mut BrokenClipboard, &preview).unwrap_err();
        assert!(matches!(err, ImgupError::Clipboard { .. }));
    }
}
