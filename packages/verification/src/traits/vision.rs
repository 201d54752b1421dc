use async_trait::async_trait;

use crate::error::Result;

/// OCR capability for image submissions.
#[async_trait]
pub trait ImageReader: Send + Sync {
    /// Extract visible text from a base64 image (raw or `data:image/...` URL).
    ///
    /// `Ok(None)` means the image was read but held no text.
    async fn read_text(&self, image_base64: &str) -> Result<Option<String>>;
}
