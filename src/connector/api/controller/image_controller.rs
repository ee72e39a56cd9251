use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::ImagePayload;

use super::super::Container;

pub struct ImageController<'a> {
    container: &'a Container,
}

impl<'a> ImageController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn analyze(&self, path: PathBuf) -> Result<String> {
        let data = tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read image {}", path.display()))?;
        let mime = path
            .extension()
            .and_then(|e| e.to_str())
            .map(ImagePayload::mime_for_extension)
            .unwrap_or(crate::DEFAULT_IMAGE_MIME);

        let image = ImagePayload::new(mime, data);
        let use_case = self.container.image_use_case();
        Ok(use_case.analyze_image(&image).await)
    }
}
