//! Pet image storage. Files are named `{pet_id}_{filename}` and served under [`IMAGE_URL_PREFIX`].

use crate::error::AppError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Public URL prefix for stored images.
pub const IMAGE_URL_PREFIX: &str = "/uploaded_images";

/// Storage name for an image of `pet_id`. `filename` must already be sanitized.
pub fn stored_image_name(pet_id: i64, filename: &str) -> String {
    format!("{}_{}", pet_id, filename)
}

pub fn image_url(stored_name: &str) -> String {
    format!("{}/{}", IMAGE_URL_PREFIX, stored_name)
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` under `name`, replacing any earlier file with that name.
    async fn save(&self, name: &str, bytes: &[u8]) -> Result<(), AppError>;
}

/// Images on the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    /// Create the directory if missing.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(LocalImageStore { dir })
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, name: &str, bytes: &[u8]) -> Result<(), AppError> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "image stored");
        Ok(())
    }
}
