//! Placeholder media store for environments without object storage.

use super::service::{MediaError, MediaFile, MediaResult, MediaStore};
use async_trait::async_trait;
use tracing::info;

/// Media store that rejects every upload.
///
/// Listings can still be created with pre-supplied image URLs; only file
/// uploads require a configured storage backend.
pub struct NullMediaStore;

impl NullMediaStore {
    pub fn new() -> Self {
        info!("Using NullMediaStore (media uploads disabled)");
        Self
    }
}

impl Default for NullMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaStore for NullMediaStore {
    async fn upload(&self, _file: MediaFile) -> MediaResult<String> {
        Err(MediaError::Disabled)
    }
}
