//! Media store trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while uploading media.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media upload request error: {0}")]
    Request(String),
    #[error("Media store rejected the upload: {0}")]
    Provider(String),
    #[error("Media storage is not configured")]
    Disabled,
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// An uploaded file received from a client.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Trait for the object-storage backend holding listing images.
///
/// The contract is a single operation: hand over file bytes, get back a
/// publicly servable URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::media::HttpMediaStore`] - storage provider over HTTP
/// - [`crate::infrastructure::media::NullMediaStore`] - rejects uploads when unconfigured
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Uploads one file and returns its URL.
    async fn upload(&self, file: MediaFile) -> MediaResult<String>;
}
