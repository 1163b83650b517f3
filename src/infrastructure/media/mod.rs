//! Object storage for listing images.
//!
//! - [`MediaStore`] - upload contract (`file -> url`)
//! - [`HttpMediaStore`] - storage provider over HTTP
//! - [`NullMediaStore`] - rejects uploads when unconfigured

mod http_media_store;
mod null_media_store;
pub mod service;

pub use http_media_store::HttpMediaStore;
pub use null_media_store::NullMediaStore;
pub use service::{MediaError, MediaFile, MediaResult, MediaStore};
