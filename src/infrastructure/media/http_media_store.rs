//! HTTP object-storage client for listing images.

use super::service::{MediaError, MediaFile, MediaResult, MediaStore};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// Media store that uploads files to a storage provider's HTTP endpoint.
///
/// Sends a multipart form with the file under the `file` part and expects
/// `{"url": "..."}` back.
pub struct HttpMediaStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
}

impl HttpMediaStore {
    pub fn new(upload_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
            api_key,
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, file: MediaFile) -> MediaResult<String> {
        let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.filename.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(MediaError::Provider(format!("{}: {}", status, detail)));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Provider(e.to_string()))?;

        debug!(filename = %file.filename, url = %uploaded.url, "media uploaded");
        Ok(uploaded.url)
    }
}
