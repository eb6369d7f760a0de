//! Media upload port and its Cloudinary implementation.
//!
//! The wizards hand over a publicly fetchable source URL (the Telegram file
//! download link) and get back the hosted photo URL to persist.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("image host rejected the upload: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait PhotoUploader: Send + Sync {
    /// Uploads the image behind `source_url` and returns its hosted URL.
    async fn upload_photo(&self, source_url: &str) -> Result<String, UploadError>;
}

const UPLOAD_FOLDER: &str = "clothing-shop";

pub struct CloudinaryUploader {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryUploader {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        CloudinaryUploader {
            client: reqwest::Client::new(),
            cloud_name,
            api_key,
            api_secret,
        }
    }

    /// Signature over the alphabetically ordered request parameters, per
    /// Cloudinary's signed upload rules.
    fn sign(&self, timestamp: i64) -> String {
        let to_sign = format!(
            "folder={UPLOAD_FOLDER}&timestamp={timestamp}{}",
            self.api_secret
        );
        let digest = Sha256::digest(to_sign.as_bytes());
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[async_trait]
impl PhotoUploader for CloudinaryUploader {
    async fn upload_photo(&self, source_url: &str) -> Result<String, UploadError> {
        let endpoint = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(timestamp);

        debug!(%endpoint, "Uploading photo to Cloudinary");

        let response = self
            .client
            .post(&endpoint)
            .form(&[
                ("file", source_url),
                ("folder", UPLOAD_FOLDER),
                ("timestamp", &timestamp.to_string()),
                ("api_key", &self.api_key),
                ("signature", &signature),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "Cloudinary rejected the upload");
            return Err(UploadError::Rejected(format!("{status}: {body}")));
        }

        let parsed: UploadResponse = response.json().await?;
        Ok(parsed.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_hex_sha256() {
        let uploader = CloudinaryUploader::new(
            "demo".to_string(),
            "key".to_string(),
            "secret".to_string(),
        );
        let signature = uploader.sign(1_700_000_000);

        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
        // Deterministic for a fixed timestamp and secret
        assert_eq!(signature, uploader.sign(1_700_000_000));
        assert_ne!(signature, uploader.sign(1_700_000_001));
    }
}
