//! Upload client for the image endpoint

use std::path::Path;

use common::{ClientError, ClientResult, HttpClient};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{error, info};

use crate::image::ImageFile;

/// Upload response payload, after envelope unwrapping
#[derive(Debug, Clone, Deserialize)]
struct UploadResponse {
    #[serde(rename = "imageURL", alias = "imageUrl", alias = "url")]
    image_url: String,
}

/// Client for `POST /upload/image`
#[derive(Clone)]
pub struct UploadClient {
    http: HttpClient,
    max_bytes: u64,
}

impl UploadClient {
    /// Create a new upload client
    ///
    /// `http` must point at the upload base URL.
    pub fn new(http: HttpClient, max_bytes: u64) -> Self {
        Self { http, max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Read, check and upload an image file, returning its absolute URL
    pub async fn upload_path(&self, path: &Path) -> ClientResult<String> {
        let image = ImageFile::read(path, self.max_bytes).await?;
        self.upload(image).await
    }

    /// Upload a checked image, returning its absolute URL
    pub async fn upload(&self, image: ImageFile) -> ClientResult<String> {
        info!(
            "Uploading image {} ({} bytes, {})",
            image.file_name,
            image.len(),
            image.mime_type
        );

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime_type)
            .map_err(ClientError::Network)?;
        let form = Form::new().part("image", part);

        let response: UploadResponse = self
            .http
            .post_multipart("/upload/image", form, &["imageURL", "imageUrl", "url"])
            .await
            .inspect_err(|e| error!("Image upload failed: {}", e))?;

        let url = normalize_image_url(self.http.base_url(), &response.image_url).ok_or_else(|| {
            ClientError::UnexpectedResponse {
                expected: vec!["imageURL".to_string()],
            }
        })?;

        info!("Image uploaded to {}", url);
        Ok(url)
    }
}

/// Turn the location returned by the upload endpoint into an absolute URL
///
/// Absolute URLs are kept. Protocol-relative ones take the scheme of
/// `base_url`; anything else is appended to `base_url`.
pub fn normalize_image_url(base_url: &str, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(url) = reqwest::Url::parse(raw) {
        if matches!(url.scheme(), "http" | "https") {
            return Some(raw.to_string());
        }
    }

    let base_url = base_url.trim_end_matches('/');

    if let Some(rest) = raw.strip_prefix("//") {
        let scheme = base_url.split("://").next().unwrap_or("http");
        return Some(format!("{}://{}", scheme, rest));
    }

    Some(format!("{}/{}", base_url, raw.trim_start_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_is_kept() {
        assert_eq!(
            normalize_image_url("http://localhost:3000", "https://cdn.example.com/a.png"),
            Some("https://cdn.example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_server_relative_url() {
        assert_eq!(
            normalize_image_url("http://localhost:3000/", "/uploads/a.png"),
            Some("http://localhost:3000/uploads/a.png".to_string())
        );
        assert_eq!(
            normalize_image_url("http://localhost:3000", "uploads/a.png"),
            Some("http://localhost:3000/uploads/a.png".to_string())
        );
    }

    #[test]
    fn test_protocol_relative_url() {
        assert_eq!(
            normalize_image_url("https://api.example.com", "//cdn.example.com/a.png"),
            Some("https://cdn.example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_empty_url() {
        assert_eq!(normalize_image_url("http://localhost:3000", "  "), None);
    }
}
