//! Local image files selected for upload

use std::path::Path;

use common::{ClientError, ClientResult, ValidationErrors};
use tracing::info;

const FIELD: &str = "image";

/// Image read from disk and checked for upload
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Read and check an image file
    pub async fn read(path: &Path, max_bytes: u64) -> ClientResult<Self> {
        info!("Reading image file: {}", path.display());

        let metadata = tokio::fs::metadata(path).await.map_err(|source| {
            ClientError::File {
                path: path.display().to_string(),
                source,
            }
        })?;

        if !metadata.is_file() {
            return Err(ValidationErrors::single(FIELD, "Please select an image file").into());
        }

        // Reject oversized files before reading them
        if metadata.len() > max_bytes {
            return Err(ValidationErrors::single(FIELD, too_large_message(max_bytes)).into());
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::File {
                path: path.display().to_string(),
                source,
            })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::from_bytes(file_name, bytes, max_bytes)?)
    }

    /// Check in-memory image content
    pub fn from_bytes(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        max_bytes: u64,
    ) -> Result<Self, ValidationErrors> {
        if bytes.is_empty() {
            return Err(ValidationErrors::single(FIELD, "Image file is empty"));
        }

        if bytes.len() as u64 > max_bytes {
            return Err(ValidationErrors::single(FIELD, too_large_message(max_bytes)));
        }

        let kind = infer::get(&bytes)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .ok_or_else(|| ValidationErrors::single(FIELD, "Selected file is not an image"))?;

        Ok(Self {
            file_name: file_name.into(),
            mime_type: kind.mime_type().to_string(),
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn too_large_message(max_bytes: u64) -> String {
    let megabytes = max_bytes as f64 / (1024.0 * 1024.0);
    format!("Image must be at most {:.1} MB", megabytes)
}
