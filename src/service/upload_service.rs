use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::dto::upload_dto::{UploadFile, UploadResponse, DEFAULT_UPLOAD_FOLDER};
use crate::util::error::ServiceError;
use crate::util::minio::ImageHost;

#[async_trait]
pub trait UploadService: Send + Sync {
    async fn upload_image(&self, folder: Option<String>, file: Option<UploadFile>) -> Result<UploadResponse, ServiceError>;
}

pub struct UploadServiceImpl {
    pub image_host: Arc<dyn ImageHost>,
    pub max_bytes: usize,
}

impl UploadServiceImpl {
    pub fn new(image_host: Arc<dyn ImageHost>, max_bytes: usize) -> Self {
        UploadServiceImpl { image_host, max_bytes }
    }
}

/// Keeps `[A-Za-z0-9_-]` path segments; anything else collapses to the default folder.
fn clean_folder(folder: Option<&str>) -> String {
    let segments: Vec<&str> = folder
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let valid = !segments.is_empty()
        && segments
            .iter()
            .all(|s| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    if valid {
        segments.join("/")
    } else {
        DEFAULT_UPLOAD_FOLDER.to_string()
    }
}

/// Extension from the file name, else from the image subtype.
fn extension_for(file: &UploadFile) -> String {
    let from_name = file
        .filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    from_name.unwrap_or_else(|| {
        let subtype = file.content_type.trim_start_matches("image/");
        match subtype.split(['+', ';']).next().unwrap_or_default() {
            "jpeg" => "jpg".to_string(),
            "" => "img".to_string(),
            other => other.to_ascii_lowercase(),
        }
    })
}

#[async_trait]
impl UploadService for UploadServiceImpl {
    #[instrument(skip(self, file), fields(folder = ?folder))]
    async fn upload_image(&self, folder: Option<String>, file: Option<UploadFile>) -> Result<UploadResponse, ServiceError> {
        let file = match file {
            Some(file) if !file.content.is_empty() => file,
            _ => {
                warn!("Upload request without a file");
                return Err(ServiceError::InvalidInput("No file provided".to_string()));
            }
        };
        if file.content.len() > self.max_bytes {
            warn!(size = file.content.len(), "Upload exceeds size limit");
            return Err(ServiceError::InvalidInput(format!(
                "File too large. Maximum size is {}MB",
                self.max_bytes / (1024 * 1024)
            )));
        }
        if !file.content_type.starts_with("image/") {
            warn!(content_type = %file.content_type, "Rejected non-image upload");
            return Err(ServiceError::InvalidInput("Only image files are allowed".to_string()));
        }

        let public_id = format!("{}/{}.{}", clean_folder(folder.as_deref()), Uuid::new_v4(), extension_for(&file));
        let size = file.content.len();
        let url = self
            .image_host
            .store_image(&public_id, file.content, &file.content_type)
            .await
            .map_err(|e| {
                error!("Image upload failed: {}", e);
                ServiceError::Upstream(e.to_string())
            })?;

        info!(public_id = %public_id, size, "Image uploaded");
        Ok(UploadResponse { url, public_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str) -> UploadFile {
        UploadFile { filename: name.to_string(), content_type: content_type.to_string(), content: vec![1] }
    }

    #[test]
    fn test_clean_folder() {
        assert_eq!(clean_folder(None), "hotel");
        assert_eq!(clean_folder(Some("rooms/suites")), "rooms/suites");
        assert_eq!(clean_folder(Some("/banners/")), "banners");
        assert_eq!(clean_folder(Some("../etc")), "hotel");
        assert_eq!(clean_folder(Some("")), "hotel");
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for(&file("Pool.PNG", "image/png")), "png");
        assert_eq!(extension_for(&file("blob", "image/jpeg")), "jpg");
        assert_eq!(extension_for(&file("logo", "image/svg+xml")), "svg");
    }
}
