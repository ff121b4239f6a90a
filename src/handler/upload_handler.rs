use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::{response::IntoResponse, Json};
use tracing::{info, warn};

use crate::dto::upload_dto::{UploadFile, UploadQuery};
use crate::service::upload_service::{UploadService, UploadServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::ApiQuery;

const FILE_FIELD: &str = "file";

// Handler: Upload Image (admin only)
// Expects multipart/form-data with the image in the `file` field.
pub async fn upload_image_handler(
    State(service): State<Arc<UploadServiceImpl>>,
    ApiQuery(query): ApiQuery<UploadQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    let mut file: Option<UploadFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Malformed multipart body: {}", e);
        HandlerError::bad_request("Invalid multipart body").with_details(e.to_string())
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
        let content = field.bytes().await.map_err(|e| {
            HandlerError::bad_request("Failed to read uploaded file").with_details(e.to_string())
        })?;
        info!(filename = %filename, size = content.len(), "Received upload");
        file = Some(UploadFile { filename, content_type, content: content.to_vec() });
    }

    let uploaded = service.upload_image(query.folder, file).await?;
    Ok(Json(uploaded))
}
