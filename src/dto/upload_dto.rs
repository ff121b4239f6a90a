use serde::{Deserialize, Serialize};

pub const DEFAULT_UPLOAD_FOLDER: &str = "hotel";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    pub folder: Option<String>,
}

/// A file part pulled out of a multipart body.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    pub public_id: String,
}
