pub mod sanitize;
pub mod banner_dto;
pub mod room_dto;
pub mod restaurant_dto;
pub mod booking_dto;
pub mod blog_dto;
pub mod testimonial_dto;
pub mod proposal_dto;
pub mod gallery_dto;
pub mod auth_dto;
pub mod upload_dto;

use bson::Document;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::ValidationError;

use crate::util::date;
use crate::util::error::ServiceError;

/// Keys a client may never write: the store id, the app-level item key and
/// the server-owned timestamps.
pub const IDENTITY_KEYS: [&str; 4] = ["_id", "id", "createdAt", "updatedAt"];

/// Body of delete responses and of updates that only acknowledge.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        MessageResponse { success: true, message: message.into() }
    }
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// `$set` body for a partial update: the provided fields only, minus any
/// identity keys, plus a fresh `updatedAt`.
pub fn set_document<T: Serialize>(update: &T) -> Result<Document, ServiceError> {
    let mut set = bson::to_document(update)
        .map_err(|e| ServiceError::InvalidInput(format!("Invalid update payload: {}", e)))?;
    strip_identity(&mut set);
    set.insert("updatedAt", date::now());
    Ok(set)
}

pub fn strip_identity(document: &mut Document) {
    for key in IDENTITY_KEYS {
        document.remove(key);
    }
}

/// Converts the open-ended part of a payload into BSON, dropping identity keys.
pub fn extension_document(extra: &Map<String, Value>) -> Result<Document, ServiceError> {
    let mut document = bson::to_document(extra)
        .map_err(|e| ServiceError::InvalidInput(format!("Invalid payload: {}", e)))?;
    strip_identity(&mut document);
    Ok(document)
}

/// Accepts `"12"` or `12` for reference fields that clients send either way.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("expected string or number, got {}", other))),
    }
}

/// Optional whole number that forms may send as `2` or `"2"`. A blank string
/// reads as absent.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        other => return Err(serde::de::Error::custom(format!("expected a whole number, got {}", other))),
    };
    parsed
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom("expected a whole number"))
}

/// Optional amount that forms may send as `4500`, `4500.5` or `"4500"`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got \"{}\"", s))),
        other => Err(serde::de::Error::custom(format!("expected a number, got {}", other))),
    }
}

/// Optional free-text field that some clients fill with a number (`"guests": 2`).
pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!("expected string or number, got {}", other))),
    }
}
