use bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::dto::{not_blank, optional_string_or_number};
use crate::model::room::RoomAddon;

/// Typed room fields plus whatever else the admin form sends (legacy `name`,
/// `price`, `images`, ...), which is kept under `extra`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub id: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub guests: Option<String>,
    pub size: Option<String>,
    pub bed_type: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub price_summary: Option<Document>,
    pub addons: Option<Vec<RoomAddon>>,
    pub goibibo_offers: Option<Vec<Document>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number", skip_serializing_if = "Option::is_none")]
    pub guests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_summary: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addons: Option<Vec<RoomAddon>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goibibo_offers: Option<Vec<Document>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
