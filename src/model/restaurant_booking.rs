use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::model::booking::BookingStatus;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestaurantBooking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub restaurant_slug: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Stored as a BSON date even though clients send ISO text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime>,
    pub time: String,
    pub guests: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}
