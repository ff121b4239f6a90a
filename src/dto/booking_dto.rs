use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::dto::{lenient_f64, lenient_i64, not_blank, string_or_number};
use crate::model::booking::{BookingStatus, SelectedAddon};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(custom(function = "not_blank"))]
    pub room_id: String,
    pub room_name: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    pub last_name: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub guests: Option<i64>,
    pub selected_addons: Option<Vec<SelectedAddon>>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: Option<f64>,
    pub special_requests: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64", skip_serializing_if = "Option::is_none")]
    pub guests: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_addons: Option<Vec<SelectedAddon>>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantBookingRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(custom(function = "not_blank"))]
    pub restaurant_id: String,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub restaurant_slug: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    /// ISO date or timestamp
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub date: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    #[validate(required, range(min = 1))]
    pub guests: Option<i64>,
    pub special_requests: Option<String>,
}

/// `date` is re-parsed by the service, so it is not serialized here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub guests: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}
