use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub role: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub quote: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonialRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Shared by the lists that can be narrowed to active entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveListQuery {
    pub active: Option<bool>,
}
