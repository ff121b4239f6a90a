use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::dto::not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub cuisine: String,
    pub description: Option<String>,
    pub timings: Option<String>,
    pub image: Option<String>,
    /// Free-form; cleaned before storage
    pub menu: Option<Value>,
    pub highlights: Option<Vec<String>>,
    pub gallery: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing)]
    pub menu: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
}
