use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::dto::not_blank;
use crate::model::blog_post::PostStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPostRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub excerpt: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub author: String,
    pub date: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub category: String,
    pub image: Option<String>,
    pub read_time: Option<String>,
    pub status: Option<PostStatus>,
    pub sections: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing)]
    pub sections: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogListQuery {
    pub status: Option<PostStatus>,
}
