use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::not_blank;
use crate::model::proposal::{ProposalStatus, YesNo};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    pub company: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub event_type: String,
    pub event_date: Option<String>,
    #[validate(range(min = 1))]
    pub guest_count: Option<i64>,
    pub food_preference: Option<String>,
    pub alcohol_required: Option<YesNo>,
    pub rooms_required: Option<YesNo>,
    #[validate(range(min = 0))]
    pub number_of_rooms: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProposalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_preference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol_required: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms_required: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_rooms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProposalStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalListQuery {
    pub status: Option<ProposalStatus>,
}
