use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::dto::not_blank;
use crate::model::banner::BannerPage;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "require_some_image"))]
pub struct CreateBannerRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub link: Option<String>,
    pub button_text: Option<String>,
    pub is_active: Option<bool>,
    pub page: Option<BannerPage>,
}

fn require_some_image(request: &CreateBannerRequest) -> Result<(), ValidationError> {
    let has_image = request.image.as_deref().is_some_and(|i| !i.trim().is_empty());
    let has_images = request.images.as_ref().is_some_and(|i| !i.is_empty());
    if has_image || has_images {
        Ok(())
    } else {
        Err(ValidationError::new("image_required"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBannerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<BannerPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerListQuery {
    pub page: Option<BannerPage>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_banner_needs_an_image() {
        let request: CreateBannerRequest = serde_json::from_value(json!({ "title": "Welcome" })).unwrap();
        assert!(request.validate().is_err());
        let request: CreateBannerRequest =
            serde_json::from_value(json!({ "title": "Welcome", "images": ["/a.jpg"] })).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unknown_page_is_rejected() {
        let parsed = serde_json::from_value::<CreateBannerRequest>(json!({ "title": "x", "image": "/a.jpg", "page": "contact" }));
        assert!(parsed.is_err());
    }
}
