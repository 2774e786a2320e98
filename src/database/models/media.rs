use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::property::double_option;

/// Row type for `property_images`. `display_order` drives the gallery
/// ordering and is preserved on every read path.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PropertyImage {
    pub id: Uuid,
    pub property_id: Uuid,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Row type for `property_documents`. Documents are ordered by creation time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PropertyDocument {
    pub id: Uuid,
    pub property_id: Uuid,
    pub document_url: String,
    pub document_name: String,
    pub document_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyImage {
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: String,
    pub alt_text: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePropertyImage {
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub alt_text: Option<Option<String>>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyDocument {
    #[validate(url(message = "Invalid document URL"))]
    pub document_url: String,
    #[validate(length(min = 1, message = "Document name is required"))]
    pub document_name: String,
    #[validate(length(min = 1, message = "Document type is required"))]
    pub document_type: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePropertyDocument {
    #[validate(url(message = "Invalid document URL"))]
    pub document_url: Option<String>,
    #[validate(length(min = 1, message = "Document name cannot be empty"))]
    pub document_name: Option<String>,
    #[validate(length(min = 1, message = "Document type cannot be empty"))]
    pub document_type: Option<String>,
}
