use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::media::{PropertyDocument, PropertyImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum PropertyStatus {
    ForSale,
    ForRent,
    Sold,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::ForSale => "for_sale",
            PropertyStatus::ForRent => "for_rent",
            PropertyStatus::Sold => "sold",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "for_sale" => Some(PropertyStatus::ForSale),
            "for_rent" => Some(PropertyStatus::ForRent),
            "sold" => Some(PropertyStatus::Sold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Commercial,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "residential",
            PropertyType::Commercial => "commercial",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "residential" => Some(PropertyType::Residential),
            "commercial" => Some(PropertyType::Commercial),
            _ => None,
        }
    }
}

/// Row type for `properties`.
///
/// `is_deleted` is the soft-delete flag: flagged rows are excluded from every
/// listing, detail and dashboard query and are never physically removed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Property {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price: f64,
    pub status: PropertyStatus,
    pub property_type: PropertyType,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub square_footage: i32,
    pub additional_notes: Option<String>,
    pub tags: Option<Json<Vec<String>>>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Property enriched with its ordered media lists, as returned by the list
/// and detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyWithMedia {
    #[serde(flatten)]
    pub property: Property,
    pub images: Vec<PropertyImage>,
    pub documents: Vec<PropertyDocument>,
}

/// Full input shape for POST /properties. The owner is never taken from the
/// payload; it is bound to the authenticated caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProperty {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price: f64,
    pub status: PropertyStatus,
    pub property_type: PropertyType,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub square_footage: i32,
    pub additional_notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Partial input shape for PUT /properties/:property_id.
///
/// Every field is optional; only the fields actually present in the payload
/// are written. Nullable columns use a double `Option` so "absent" (no
/// change) and "null" (clear the column) stay distinguishable.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProperty {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Street cannot be empty"))]
    pub street: Option<String>,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "State cannot be empty"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "Zip code cannot be empty"))]
    pub zip_code: Option<String>,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub longitude: Option<Option<f64>>,
    pub price: Option<f64>,
    pub status: Option<PropertyStatus>,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub square_footage: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub additional_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tags: Option<Option<Vec<String>>>,
}

/// Deserialize a present-but-possibly-null field into `Some(Option<T>)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
