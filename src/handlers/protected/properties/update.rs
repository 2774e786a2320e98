// PUT /properties/:property_id - partial update (owner or admin)

use axum::{Extension, Json};
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Property, PropertyWithMedia, UpdateProperty};
use crate::error::ApiError;
use crate::services::property_service;

/// The ownership gate has already loaded and authorized the property; only
/// fields present in the payload are written.
pub async fn update_put(
    Extension(property): Extension<Property>,
    Json(payload): Json<UpdateProperty>,
) -> Result<Json<PropertyWithMedia>, ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let updated = property_service::update_property(&pool, property.id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))?;

    let enriched = property_service::with_media(&pool, updated).await?;
    Ok(Json(enriched))
}
