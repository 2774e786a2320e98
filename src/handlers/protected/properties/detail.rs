// GET /properties/:property_id - single listing with media

use axum::extract::Path;
use axum::Json;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::PropertyWithMedia;
use crate::error::ApiError;
use crate::services::property_service;

/// Readable by any authenticated user regardless of ownership. A malformed
/// id is indistinguishable from a missing property.
pub async fn detail_get(Path(property_id): Path<String>) -> Result<Json<PropertyWithMedia>, ApiError> {
    let property_id = Uuid::parse_str(&property_id)
        .map_err(|_| ApiError::not_found("Property not found"))?;

    let pool = DatabaseManager::pool().await?;
    let property = property_service::find_property(&pool, property_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))?;

    let enriched = property_service::with_media(&pool, property).await?;
    Ok(Json(enriched))
}
