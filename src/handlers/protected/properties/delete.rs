// DELETE /properties/:property_id - soft delete (owner or admin)

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::models::Property;
use crate::error::ApiError;
use crate::services::property_service;

pub async fn delete_delete(
    Extension(property): Extension<Property>,
) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    // Already-deleted rows don't match, so a concurrent delete reads as 404.
    if !property_service::soft_delete_property(&pool, property.id).await? {
        return Err(ApiError::not_found("Property not found"));
    }

    Ok(Json(json!({ "message": "Property deleted successfully" })))
}
