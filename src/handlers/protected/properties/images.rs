// /properties/:property_id/images - gallery sub-resource (owner or admin)

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{CreatePropertyImage, Property, PropertyImage, UpdatePropertyImage};
use crate::error::ApiError;
use crate::services::media_service;
use validator::Validate;

pub async fn image_post(
    Extension(property): Extension<Property>,
    Json(payload): Json<CreatePropertyImage>,
) -> Result<(StatusCode, Json<PropertyImage>), ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let image = media_service::create_image(&pool, property.id, payload).await?;

    Ok((StatusCode::CREATED, Json(image)))
}

pub async fn image_put(
    Path(params): Path<HashMap<String, String>>,
    Extension(property): Extension<Property>,
    Json(payload): Json<UpdatePropertyImage>,
) -> Result<Json<PropertyImage>, ApiError> {
    payload.validate()?;
    let image_id = parse_image_id(&params)?;

    let pool = DatabaseManager::pool().await?;
    let image = media_service::update_image(&pool, property.id, image_id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Image not found"))?;

    Ok(Json(image))
}

pub async fn image_delete(
    Path(params): Path<HashMap<String, String>>,
    Extension(property): Extension<Property>,
) -> Result<Json<Value>, ApiError> {
    let image_id = parse_image_id(&params)?;

    let pool = DatabaseManager::pool().await?;
    if !media_service::delete_image(&pool, property.id, image_id).await? {
        return Err(ApiError::not_found("Image not found"));
    }

    Ok(Json(json!({ "message": "Image deleted successfully" })))
}

// A malformed id reads the same as a missing image.
fn parse_image_id(params: &HashMap<String, String>) -> Result<Uuid, ApiError> {
    params
        .get("image_id")
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::not_found("Image not found"))
}
