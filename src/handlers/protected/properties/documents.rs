// /properties/:property_id/documents - attachment sub-resource (owner or admin)

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{
    CreatePropertyDocument, Property, PropertyDocument, UpdatePropertyDocument,
};
use crate::error::ApiError;
use crate::services::media_service;
use validator::Validate;

pub async fn document_post(
    Extension(property): Extension<Property>,
    Json(payload): Json<CreatePropertyDocument>,
) -> Result<(StatusCode, Json<PropertyDocument>), ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let document = media_service::create_document(&pool, property.id, payload).await?;

    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn document_put(
    Path(params): Path<HashMap<String, String>>,
    Extension(property): Extension<Property>,
    Json(payload): Json<UpdatePropertyDocument>,
) -> Result<Json<PropertyDocument>, ApiError> {
    payload.validate()?;
    let document_id = parse_document_id(&params)?;

    let pool = DatabaseManager::pool().await?;
    let document = media_service::update_document(&pool, property.id, document_id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Document not found"))?;

    Ok(Json(document))
}

pub async fn document_delete(
    Path(params): Path<HashMap<String, String>>,
    Extension(property): Extension<Property>,
) -> Result<Json<Value>, ApiError> {
    let document_id = parse_document_id(&params)?;

    let pool = DatabaseManager::pool().await?;
    if !media_service::delete_document(&pool, property.id, document_id).await? {
        return Err(ApiError::not_found("Document not found"));
    }

    Ok(Json(json!({ "message": "Document deleted successfully" })))
}

fn parse_document_id(params: &HashMap<String, String>) -> Result<Uuid, ApiError> {
    params
        .get("document_id")
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::not_found("Document not found"))
}
