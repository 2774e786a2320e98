use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::Response,
    Extension,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::services::property_service;

/// Ownership gate for property-scoped mutations.
///
/// Loads the target property (soft-deleted rows excluded), rejects callers
/// that are neither admin nor the recorded owner, and caches the loaded row
/// in request extensions so the handler does not fetch it again. Runs after
/// the authentication gate; read endpoints do not use it.
pub async fn verify_property_ownership(
    Path(params): Path<HashMap<String, String>>,
    Extension(auth): Extension<AuthUser>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let property_id = params
        .get("property_id")
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| ApiError::not_found("Property not found"))?;

    let pool = DatabaseManager::pool().await?;
    let property = property_service::find_property(&pool, property_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))?;

    if !auth.is_admin() && auth.id != property.user_id {
        return Err(ApiError::forbidden("Forbidden: Not the property owner"));
    }

    request.extensions_mut().insert(property);

    Ok(next.run(request).await)
}
