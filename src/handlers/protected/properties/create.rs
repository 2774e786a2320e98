// POST /properties - create a listing owned by the caller

use axum::http::StatusCode;
use axum::{Extension, Json};
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::{CreateProperty, Property};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::property_service;

/// Ownership always comes from the authenticated caller; any owner supplied
/// in the payload is ignored.
pub async fn create_post(
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateProperty>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let property = property_service::create_property(&pool, auth.id, payload).await?;

    Ok((StatusCode::CREATED, Json(property)))
}
