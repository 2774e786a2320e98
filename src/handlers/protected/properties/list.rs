// GET /properties - filtered, sorted, paginated listing

use axum::extract::Query;
use axum::Json;
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::filter::{PropertySearch, RawPropertySearch};
use crate::services::property_service;

/// List properties with media attached. `total_count` is the number of rows
/// matching the filters across all pages, so clients can paginate.
pub async fn list_get(Query(raw): Query<RawPropertySearch>) -> Result<Json<Value>, ApiError> {
    let search = PropertySearch::parse(raw)?;

    let pool = DatabaseManager::pool().await?;
    let (properties, total_count) = property_service::search_properties(&pool, &search).await?;

    Ok(Json(json!({
        "properties": properties,
        "total_count": total_count,
    })))
}
