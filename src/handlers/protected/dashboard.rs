// GET /dashboard - aggregate portfolio metrics

use axum::Json;

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::services::property_service::{self, DashboardMetrics};

pub async fn dashboard_get() -> Result<Json<DashboardMetrics>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let metrics = property_service::dashboard_metrics(&pool).await?;
    Ok(Json(metrics))
}
