// POST /auth/forgot-password - issue a reset token and email it

use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::error::ApiError;
use crate::services::mailer;

/// Returned whether or not the email is registered, so the endpoint cannot
/// be used to probe for accounts.
const RESET_RESPONSE_MESSAGE: &str =
    "If a user with that email exists, reset instructions have been sent.";

const RESET_TOKEN_TTL_HOURS: i64 = 1;

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Start the password-reset flow: on a matching account, store a fresh reset
/// token with a 1-hour expiry and send it via the mailer. Reset completion
/// is handled elsewhere; this endpoint only issues tokens.
pub async fn forgot_password_post(
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await?;

    let Some(user) = user else {
        return Ok(Json(json!({ "message": RESET_RESPONSE_MESSAGE })));
    };

    let reset_token = Uuid::new_v4().to_string();
    let reset_expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

    sqlx::query(
        "UPDATE users SET reset_token = $1, reset_expires_at = $2, updated_at = $3 WHERE id = $4",
    )
    .bind(&reset_token)
    .bind(reset_expires_at)
    .bind(Utc::now())
    .bind(user.id)
    .execute(&pool)
    .await?;

    mailer::send_password_reset(&user.email, &reset_token).await?;

    Ok(Json(json!({ "message": RESET_RESPONSE_MESSAGE })))
}
