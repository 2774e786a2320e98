// POST /auth/login - exchange email+password for a bearer token

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::auth::{generate_jwt, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Authenticate a user and issue a 1-hour bearer token.
///
/// Unknown email and wrong password produce the same response so the
/// endpoint does not reveal which accounts exist.
pub async fn login_post(Json(payload): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| ApiError::bad_request("Invalid credentials"))?;

    match crate::auth::password::verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return Err(ApiError::bad_request("Invalid credentials")),
        Err(e) => {
            tracing::error!("Unverifiable password hash for {}: {}", user.id, e);
            return Err(ApiError::internal_server_error("Internal server error"));
        }
    }

    let token = generate_jwt(&Claims::for_user(&user)).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::internal_server_error("Internal server error")
    })?;

    Ok(Json(json!({ "token": token, "user": user })))
}
