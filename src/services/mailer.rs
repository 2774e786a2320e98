use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::config;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email API returned status {0}")]
    Api(u16),
}

/// Send password-reset instructions through the SendGrid REST API.
///
/// With no API key configured (development) the send is skipped with a
/// warning so the flow stays exercisable locally.
pub async fn send_password_reset(to_email: &str, reset_token: &str) -> Result<(), MailerError> {
    let email = &config::config().email;

    if email.sendgrid_api_key.is_empty() {
        warn!(
            "SENDGRID_API_KEY not configured; skipping password reset email to {}",
            to_email
        );
        return Ok(());
    }

    let reset_link = format!("{}?token={}", email.reset_url, reset_token);
    let body = json!({
        "personalizations": [{ "to": [{ "email": to_email }] }],
        "from": { "email": email.from_email },
        "subject": "Password Reset Instructions",
        "content": [
            {
                "type": "text/plain",
                "value": format!(
                    "Please click on the following link to reset your password: {}",
                    reset_link
                )
            },
            {
                "type": "text/html",
                "value": format!(
                    "<p>Please click on the following <strong><a href=\"{}\">link</a></strong> to reset your password.</p>",
                    reset_link
                )
            }
        ]
    });

    let response = reqwest::Client::new()
        .post(SENDGRID_SEND_URL)
        .bearer_auth(&email.sendgrid_api_key)
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(MailerError::Api(response.status().as_u16()));
    }

    info!("Password reset email queued for {}", to_email);
    Ok(())
}
