use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Start password recovery.
///
/// Responds with the same generic message whether or not the email names an
/// account, so the endpoint cannot be used to enumerate registered
/// addresses.
pub async fn recover_password(
    State(state): State<AppState>,
    Json(body): Json<RecoverPasswordRequestBody>,
) -> Result<ApiSuccess<RecoverPasswordResponseData>, ApiError> {
    let recovery = state
        .account_service
        .start_password_recovery(&body.email)
        .await
        .map_err(ApiError::from)?;

    if let Some((account, token)) = recovery {
        let link = format!(
            "{}/reset-password?token={}",
            state.email.reset_url_base, token
        );
        let subject = "Password recovery";
        let message = format!(
            "Hello {},\n\nUse the link below to reset your password. \
             It expires shortly.\n\n{}",
            account.name, link
        );
        if let Err(e) = state
            .notifier
            .send(account.email.as_str(), subject, &message)
            .await
        {
            tracing::error!(account_id = %account.id, "Failed to send recovery email: {}", e);
        }
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RecoverPasswordResponseData {
            message: "If the email is registered, a recovery link has been sent.".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecoverPasswordRequestBody {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoverPasswordResponseData {
    pub message: String,
}
