use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // Any credential failure maps to the same uniform 401.
    let (account, token) = state
        .account_service
        .login(&body.email, &body.password)
        .await
        .map_err(ApiError::from)?;

    let subject = "Log In";
    let message = format!("A login to your account was made at {}", Utc::now());
    if let Err(e) = state
        .notifier
        .send(account.email.as_str(), subject, &message)
        .await
    {
        tracing::error!(account_id = %account.id, "Failed to send login notification: {}", e);
    }

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            account: (&account).into(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub account: AccountData,
    pub token: String,
}
