use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequestBody>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let command = CreateAccountCommand {
        name: body.name,
        email,
        password: body.password,
        phone: body.phone,
        birth: body.birth,
    };

    let account = state
        .account_service
        .create_account(command)
        .await
        .map_err(ApiError::from)?;

    // Signup succeeded; a failed welcome mail is logged, not surfaced.
    let subject = "Welcome!";
    let message = format!(
        "Hello {},\n\nWelcome to our service. We're glad to have you with us!",
        account.name
    );
    if let Err(e) = state
        .notifier
        .send(account.email.as_str(), subject, &message)
        .await
    {
        tracing::error!(account_id = %account.id, "Failed to send welcome email: {}", e);
    }

    Ok(ApiSuccess::new(StatusCode::CREATED, (&account).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountRequestBody {
    name: String,
    email: String,
    password: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    birth: Option<NaiveDate>,
}
