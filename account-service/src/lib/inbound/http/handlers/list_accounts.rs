use auth::Claims;
use auth::Policy;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::require;
use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// List all accounts. Admin only.
pub async fn list_accounts(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    let claims = claims.as_ref().map(|Extension(c)| c);
    require(Policy::Admin.evaluate(claims))?;

    let accounts = state
        .account_service
        .list_accounts()
        .await
        .map_err(ApiError::from)?;

    let data = accounts.iter().map(AccountData::from).collect();

    Ok(ApiSuccess::new(StatusCode::OK, data))
}
