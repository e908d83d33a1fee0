use auth::Claims;
use auth::Policy;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::require;
use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::AccountId;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Fetch a single account record.
///
/// Callers may only read their own record: the `user_id` claim must match
/// the requested id. An unauthenticated caller is rejected before the
/// ownership check is attempted.
pub async fn get_account(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    Path(account_id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let id = AccountId::from_string(&account_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let claims = claims.as_ref().map(|Extension(c)| c);
    require(Policy::ResourceOwner(id.0).evaluate(claims))?;

    let account = state
        .account_service
        .get_account(&id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(StatusCode::OK, (&account).into()))
}
