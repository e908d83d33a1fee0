use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_account::create_account;
use super::handlers::get_account::get_account;
use super::handlers::list_accounts::list_accounts;
use super::handlers::login::login;
use super::handlers::recover_password::recover_password;
use super::handlers::reset_password::reset_password;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::Notifier;
use crate::config::EmailConfig;
use crate::domain::account::service::AccountService;
use crate::outbound::repositories::account::PostgresAccountRepository;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<PostgresAccountRepository>>,
    pub token_codec: Arc<TokenCodec>,
    pub notifier: Arc<dyn Notifier>,
    pub email: EmailConfig,
}

pub fn create_router(
    account_service: Arc<AccountService<PostgresAccountRepository>>,
    token_codec: Arc<TokenCodec>,
    notifier: Arc<dyn Notifier>,
    email: EmailConfig,
) -> Router {
    let state = AppState {
        account_service,
        token_codec,
        notifier,
        email,
    };

    let public_routes = Router::new()
        .route("/api/accounts", post(create_account))
        .route("/api/auth/login", post(login))
        .route("/api/auth/recover", post(recover_password))
        .route("/api/auth/reset", post(reset_password));

    let protected_routes = Router::new()
        .route("/api/accounts", get(list_accounts))
        .route("/api/accounts/:account_id", get(get_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Authorization headers carry bearer tokens, so spans record the
    // method and uri only.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
