use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::notifier::LogNotifier;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::TokenCodec;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_minutes = config.jwt.session_minutes,
        reset_minutes = config.jwt.reset_minutes,
        "Configuration loaded"
    );

    // A missing or short signing secret is fatal here, before any request
    // is accepted.
    let token_codec = Arc::new(
        TokenCodec::new(config.jwt.secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("invalid signing secret: {e}"))?,
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let notifier = Arc::new(LogNotifier::new(&config.email));

    let account_service = Arc::new(AccountService::new(
        repository,
        Arc::clone(&token_codec),
        Duration::minutes(config.jwt.session_minutes),
        Duration::minutes(config.jwt.reset_minutes),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        token_codec,
        notifier,
        config.email.clone(),
    );
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
