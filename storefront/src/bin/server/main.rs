use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use storefront::config::Config;
use storefront::inbound::http::router::create_router;
use storefront::inbound::http::router::AppState;
use storefront::inbound::http::router::SessionSettings;
use storefront::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "storefront",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = ?config.jwt.algorithm,
        jwt_expiration_hours = config.jwt.expiration_hours,
        cookie_secure = config.session.cookie_secure,
        uniform_login_errors = config.auth.uniform_login_errors,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_algorithm(
        config.jwt.secret.as_bytes(),
        config.jwt.algorithm,
    )?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    let state = AppState::new(
        user_repository,
        authenticator,
        SessionSettings::from(&config),
    );
    let http_application = create_router(state);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
