use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
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

use super::handlers::current::current;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::middleware::require_jwt;
use crate::config::Config;
use crate::domain::session::strategy::StrategyOptions;
use crate::domain::session::StrategyRegistry;
use crate::domain::session::TokenIssuer;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::UserService;

/// Session settings taken from configuration at startup.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub token_ttl: chrono::Duration,
    pub cookie_secure: bool,
    pub uniform_login_errors: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_ttl: chrono::Duration::hours(1),
            cookie_secure: false,
            uniform_login_errors: false,
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            token_ttl: chrono::Duration::hours(config.jwt.expiration_hours),
            cookie_secure: config.session.cookie_secure,
            uniform_login_errors: config.auth.uniform_login_errors,
        }
    }
}

pub struct AppState<UR: UserRepository> {
    pub user_service: Arc<UserService<UR>>,
    pub strategies: Arc<StrategyRegistry<UR>>,
    pub tokens: Arc<TokenIssuer>,
    pub settings: SessionSettings,
}

impl<UR: UserRepository> Clone for AppState<UR> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            strategies: Arc::clone(&self.strategies),
            tokens: Arc::clone(&self.tokens),
            settings: self.settings,
        }
    }
}

impl<UR: UserRepository> AppState<UR> {
    /// Wire the user service, token issuer and strategies over one directory.
    pub fn new(
        directory: Arc<UR>,
        authenticator: Arc<Authenticator>,
        settings: SessionSettings,
    ) -> Self {
        let tokens = Arc::new(TokenIssuer::new(
            Arc::clone(&authenticator),
            settings.token_ttl,
        ));

        let strategies = Arc::new(StrategyRegistry::new(
            Arc::clone(&directory),
            Arc::clone(&authenticator),
            Arc::clone(&tokens),
            StrategyOptions {
                uniform_login_errors: settings.uniform_login_errors,
            },
        ));

        let user_service = Arc::new(UserService::new(directory, authenticator));

        Self {
            user_service,
            strategies,
            tokens,
            settings,
        }
    }
}

pub fn create_router<UR: UserRepository>(state: AppState<UR>) -> Router {
    let public_routes = Router::new()
        .route("/register", post(register::<UR>))
        .route("/login", post(login::<UR>))
        .route("/logout", post(logout));

    let protected_routes = Router::new()
        .route("/current", get(current))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_jwt::<UR>,
        ));

    let session_routes: Router<AppState<UR>> = Router::new()
        .merge(public_routes)
        .merge(protected_routes);

    // Headers are left out of the span: they carry bearer tokens.
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
        .nest("/api/sessions", session_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
