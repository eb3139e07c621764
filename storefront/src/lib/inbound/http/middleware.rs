use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use super::handlers::ApiError;
use crate::domain::session::StrategyInput;
use crate::domain::session::StrategyName;
use crate::domain::user::models::Identity;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// Outcome of the "jwt" strategy, stored in request extensions.
///
/// `None` means the token was valid but its subject did not resolve;
/// handlers decide how to answer that.
#[derive(Debug, Clone)]
pub struct SessionIdentity(pub Option<Identity>);

/// Gate a route with the "jwt" strategy.
///
/// Only the `Authorization: Bearer` header is consulted, not the cookie.
pub async fn require_jwt<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        bearer.ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let identity = state
        .strategies
        .authenticate(
            StrategyName::Jwt,
            StrategyInput::BearerToken(bearer.token().to_string()),
        )
        .await?;

    req.extensions_mut().insert(SessionIdentity(identity));

    Ok(next.run(req).await)
}
