use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::Credentials;
use crate::domain::session::StrategyInput;
use crate::domain::session::StrategyName;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::cookie::session_cookie;
use crate::inbound::http::router::AppState;

/// Authenticate with the "login" strategy, then hand the token out twice:
/// as the `jwtCookie` cookie and in the JSON body.
pub async fn login<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let Json(body) = body?;
    let credentials = body
        .into_credentials()
        .ok_or_else(|| ApiError::Unauthorized("Missing credentials".to_string()))?;

    let identity = state
        .strategies
        .authenticate(StrategyName::Login, StrategyInput::Credentials(credentials))
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let issued = state
        .tokens
        .issue(&identity)
        .map_err(|e| ApiError::internal("Internal server error", e))?;

    tracing::info!(user_id = %identity.id, expires_at = %issued.expires_at, "User logged in");

    let jar = jar.add(session_cookie(
        issued.token.clone(),
        state.tokens.ttl(),
        state.settings.cookie_secure,
    ));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                message: "Login successful".to_string(),
                token: issued.token,
            },
        ),
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn into_credentials(self) -> Option<Credentials> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(Credentials { email, password })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub token: String,
}
