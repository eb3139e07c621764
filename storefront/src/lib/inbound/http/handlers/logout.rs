use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::cookie::removal_cookie;

/// Clear `jwtCookie`. Tokens already handed out stay valid until they expire.
pub async fn logout(jar: CookieJar) -> (CookieJar, ApiSuccess<LogoutResponseData>) {
    (
        jar.add(removal_cookie()),
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "Session closed".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
