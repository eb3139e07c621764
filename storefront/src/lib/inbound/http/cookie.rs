//! The `jwtCookie` session cookie.

use axum_extra::extract::cookie::Cookie;

pub const SESSION_COOKIE_NAME: &str = "jwtCookie";

/// HttpOnly cookie carrying the session token, living as long as the token.
pub fn session_cookie(token: String, max_age: chrono::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .build()
}

/// Expired, empty `jwtCookie` that makes the client drop its copy.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build();
    cookie.make_removal();
    cookie
}
