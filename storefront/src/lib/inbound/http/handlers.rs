use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::session::AuthError;
use crate::user::errors::UserError;

pub mod current;
pub mod login;
pub mod logout;
pub mod register;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Client-facing failure. Rendered as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// Log `detail` and hide it behind `message`.
    pub fn internal(message: &str, detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "{}", message);
        ApiError::InternalServerError(message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingFields
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_)
            | UserError::InvalidRole(_) => ApiError::BadRequest(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict("User already exists".to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::internal(INTERNAL_ERROR_MESSAGE, err)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound
            | AuthError::InvalidCredentials(_)
            | AuthError::InvalidToken => ApiError::Unauthorized(err.to_string()),
            AuthError::UnknownStrategy(_)
            | AuthError::UnsupportedInput { .. }
            | AuthError::Internal(_) => ApiError::internal(INTERNAL_ERROR_MESSAGE, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_map_to_unauthorized() {
        assert_eq!(
            ApiError::from(AuthError::UserNotFound),
            ApiError::Unauthorized("User not found".to_string())
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidToken),
            ApiError::Unauthorized("Invalid or expired token".to_string())
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = ApiError::from(AuthError::Internal("pool timed out after 30s".to_string()));
        assert_eq!(err, ApiError::InternalServerError("Internal server error".to_string()));

        let err = ApiError::from(UserError::DatabaseError("relation users does not exist".to_string()));
        assert_eq!(err, ApiError::InternalServerError("Internal server error".to_string()));
    }

    #[test]
    fn test_user_errors_map_to_client_errors() {
        assert_eq!(
            ApiError::from(UserError::MissingFields),
            ApiError::BadRequest("Missing required fields".to_string())
        );
        assert_eq!(
            ApiError::from(UserError::EmailAlreadyExists("ana@x.com".to_string())),
            ApiError::Conflict("User already exists".to_string())
        );
    }
}
