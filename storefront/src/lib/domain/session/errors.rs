use thiserror::Error;

use crate::user::errors::UserError;

/// Failures of a strategy invocation or of token handling.
///
/// Display strings of the credential and token variants are the messages
/// returned to clients; `Internal` details are only logged.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Unknown authentication strategy: {0}")]
    UnknownStrategy(String),

    #[error("Strategy '{strategy}' does not accept {input} input")]
    UnsupportedInput {
        strategy: &'static str,
        input: &'static str,
    },

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    InvalidCredentials(&'static str),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Internal authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    pub const INCORRECT_PASSWORD: &'static str = "Incorrect password";
    pub const INVALID_CREDENTIALS: &'static str = "Invalid credentials";
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
