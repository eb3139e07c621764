use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored digest is not a parseable PHC string.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
