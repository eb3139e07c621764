use jsonwebtoken::Algorithm;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and JWT handling.
///
/// Holds the signing secret for the lifetime of the process; construct it
/// once from configuration and share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

impl Authenticator {
    /// Create an authenticator signing with HS256.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Create an authenticator with an explicit signing algorithm.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm is not in the HMAC family
    pub fn with_algorithm(jwt_secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::with_algorithm(jwt_secret, algorithm)?,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a candidate password against a stored hash.
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash cannot be parsed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Sign claims into a token.
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate and decode a token.
    pub fn validate_token<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}
