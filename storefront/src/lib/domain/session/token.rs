use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::errors::AuthError;
use super::models::IssuedToken;
use crate::domain::user::models::Identity;

/// Signs and verifies stateless session tokens.
///
/// Secret and algorithm live in the shared `Authenticator`; the lifetime is
/// taken from configuration at startup.
pub struct TokenIssuer {
    authenticator: Arc<Authenticator>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(authenticator: Arc<Authenticator>, ttl: Duration) -> Self {
        Self { authenticator, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token carrying `{sub, email, role}` that expires after the configured lifetime.
    ///
    /// # Errors
    /// * `Internal` - Signing failed
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, AuthError> {
        let claims = Claims::for_user(
            &identity.id,
            identity.email.clone(),
            identity.role.as_str(),
            self.ttl,
        );

        let expires_at = claims
            .exp
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
            .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;

        let token = self
            .authenticator
            .generate_token(&claims)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature and expiry and return the claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed, expired, or no subject
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let claims: Claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Session token rejected");
            AuthError::InvalidToken
        })?;

        if claims.sub.is_none() {
            tracing::warn!("Session token has no subject claim");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
