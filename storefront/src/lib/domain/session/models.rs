use std::fmt;

use chrono::DateTime;
use chrono::Utc;

/// Names under which verification strategies are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyName {
    /// Email and password checked against the user directory.
    Login,
    /// Bearer token signature and expiry, then directory lookup by subject.
    Jwt,
}

impl StrategyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyName::Login => "login",
            StrategyName::Jwt => "jwt",
        }
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email and plaintext password for a single login attempt. Never persisted.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What a route hands to a strategy.
#[derive(Debug, Clone)]
pub enum StrategyInput {
    Credentials(Credentials),
    BearerToken(String),
}

impl StrategyInput {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            StrategyInput::Credentials(_) => "credentials",
            StrategyInput::BearerToken(_) => "bearer token",
        }
    }
}

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
