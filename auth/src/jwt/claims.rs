use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Generic JWT claims structure.
///
/// Registered claims used by the services plus custom fields via `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create session claims for an authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier (becomes `sub`)
    /// * `email` - Stored in `extra.email`
    /// * `role` - Stored in `extra.role`
    /// * `ttl` - Lifetime; `exp` is `iat + ttl`
    pub fn for_user(
        user_id: impl ToString,
        email: impl Into<String>,
        role: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        let email: String = email.into();
        let role: String = role.into();

        Self::new()
            .with_subject(user_id)
            .with_issued_at(now.timestamp())
            .with_expiration((now + ttl).timestamp())
            .with_extra("email", email)
            .with_extra("role", role)
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn email(&self) -> Option<&str> {
        self.extra_str("email")
    }

    pub fn role(&self) -> Option<&str> {
        self.extra_str("role")
    }

    fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}
