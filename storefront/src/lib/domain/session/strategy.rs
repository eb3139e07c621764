use std::collections::HashMap;
use std::sync::Arc;

use auth::Authenticator;

use super::errors::AuthError;
use super::models::Credentials;
use super::models::StrategyInput;
use super::models::StrategyName;
use super::token::TokenIssuer;
use crate::domain::user::models::Identity;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Tunables shared by the registered strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyOptions {
    /// Report unknown email and wrong password with the same message.
    pub uniform_login_errors: bool,
}

/// Email/password verification against the user directory.
pub struct LoginStrategy<UR: UserRepository> {
    directory: Arc<UR>,
    authenticator: Arc<Authenticator>,
    uniform_errors: bool,
}

impl<UR: UserRepository> LoginStrategy<UR> {
    async fn authenticate(&self, credentials: Credentials) -> Result<Option<Identity>, AuthError> {
        let user = match self.directory.find_by_email(&credentials.email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(strategy = "login", "Login for unknown email");
                return Err(self.unknown_user());
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let password = credentials.password;

        let matches = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &stored_hash)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))??;

        if !matches {
            tracing::warn!(strategy = "login", user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials(self.wrong_password_message()));
        }

        Ok(Some(Identity::from(user)))
    }

    fn unknown_user(&self) -> AuthError {
        if self.uniform_errors {
            AuthError::InvalidCredentials(AuthError::INVALID_CREDENTIALS)
        } else {
            AuthError::UserNotFound
        }
    }

    fn wrong_password_message(&self) -> &'static str {
        if self.uniform_errors {
            AuthError::INVALID_CREDENTIALS
        } else {
            AuthError::INCORRECT_PASSWORD
        }
    }
}

/// Bearer token verification followed by a directory lookup of the subject.
pub struct JwtStrategy<UR: UserRepository> {
    directory: Arc<UR>,
    tokens: Arc<TokenIssuer>,
}

impl<UR: UserRepository> JwtStrategy<UR> {
    /// A valid token whose subject no longer resolves yields `Ok(None)`.
    async fn authenticate(&self, token: String) -> Result<Option<Identity>, AuthError> {
        let claims = self.tokens.verify(&token)?;

        let user_id = match claims.sub.as_deref().map(UserId::from_string) {
            Some(Ok(user_id)) => user_id,
            _ => {
                tracing::debug!(strategy = "jwt", "Token subject is not a user id");
                return Ok(None);
            }
        };

        let identity = self
            .directory
            .find_by_id(&user_id)
            .await?
            .map(Identity::from);

        if identity.is_none() {
            tracing::debug!(strategy = "jwt", user_id = %user_id, "Token subject not in directory");
        }

        Ok(identity)
    }
}

/// A registered verification procedure.
pub enum Strategy<UR: UserRepository> {
    Login(LoginStrategy<UR>),
    Jwt(JwtStrategy<UR>),
}

impl<UR: UserRepository> Strategy<UR> {
    fn name(&self) -> StrategyName {
        match self {
            Strategy::Login(_) => StrategyName::Login,
            Strategy::Jwt(_) => StrategyName::Jwt,
        }
    }

    async fn authenticate(&self, input: StrategyInput) -> Result<Option<Identity>, AuthError> {
        match (self, input) {
            (Strategy::Login(strategy), StrategyInput::Credentials(credentials)) => {
                strategy.authenticate(credentials).await
            }
            (Strategy::Jwt(strategy), StrategyInput::BearerToken(token)) => {
                strategy.authenticate(token).await
            }
            (strategy, input) => Err(AuthError::UnsupportedInput {
                strategy: strategy.name().as_str(),
                input: input.kind(),
            }),
        }
    }
}

/// Named strategies invoked uniformly by route handlers.
///
/// Stateless: no session is stored on success.
pub struct StrategyRegistry<UR: UserRepository> {
    strategies: HashMap<StrategyName, Strategy<UR>>,
}

impl<UR: UserRepository> StrategyRegistry<UR> {
    /// Register the "login" and "jwt" strategies over the given directory.
    pub fn new(
        directory: Arc<UR>,
        authenticator: Arc<Authenticator>,
        tokens: Arc<TokenIssuer>,
        options: StrategyOptions,
    ) -> Self {
        let mut strategies = HashMap::new();
        strategies.insert(
            StrategyName::Login,
            Strategy::Login(LoginStrategy {
                directory: Arc::clone(&directory),
                authenticator,
                uniform_errors: options.uniform_login_errors,
            }),
        );
        strategies.insert(
            StrategyName::Jwt,
            Strategy::Jwt(JwtStrategy { directory, tokens }),
        );

        Self { strategies }
    }

    /// Run the strategy registered under `name`.
    ///
    /// # Returns
    /// The authenticated identity, or `None` when the strategy succeeded
    /// without resolving one
    ///
    /// # Errors
    /// * `UnknownStrategy` - Nothing registered under `name`
    /// * `UnsupportedInput` - Input kind does not fit the strategy
    /// * `UserNotFound` / `InvalidCredentials` - Login rejected
    /// * `InvalidToken` - Token rejected
    /// * `Internal` - Directory, hashing or signing failure
    pub async fn authenticate(
        &self,
        name: StrategyName,
        input: StrategyInput,
    ) -> Result<Option<Identity>, AuthError> {
        let strategy = self
            .strategies
            .get(&name)
            .ok_or_else(|| AuthError::UnknownStrategy(name.to_string()))?;

        strategy.authenticate(input).await
    }
}
