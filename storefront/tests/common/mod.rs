use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use serde_json::json;
use serde_json::Value;
use storefront::domain::user::errors::UserError;
use storefront::domain::user::models::User;
use storefront::domain::user::models::UserId;
use storefront::domain::user::ports::UserRepository;
use storefront::inbound::http::router::create_router;
use storefront::inbound::http::router::AppState;
use storefront::inbound::http::router::SessionSettings;
use tokio::sync::RwLock;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User directory kept in memory, enforcing email uniqueness like the
/// `users_email_key` constraint does in Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Drop a user, simulating an account deleted while its token is live.
    pub async fn remove(&self, email: &str) -> Option<User> {
        let mut users = self.users.write().await;
        let id = users
            .values()
            .find(|user| user.email.as_str() == email)
            .map(|user| user.id)?;
        users.remove(&id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(SessionSettings::default()).await
    }

    /// Spawn the application in a background task with explicit session settings
    pub async fn spawn_with(settings: SessionSettings) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let state = AppState::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
            settings,
        );
        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            repository,
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response body.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/sessions/register")
            .json(&json!({
                "first_name": "Ana",
                "last_name": "Lee",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the token from the response body.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/sessions/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token in login response")
            .to_string()
    }
}

/// Flip the first character of the signature segment.
pub fn tamper_signature(token: &str) -> String {
    let (head, signature) = token.rsplit_once('.').expect("Token has no signature");
    let mut chars = signature.chars();
    let first = chars.next().expect("Empty signature");
    let replacement = if first == 'A' { 'B' } else { 'A' };
    format!("{}.{}{}", head, replacement, chars.as_str())
}
