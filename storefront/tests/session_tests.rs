mod common;

use std::time::Duration;

use auth::Claims;
use common::tamper_signature;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;
use storefront::domain::user::ports::UserRepository;
use storefront::inbound::http::router::SessionSettings;

const EMAIL: &str = "ana@x.com";
const PASSWORD: &str = "p@ss1234";

#[tokio::test]
async fn test_register_login_current_logout() {
    let app = TestApp::spawn().await;

    let body = app.register(EMAIL, PASSWORD).await;
    assert_eq!(body["message"], "User created");
    assert_eq!(body["user"]["email"], EMAIL);
    assert_eq!(body["user"]["first_name"], "Ana");
    assert_eq!(body["user"]["last_name"], "Lee");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"]["id"].is_string());
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let response = app
        .post("/api/sessions/login")
        .json(&json!({ "email": EMAIL, "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .cookies()
        .find(|c| c.name() == "jwtCookie")
        .expect("Missing jwtCookie");
    assert!(cookie.http_only());
    assert!(!cookie.secure());
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(Duration::from_secs(3600)));
    let cookie_value = cookie.value().to_string();

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().expect("Missing token").to_string();
    assert_eq!(cookie_value, token);

    let response = app
        .get_authenticated("/api/sessions/current", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["user"]["email"], EMAIL);
    assert_eq!(body["user"]["last_name"], "Lee");
    assert!(body["user"].get("age").is_none());
    assert!(body["user"].get("password_hash").is_none());

    let response = app
        .post("/api/sessions/logout")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .cookies()
        .find(|c| c.name() == "jwtCookie")
        .expect("Logout did not clear jwtCookie");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Session closed");
}

#[tokio::test]
async fn test_logout_without_session_still_clears_cookie() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/sessions/logout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.cookies().any(|c| c.name() == "jwtCookie"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register(EMAIL, PASSWORD).await;

    let response = app
        .post("/api/sessions/register")
        .json(&json!({
            "first_name": "Other",
            "last_name": "Person",
            "email": EMAIL,
            "password": "different"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/sessions/register")
        .json(&json!({
            "first_name": "Ana",
            "email": EMAIL,
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Missing required fields");

    assert!(app.repository.find_by_email(EMAIL).await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/sessions/register")
        .json(&json!({
            "first_name": "Ana",
            "last_name": "Lee",
            "email": "not-an-email",
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid email"));
}

#[tokio::test]
async fn test_register_keeps_optional_age() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/sessions/register")
        .json(&json!({
            "first_name": "Ana",
            "last_name": "Lee",
            "email": EMAIL,
            "age": 30,
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["age"], 30);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.register(EMAIL, PASSWORD).await;

    let response = app
        .post("/api/sessions/login")
        .json(&json!({ "email": EMAIL, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("set-cookie").is_none());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Incorrect password");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/sessions/login")
        .json(&json!({ "email": "nobody@x.com", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("set-cookie").is_none());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_login_missing_credentials() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/sessions/login")
        .json(&json!({ "email": EMAIL }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Missing credentials");
}

#[tokio::test]
async fn test_login_uniform_errors() {
    let app = TestApp::spawn_with(SessionSettings {
        uniform_login_errors: true,
        ..SessionSettings::default()
    })
    .await;
    app.register(EMAIL, PASSWORD).await;

    for (email, password) in [("nobody@x.com", PASSWORD), (EMAIL, "wrong")] {
        let response = app
            .post("/api/sessions/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_current_missing_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/sessions/current")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Missing bearer token");
}

#[tokio::test]
async fn test_current_ignores_cookie_without_bearer() {
    let app = TestApp::spawn().await;
    app.register(EMAIL, PASSWORD).await;
    // Leaves jwtCookie in the client's cookie store.
    app.login(EMAIL, PASSWORD).await;

    let response = app
        .get("/api/sessions/current")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_tampered_token() {
    let app = TestApp::spawn().await;
    app.register(EMAIL, PASSWORD).await;
    let token = app.login(EMAIL, PASSWORD).await;

    let response = app
        .get_authenticated("/api/sessions/current", &tamper_signature(&token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_current_expired_token() {
    let app = TestApp::spawn().await;
    let body = app.register(EMAIL, PASSWORD).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let claims = Claims::for_user(user_id, EMAIL, "user", chrono::Duration::seconds(-60));
    let token = app.authenticator.generate_token(&claims).unwrap();

    let response = app
        .get_authenticated("/api/sessions/current", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_current_token_from_other_secret() {
    let app = TestApp::spawn().await;
    let body = app.register(EMAIL, PASSWORD).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let forger = auth::Authenticator::new(b"some-other-secret-of-sufficient-length!!");
    let claims = Claims::for_user(user_id, EMAIL, "admin", chrono::Duration::hours(1));
    let token = forger.generate_token(&claims).unwrap();

    let response = app
        .get_authenticated("/api/sessions/current", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_after_user_deleted() {
    let app = TestApp::spawn().await;
    app.register(EMAIL, PASSWORD).await;
    let token = app.login(EMAIL, PASSWORD).await;

    assert!(app.repository.remove(EMAIL).await.is_some());

    let response = app
        .get_authenticated("/api/sessions/current", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_stays_valid_after_logout() {
    let app = TestApp::spawn().await;
    app.register(EMAIL, PASSWORD).await;
    let token = app.login(EMAIL, PASSWORD).await;

    app.post("/api/sessions/logout")
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get_authenticated("/api/sessions/current", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}
