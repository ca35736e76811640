//! Test utilities and common setup.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header},
};
use serde_json::Value;
use tower::ServiceExt;

use parley::api::{self, AppState};
use parley::auth::{AUTH_TOKEN_HEADER, AuthConfig, AuthState, Role};
use parley::chat::ChatRepository;
use parley::db::Database;
use parley::ollama::OllamaClient;
use parley::user::{UserRepository, UserService};

/// A test application with handles to the services behind it.
pub struct TestApp {
    pub router: Router,
    pub users: UserService,
}

/// Create a test AuthConfig with a JWT secret for testing.
fn test_auth_config(token_ttl_secs: i64) -> AuthConfig {
    AuthConfig {
        jwt_secret: Some("test-secret-for-integration-tests-minimum-32-chars".to_string()),
        token_ttl_secs,
        ..AuthConfig::default()
    }
}

/// Create a test application with all services initialized.
///
/// The Ollama endpoint points at an unroutable port so chat tests
/// exercise the upstream-failure path deterministically.
pub async fn test_app() -> TestApp {
    test_app_with_ttl(3600).await
}

/// Create a test application whose tokens live for the given duration.
pub async fn test_app_with_ttl(token_ttl_secs: i64) -> TestApp {
    // Use in-memory database for tests
    let db = Database::in_memory().await.unwrap();

    let auth_state = AuthState::new(test_auth_config(token_ttl_secs));

    let users = UserService::new(UserRepository::new(db.pool().clone()));
    let chats = ChatRepository::new(db.pool().clone());

    // Nothing listens on port 1
    let ollama = OllamaClient::new("http://127.0.0.1:1");

    let state = AppState::new(users.clone(), chats, auth_state, ollama);
    TestApp {
        router: api::create_router(state),
        users,
    }
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Build a JSON request authenticated with the given token.
pub fn authed_json_request(method: Method, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .header(AUTH_TOKEN_HEADER, token)
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Build a bodyless request authenticated with the given token.
pub fn authed_request(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(AUTH_TOKEN_HEADER, token)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user through the API and return (token, user body).
pub async fn register(app: &TestApp, username: &str, password: &str) -> (String, Value) {
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            &serde_json::json!({"username": username, "password": password}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["token"].as_str().unwrap().to_string();
    (token, json["user"].clone())
}

/// Log in through the API and return a fresh token.
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            &serde_json::json!({"username": username, "password": password}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}

/// Set a user's role directly through the service layer.
///
/// Role changes only show up in tokens issued afterwards, so callers
/// log in again after promoting.
pub async fn promote(app: &TestApp, username: &str, role: Role) {
    let user = app
        .users
        .get_user_by_username(username)
        .await
        .unwrap()
        .expect("user to promote must exist");
    app.users.update_role(&user.id, role).await.unwrap();
}
