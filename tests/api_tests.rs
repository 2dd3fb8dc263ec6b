// tests/api_tests.rs

use quiz_backend::{config::Config, routes, session::TestSessionStore, state::AppState};
use sqlx::sqlite::SqlitePoolOptions;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
///
/// Each test gets its own in-memory SQLite database, so tests are
/// isolated and need no external services.
async fn spawn_app() -> String {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        seed_file: "data/initial_questions.json".to_string(),
    };

    let state = AppState {
        pool,
        config,
        sessions: TestSessionStore::new(),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn register(client: &reqwest::Client, address: &str, username: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": username,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn login_token(client: &reqwest::Client, address: &str, username: &str) -> String {
    let body: serde_json::Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "username": username,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Login failed")
        .json()
        .await
        .expect("Failed to parse login json");

    body["token"].as_str().expect("Token not found").to_string()
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_works() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = register(&client, &address, "alice").await;

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], "alice");
    assert!(body["id"].as_i64().unwrap() >= 1);
    // The hash must never be serialized.
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Username too short
    let response = register(&client, &address, "yo").await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let first = register(&client, &address, "alice").await;
    assert_eq!(first.status().as_u16(), 201);

    let second = register(&client, &address, "alice").await;
    assert_eq!(second.status().as_u16(), 409);

    // Still exactly one user with that name: a login works and is unambiguous.
    let token = login_token(&client, &address, "alice").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    register(&client, &address, "bob").await;

    let bad_password = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"username": "bob", "password": "wrong"}))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_password.status().as_u16(), 401);

    let unknown_user = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"username": "nobody", "password": "password123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_user.status().as_u16(), 401);
}

#[tokio::test]
async fn logout_requires_authentication() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let anonymous = client
        .get(format!("{}/api/auth/logout", address))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);

    register(&client, &address, "carol").await;
    let token = login_token(&client, &address, "carol").await;

    let authed = client
        .get(format!("{}/api/auth/logout", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(authed.status().as_u16(), 200);
}

#[tokio::test]
async fn home_reports_identity() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let anonymous: serde_json::Value = client
        .get(format!("{}/", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(anonymous["authenticated"], false);

    register(&client, &address, "dave").await;
    let token = login_token(&client, &address, "dave").await;

    let authed: serde_json::Value = client
        .get(format!("{}/", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(authed["authenticated"], true);
    assert_eq!(authed["username"], "dave");
}

#[tokio::test]
async fn highscore_defaults_to_zero_for_unknown_user() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("{}/api/highscore/999", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["high_score"], 0);
}

#[tokio::test]
async fn signup_creates_a_zero_score_row() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = register(&client, &address, "erin").await;
    let user: serde_json::Value = response.json().await.unwrap();
    let user_id = user["id"].as_i64().unwrap();

    let body: serde_json::Value = client
        .get(format!("{}/api/highscore/{}", address, user_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["high_score"], 0);
}

#[tokio::test]
async fn question_list_never_leaks_answers() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{}/api/admin/questions", address))
        .json(&serde_json::json!({
            "content": "What is the capital of France?",
            "topic": "geography",
            "answer": "Paris",
            "q_type": "multiple_choice",
            "options": ["Paris", "Lyon", "Marseille", "Toulouse"],
            "points": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 201);

    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/api/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["content"], "What is the capital of France?");
    assert!(questions[0].get("answer").is_none());
    assert!(questions[0].get("options").is_none());
}

#[tokio::test]
async fn create_question_applies_defaults_and_sanitizes() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // No options, no points: short-answer question defaulting to 1 point.
    let created = client
        .post(format!("{}/api/admin/questions", address))
        .json(&serde_json::json!({
            "content": "What is 12 * 12?<script>alert(1)</script>",
            "topic": "math",
            "answer": "144",
            "q_type": "short_answer"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 201);

    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/api/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(questions[0]["content"], "What is 12 * 12?");
}

#[tokio::test]
async fn delete_question_handles_unknown_ids() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let missing = client
        .delete(format!("{}/api/admin/questions/42", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    let created: serde_json::Value = client
        .post(format!("{}/api/admin/questions", address))
        .json(&serde_json::json!({
            "content": "How many sides does a hexagon have?",
            "topic": "math",
            "answer": "6",
            "q_type": "short_answer"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let deleted = client
        .delete(format!("{}/api/admin/questions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    let questions: Vec<serde_json::Value> = client
        .get(format!("{}/api/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(questions.is_empty());
}
