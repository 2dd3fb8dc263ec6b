// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{CreateUserRequest, LoginRequest, User},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt},
    },
};

/// Identity context for the home page.
///
/// Reports whether the caller presented a valid token, and for whom.
pub async fn home(Extension(claims): Extension<Option<Claims>>) -> impl IntoResponse {
    match claims {
        Some(claims) => Json(json!({
            "authenticated": true,
            "username": claims.username,
        })),
        None => Json(json!({
            "authenticated": false,
        })),
    }
}

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it, and creates the
/// user's zero-valued score row in the same request. Duplicate usernames
/// are rejected with 409 before the insert; the UNIQUE constraint on
/// `users.username` backs that check up.
pub async fn register(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?")
        .bind(&payload.username)
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Username '{}' already exists",
            payload.username
        )));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES (?, ?)
        RETURNING id, username, password_hash, created_at
        "#,
    )
    .bind(&payload.username)
    .bind(&hashed_password)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            AppError::Conflict(format!("Username '{}' already exists", payload.username))
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    sqlx::query("INSERT INTO user_scores (user_id, high_score) VALUES (?, 0)")
        .bind(user.id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create score row for user {}: {:?}", user.id, e);
            AppError::from(e)
        })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns a JWT token.
///
/// Verifies the username and password against the database.
/// If valid, signs a JWT token with the user's ID.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let user = user.ok_or(AppError::AuthError("User not found".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password_hash)?;

    if !is_valid {
        return Err(AppError::AuthError("Invalid password".to_string()));
    }

    let token = sign_jwt(
        user.id,
        &user.username,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
    })))
}

/// Ends the caller's session.
///
/// Tokens are stateless, so there is nothing to revoke server-side; the
/// route exists to keep the logout boundary explicit and authenticated.
pub async fn logout(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    tracing::info!("User {} logged out", claims.username);
    Json(json!({
        "message": "Logged out. Discard the token client-side.",
    }))
}
