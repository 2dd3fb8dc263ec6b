// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{error::AppError, models::question::CreateQuestionRequest, utils::html::clean_html};

/// Creates a new quiz question.
pub async fn create_question(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // Sanitize the fields any client will render.
    let content = clean_html(&payload.content);
    let options_json = payload
        .options
        .map(|opts| {
            let cleaned: Vec<String> = opts.iter().map(|o| clean_html(o)).collect();
            serde_json::to_string(&cleaned)
        })
        .transpose()?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions (content, topic, answer, q_type, options, points)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&content)
    .bind(&payload.topic)
    .bind(&payload.answer)
    .bind(&payload.q_type)
    .bind(&options_json)
    .bind(payload.points)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// Deletes a quiz question by ID.
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
