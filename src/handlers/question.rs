// src/handlers/question.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{error::AppError, models::question::QuestionSummary};

/// Lists all questions as `{id, content}` pairs.
///
/// Canonical answers never leave the store through this route.
pub async fn list_questions(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, (i64, String)>("SELECT id, content FROM questions")
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let summaries: Vec<QuestionSummary> = questions
        .into_iter()
        .map(|(id, content)| QuestionSummary { id, content })
        .collect();

    Ok(Json(summaries))
}
