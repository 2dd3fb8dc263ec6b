// src/models/score.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'user_scores' table in the database.
/// One row per user, created with a zero score at signup.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserScore {
    pub id: i64,
    pub user_id: i64,
    pub high_score: i64,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// Aggregated struct for displaying the leaderboard.
/// Represents a row joined from `users` and `user_scores`.
#[derive(Debug, Serialize, FromRow)]
pub struct LeaderboardEntry {
    pub username: String,
    pub high_score: i64,
}

/// DTO for `/api/highscore/{user_id}`.
#[derive(Debug, Serialize)]
pub struct HighScoreResponse {
    pub high_score: i64,
}
