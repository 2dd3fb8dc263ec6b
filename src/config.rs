// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Number of questions shown per test page.
pub const QUESTIONS_PER_PAGE: i64 = 5;

/// Number of entries returned on the leaderboard.
pub const LEADERBOARD_SIZE: i64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub seed_file: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:quiz.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let seed_file =
            env::var("SEED_FILE").unwrap_or_else(|_| "data/initial_questions.json".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            seed_file,
        }
    }
}
