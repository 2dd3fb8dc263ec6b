// src/main.rs

use quiz_backend::config::Config;
use quiz_backend::routes;
use quiz_backend::session::TestSessionStore;
use quiz_backend::state::AppState;
use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (.env included)
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    // Seed Questions
    if let Err(e) = seed_questions(&pool, &config).await {
        tracing::error!("Failed to seed questions: {:?}", e);
    }

    // Create AppState
    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        sessions: TestSessionStore::new(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

#[derive(Debug, Deserialize)]
struct SeedQuestion {
    content: String,
    topic: String,
    answer: String,
    q_type: String,
    options: Option<Vec<String>>,
    #[serde(default = "default_points")]
    points: i64,
}

fn default_points() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    questions: Vec<SeedQuestion>,
}

/// Loads the initial question bank from the configured JSON file, only
/// if the questions table is empty.
async fn seed_questions(
    pool: &SqlitePool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    let raw = std::fs::read_to_string(&config.seed_file)?;
    let seed: SeedFile = serde_json::from_str(&raw)?;

    tracing::info!(
        "Seeding {} questions from {}",
        seed.questions.len(),
        config.seed_file
    );

    for q in &seed.questions {
        let options_json = q.options.as_ref().map(serde_json::to_string).transpose()?;

        sqlx::query(
            r#"
            INSERT INTO questions (content, topic, answer, q_type, options, points)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&q.content)
        .bind(&q.topic)
        .bind(&q.answer)
        .bind(&q.q_type)
        .bind(&options_json)
        .bind(q.points)
        .execute(pool)
        .await?;
    }

    tracing::info!("Question bank seeded successfully.");
    Ok(())
}
