// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, question, test},
    state::AppState,
    utils::jwt::{auth_middleware, optional_auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, questions, admin, test).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, session store).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let home_route = Router::new().route("/", get(auth::home)).layer(
        middleware::from_fn_with_state(state.clone(), optional_auth_middleware),
    );

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Protected: logout requires an authenticated identity.
        .merge(
            Router::new()
                .route("/logout", get(auth::logout))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let question_routes = Router::new().route("/", get(question::list_questions));

    let admin_routes = Router::new()
        .route("/questions", post(admin::create_question))
        .route("/questions/{id}", delete(admin::delete_question));

    let test_routes = Router::new()
        // Viewing pages and recording answers works without a login;
        // identity only enriches the page with the caller's best score.
        .route("/", get(test::test_page).post(test::record_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ))
        // Protected: scoring is attributed to the authenticated user.
        .merge(
            Router::new()
                .route("/submit", post(test::submit))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    Router::new()
        .merge(home_route)
        .nest("/api/auth", auth_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/test", test_routes)
        .route("/api/leaderboard", get(test::get_leaderboard))
        .route("/api/highscore/{user_id}", get(test::get_highscore))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
