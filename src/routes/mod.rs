pub mod auth;
pub mod dashboard;
pub mod essays;
pub mod health;
pub mod listening;
pub mod reading;
pub mod speaking;
pub mod streak;
pub mod vocabulary;
pub mod writing;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::AppState;

/// The full API surface; `main` layers CORS and tracing on top
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/streak", get(streak::get_streak))
        .route("/api/streak/check-in", post(streak::check_in))
        .route(
            "/api/vocabulary",
            get(vocabulary::list_words).post(vocabulary::add_word),
        )
        .route("/api/vocabulary/:id", delete(vocabulary::delete_word))
        .route(
            "/api/essays",
            post(essays::submit_essay).get(essays::list_essays),
        )
        .route("/api/essays/:id/grade", post(essays::grade_essay))
        .route("/api/reading/article", get(reading::get_article))
        .route("/api/dashboard", get(dashboard::get_stats))
        .route("/api/listening/script", post(listening::generate_script))
        .route("/api/listening/dictation", post(listening::analyze_dictation))
        .route("/api/writing/question", post(writing::generate_question))
        .route("/api/writing/sample", post(writing::sample_essay))
        .route("/api/writing/copilot", post(writing::copilot))
        .route("/api/speaking/turn", post(speaking::speaking_turn))
        .with_state(state)
}
