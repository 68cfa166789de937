//! Integration tests for the IELTS Prep Server API
//!
//! These tests verify the complete request/response cycle for all endpoints.
//! AI-backed endpoints run against a stub chat-completions provider.

mod common;

use axum::http::StatusCode;
use chrono::{Days, Utc};
use serde_json::json;
use tower::ServiceExt;

use common::{
    body_to_json, make_request, signup_user, spawn_llm_failure_stub, spawn_llm_stub, test_app,
};

/// Endpoint for tests that never reach the LLM
const NO_LLM: &str = "http://127.0.0.1:9";

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check_returns_healthy() {
    let (_pool, app) = test_app(NO_LLM).await;

    let response = app
        .oneshot(make_request("GET", "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["version"].as_str().is_some());
}

// =============================================================================
// Auth Tests
// =============================================================================

#[tokio::test]
async fn test_signup_and_login_flow() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, user_id) = signup_user(&app, "student@example.com").await;
    assert!(!token.is_empty());
    assert!(!user_id.is_empty());

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "student@example.com", "password": "password123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["userId"], user_id.as_str());
}

#[tokio::test]
async fn test_signup_duplicate_email_returns_conflict() {
    let (_pool, app) = test_app(NO_LLM).await;

    signup_user(&app, "dup@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "dup@example.com", "password": "password123" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_invalid_credentials() {
    let (_pool, app) = test_app(NO_LLM).await;

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "not-an-email", "password": "password123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "ok@example.com", "password": "short" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let (_pool, app) = test_app(NO_LLM).await;

    signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "student@example.com", "password": "wrong-password" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let (_pool, app) = test_app(NO_LLM).await;

    let response = app
        .clone()
        .oneshot(make_request("GET", "/api/vocabulary", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(make_request(
            "GET",
            "/api/vocabulary",
            Some("made-up-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .clone()
        .oneshot(make_request("POST", "/api/auth/logout", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(make_request("GET", "/api/vocabulary", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Streak Tests
// =============================================================================

#[tokio::test]
async fn test_streak_zero_state_for_new_user() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request("GET", "/api/streak", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["streak"], 0);
    assert_eq!(body["checkedIn"], false);
}

#[tokio::test]
async fn test_streak_read_without_identity_returns_zero_state() {
    let (_pool, app) = test_app(NO_LLM).await;

    let response = app
        .oneshot(make_request("GET", "/api/streak", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["streak"], 0);
    assert_eq!(body["checkedIn"], false);
}

#[tokio::test]
async fn test_check_in_without_identity_reports_failure() {
    let (_pool, app) = test_app(NO_LLM).await;

    let response = app
        .oneshot(make_request("POST", "/api/streak/check-in", None, None))
        .await
        .unwrap();

    // Never an HTTP error, just an unsuccessful result
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_first_check_in_starts_streak_at_one() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/streak/check-in",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["streak"], 1);

    // Read reflects the write immediately
    let response = app
        .oneshot(make_request("GET", "/api/streak", Some(&token), None))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["streak"], 1);
    assert_eq!(body["checkedIn"], true);
}

#[tokio::test]
async fn test_same_day_check_in_is_idempotent() {
    let (pool, app) = test_app(NO_LLM).await;

    let (token, user_id) = signup_user(&app, "student@example.com").await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(make_request(
                "POST",
                "/api/streak/check-in",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["streak"], 1);
    }

    let stored: i64 =
        sqlx::query_scalar("SELECT current_streak FROM user_streaks WHERE user_id = ?1")
            .bind(&user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn test_consecutive_day_check_in_continues_streak() {
    let (pool, app) = test_app(NO_LLM).await;

    let (token, user_id) = signup_user(&app, "student@example.com").await;

    let today = Utc::now().date_naive();
    let yesterday = today.pred_opt().unwrap();

    sqlx::query(
        "INSERT INTO user_streaks (user_id, current_streak, last_check_in_date, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&user_id)
    .bind(4i64)
    .bind(yesterday)
    .bind(Utc::now())
    .execute(&pool)
    .await
    .unwrap();

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/streak/check-in",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["streak"], 5);

    let stored_date: chrono::NaiveDate =
        sqlx::query_scalar("SELECT last_check_in_date FROM user_streaks WHERE user_id = ?1")
            .bind(&user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored_date, today);
}

#[tokio::test]
async fn test_gap_resets_streak_to_one() {
    let (pool, app) = test_app(NO_LLM).await;

    let (token, user_id) = signup_user(&app, "student@example.com").await;

    let five_days_ago = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(5))
        .unwrap();

    sqlx::query(
        "INSERT INTO user_streaks (user_id, current_streak, last_check_in_date, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&user_id)
    .bind(9i64)
    .bind(five_days_ago)
    .bind(Utc::now())
    .execute(&pool)
    .await
    .unwrap();

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/streak/check-in",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["streak"], 1);
}

// =============================================================================
// Vocabulary Tests
// =============================================================================

#[tokio::test]
async fn test_vocab_add_list_delete_cycle() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/vocabulary",
            Some(&token),
            Some(json!({ "word": "serendipity", "context": "Seen in the reading module." })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let added = body_to_json(response.into_body()).await;
    let id = added["id"].as_str().unwrap().to_string();
    assert_eq!(added["word"], "serendipity");

    let response = app
        .clone()
        .oneshot(make_request("GET", "/api/vocabulary", Some(&token), None))
        .await
        .unwrap();
    let listed = body_to_json(response.into_body()).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(make_request(
            "DELETE",
            &format!("/api/vocabulary/{id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(make_request("GET", "/api/vocabulary", Some(&token), None))
        .await
        .unwrap();
    let listed = body_to_json(response.into_body()).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_vocab_delete_unknown_id_is_not_found() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "DELETE",
            "/api/vocabulary/no-such-id",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vocab_rejects_empty_word() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/vocabulary",
            Some(&token),
            Some(json!({ "word": "   " })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vocab_is_scoped_to_its_owner() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (owner_token, _) = signup_user(&app, "owner@example.com").await;
    let (intruder_token, _) = signup_user(&app, "intruder@example.com").await;

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/vocabulary",
            Some(&owner_token),
            Some(json!({ "word": "hegemony" })),
        ))
        .await
        .unwrap();
    let added = body_to_json(response.into_body()).await;
    let id = added["id"].as_str().unwrap();

    // The other account can neither see nor delete it
    let response = app
        .clone()
        .oneshot(make_request(
            "GET",
            "/api/vocabulary",
            Some(&intruder_token),
            None,
        ))
        .await
        .unwrap();
    let listed = body_to_json(response.into_body()).await;
    assert!(listed.as_array().unwrap().is_empty());

    let response = app
        .oneshot(make_request(
            "DELETE",
            &format!("/api/vocabulary/{id}"),
            Some(&intruder_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Essay Tests
// =============================================================================

#[tokio::test]
async fn test_essay_submission_computes_word_count() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/essays",
            Some(&token),
            Some(json!({
                "question": "Some people think technology makes life more complex.",
                "content": "Modern technology has without doubt reshaped daily life."
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["wordCount"], 8);
    assert!(body["grade"].is_null());
}

#[tokio::test]
async fn test_essay_rejects_empty_content() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/essays",
            Some(&token),
            Some(json!({ "question": "Q", "content": "   " })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_essay_grading_persists_report() {
    let grade = json!({
        "overall_score": "6.5",
        "breakdown": { "TR": 6, "CC": 7, "LR": 6, "GRA": 7 },
        "feedback": "A solid response with room to grow.",
        "suggestions": ["Vary sentence openings", "Tighten paragraph two"]
    });
    let llm = spawn_llm_stub(&grade.to_string()).await;
    let (_pool, app) = test_app(&llm).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/essays",
            Some(&token),
            Some(json!({ "question": "Discuss.", "content": "Some people believe..." })),
        ))
        .await
        .unwrap();
    let essay = body_to_json(response.into_body()).await;
    let id = essay["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            &format!("/api/essays/{id}/grade"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["overall_score"], "6.5");
    assert_eq!(body["breakdown"]["CC"], 7.0);

    // The report is stored on the essay row
    let response = app
        .oneshot(make_request("GET", "/api/essays", Some(&token), None))
        .await
        .unwrap();
    let essays = body_to_json(response.into_body()).await;
    let stored = essays[0]["grade"].as_str().unwrap();
    assert!(stored.contains("6.5"));
}

#[tokio::test]
async fn test_grading_unknown_essay_is_not_found() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/essays/no-such-essay/grade",
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Reading & Dashboard Tests
// =============================================================================

#[tokio::test]
async fn test_reading_article_is_served_from_seed() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request("GET", "/api/reading/article", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["title"], "The Secret Life of Urban Foxes");
    assert!(body["questions"].as_array().unwrap().len() >= 3);
}

#[tokio::test]
async fn test_dashboard_aggregates_user_activity() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    for word in ["meticulous", "arduous"] {
        let response = app
            .clone()
            .oneshot(make_request(
                "POST",
                "/api/vocabulary",
                Some(&token),
                Some(json!({ "word": word })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/essays",
            Some(&token),
            Some(json!({ "question": "Q", "content": "five words are written here" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(make_request(
            "POST",
            "/api/streak/check-in",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(make_request("GET", "/api/dashboard", Some(&token), None))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["vocabCount"], 2);
    assert_eq!(body["essayCount"], 1);
    assert_eq!(body["totalWords"], 5);
    assert_eq!(body["streak"], 1);
    assert_eq!(body["checkedIn"], true);
}

// =============================================================================
// LLM Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_listening_script_generation() {
    let script = json!({
        "title": "Booking a Hotel",
        "script": [
            { "speaker": "Man", "text": "Good morning, Seaview Hotel." },
            { "speaker": "Woman", "text": "Hi, I'd like to book a double room for Friday." }
        ]
    });
    let llm = spawn_llm_stub(&script.to_string()).await;
    let (_pool, app) = test_app(&llm).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/listening/script",
            Some(&token),
            Some(json!({ "topic": "Booking a Hotel" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["title"], "Booking a Hotel");
    assert_eq!(body["script"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_llm_output_is_bad_gateway() {
    let llm = spawn_llm_stub("Sure! Here is your script: ...").await;
    let (_pool, app) = test_app(&llm).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/listening/script",
            Some(&token),
            Some(json!({ "topic": null })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_failing_llm_provider_is_bad_gateway() {
    let llm = spawn_llm_failure_stub().await;
    let (_pool, app) = test_app(&llm).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/listening/script",
            Some(&token),
            Some(json!({ "topic": "Gym Membership" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_dictation_analysis_requires_both_texts() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/listening/dictation",
            Some(&token),
            Some(json!({ "original": "Hello there.", "dictated": "" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_writing_question_generation() {
    let question = json!({
        "title": "Letter to a Landlord",
        "content": "You have been renting a flat whose heating no longer works...",
        "type": "task1"
    });
    let llm = spawn_llm_stub(&question.to_string()).await;
    let (_pool, app) = test_app(&llm).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/writing/question",
            Some(&token),
            Some(json!({ "taskType": "task1", "topic": "housing" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["type"], "task1");
}

#[tokio::test]
async fn test_copilot_returns_plain_text() {
    let llm = spawn_llm_stub("Focus on the two-part structure of the question.").await;
    let (_pool, app) = test_app(&llm).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/writing/copilot",
            Some(&token),
            Some(json!({ "intent": "analyze", "question": "Discuss both views." })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert!(body["content"]
        .as_str()
        .unwrap()
        .contains("two-part structure"));
}

#[tokio::test]
async fn test_speaking_turn_returns_reply_and_analysis() {
    let turn = json!({
        "reply": "Interesting. What do you usually do at weekends?",
        "analysis": "Prefer 'keen on' over 'very liking'."
    });
    let llm = spawn_llm_stub(&turn.to_string()).await;
    let (_pool, app) = test_app(&llm).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/speaking/turn",
            Some(&token),
            Some(json!({
                "history": [
                    { "role": "assistant", "content": "Tell me about your hometown." },
                    { "role": "user", "content": "I am very liking my hometown." }
                ],
                "input": "I live in a small coastal city."
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert!(body["reply"].as_str().unwrap().contains("weekends"));
    assert!(!body["analysis"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_speaking_turn_rejects_empty_input() {
    let (_pool, app) = test_app(NO_LLM).await;

    let (token, _) = signup_user(&app, "student@example.com").await;

    let response = app
        .oneshot(make_request(
            "POST",
            "/api/speaking/turn",
            Some(&token),
            Some(json!({ "history": [], "input": "  " })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
