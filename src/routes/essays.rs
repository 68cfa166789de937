use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::llm::types::EssayGrade;
use crate::llm::{prompts, ChatParams};
use crate::models::essay::{count_words, validate_essay, Essay};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitEssayRequest {
    pub question: String,
    pub content: String,
}

/// Save a writing submission
///
/// Persistence is decoupled from grading: the essay is stored first and the
/// caller asks for a grade in a separate request.
pub async fn submit_essay(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SubmitEssayRequest>,
) -> Result<Json<Essay>> {
    validate_essay(&payload.content)?;
    if payload.question.trim().is_empty() {
        return Err(AppError::InvalidInput("Question must not be empty".to_string()));
    }

    let essay = Essay {
        id: Uuid::new_v4().to_string(),
        user_id: user.user_id,
        question: payload.question,
        word_count: count_words(&payload.content),
        content: payload.content,
        grade: None,
        created_at: Utc::now(),
    };

    sqlx::query(
        r"
        INSERT INTO essays (id, user_id, question, content, word_count, grade, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)
        ",
    )
    .bind(&essay.id)
    .bind(&essay.user_id)
    .bind(&essay.question)
    .bind(&essay.content)
    .bind(essay.word_count)
    .bind(essay.created_at)
    .execute(&state.pool)
    .await?;

    Ok(Json(essay))
}

/// The user's submissions, newest first
pub async fn list_essays(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Essay>>> {
    let essays: Vec<Essay> = sqlx::query_as(
        r"
        SELECT id, user_id, question, content, word_count, grade, created_at
        FROM essays
        WHERE user_id = ?1
        ORDER BY created_at DESC
        ",
    )
    .bind(&user.user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(essays))
}

/// Grade a stored essay against the four band criteria
///
/// The grading report is persisted on the essay row after a successful call;
/// re-grading overwrites the previous report.
pub async fn grade_essay(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<EssayGrade>> {
    let essay: Option<Essay> = sqlx::query_as(
        r"
        SELECT id, user_id, question, content, word_count, grade, created_at
        FROM essays
        WHERE id = ?1 AND user_id = ?2
        ",
    )
    .bind(&id)
    .bind(&user.user_id)
    .fetch_optional(&state.pool)
    .await?;

    let essay = essay.ok_or(AppError::EssayNotFound)?;

    let messages = prompts::essay_grading(&essay.question, &essay.content);
    let grade: EssayGrade = state
        .llm
        .chat_json("essay_grading", &messages, ChatParams::json())
        .await?;

    let stored = serde_json::to_string(&grade)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Grade serialization failed: {e}")))?;

    sqlx::query("UPDATE essays SET grade = ?1 WHERE id = ?2")
        .bind(&stored)
        .bind(&essay.id)
        .execute(&state.pool)
        .await?;

    tracing::info!("Essay graded: overall {}", grade.overall_score);

    Ok(Json(grade))
}
