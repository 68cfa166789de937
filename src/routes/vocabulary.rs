use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::vocab::{validate_context, validate_word, VocabEntry};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddWordRequest {
    pub word: String,
    pub translation: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteWordResponse {
    pub success: bool,
}

/// The user's vocabulary book, newest first
pub async fn list_words(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<VocabEntry>>> {
    let words: Vec<VocabEntry> = sqlx::query_as(
        r"
        SELECT id, user_id, word, translation, context, created_at
        FROM vocab_entries
        WHERE user_id = ?1
        ORDER BY created_at DESC
        ",
    )
    .bind(&user.user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(words))
}

/// Collect a word, typically highlighted in the reading module
pub async fn add_word(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddWordRequest>,
) -> Result<Json<VocabEntry>> {
    validate_word(&payload.word)?;
    validate_context(payload.context.as_deref())?;

    let entry = VocabEntry {
        id: Uuid::new_v4().to_string(),
        user_id: user.user_id,
        word: payload.word.trim().to_string(),
        translation: payload.translation,
        context: payload.context,
        created_at: Utc::now(),
    };

    sqlx::query(
        r"
        INSERT INTO vocab_entries (id, user_id, word, translation, context, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ",
    )
    .bind(&entry.id)
    .bind(&entry.user_id)
    .bind(&entry.word)
    .bind(&entry.translation)
    .bind(&entry.context)
    .bind(entry.created_at)
    .execute(&state.pool)
    .await?;

    Ok(Json(entry))
}

/// Remove a word from the book
///
/// Scoped to the owner; deleting someone else's entry reads as not-found.
pub async fn delete_word(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteWordResponse>> {
    let result = sqlx::query("DELETE FROM vocab_entries WHERE id = ?1 AND user_id = ?2")
        .bind(&id)
        .bind(&user.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::WordNotFound);
    }

    Ok(Json(DeleteWordResponse { success: true }))
}
