use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::streak::{streak_status, StreakRecord};
use crate::AppState;

/// Aggregates behind the dashboard landing page
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    #[serde(rename = "vocabCount")]
    pub vocab_count: i64,
    #[serde(rename = "essayCount")]
    pub essay_count: i64,
    #[serde(rename = "totalWords")]
    pub total_words: i64,
    pub streak: i64,
    #[serde(rename = "checkedIn")]
    pub checked_in: bool,
}

/// Collect the dashboard counters in one round trip per table
pub async fn get_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DashboardStats>> {
    let vocab_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM vocab_entries WHERE user_id = ?1")
            .bind(&user.user_id)
            .fetch_one(&state.pool)
            .await?;

    let essay_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM essays WHERE user_id = ?1")
        .bind(&user.user_id)
        .fetch_one(&state.pool)
        .await?;

    let total_words: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(word_count), 0) FROM essays WHERE user_id = ?1",
    )
    .bind(&user.user_id)
    .fetch_one(&state.pool)
    .await?;

    let status = read_streak(&state.pool, &user.user_id).await;

    Ok(Json(DashboardStats {
        vocab_count,
        essay_count,
        total_words,
        streak: status.0,
        checked_in: status.1,
    }))
}

/// Streak numbers for the dashboard card; read failures degrade to zero
/// exactly like the dedicated streak endpoint
async fn read_streak(pool: &SqlitePool, user_id: &str) -> (i64, bool) {
    let record: sqlx::Result<Option<StreakRecord>> = sqlx::query_as(
        r"
        SELECT user_id, current_streak, last_check_in_date, updated_at
        FROM user_streaks
        WHERE user_id = ?1
        ",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await;

    let record = match record {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Dashboard streak read failed: {e}");
            None
        }
    };

    let status = streak_status(record.as_ref(), Utc::now().date_naive());
    (status.streak, status.checked_in)
}
