use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::OptionalAuthUser;
use crate::models::streak::{decide_check_in, streak_status, CheckInDecision, StreakRecord, StreakStatus};
use crate::AppState;

/// Streak write result, the one endpoint that never maps failure to an
/// HTTP error: absent identity and persistence failure both come back as
/// `{"success": false}` so the optimistic caller can roll back uniformly.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckInResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<i64>,
}

impl CheckInResponse {
    fn failed() -> Self {
        Self {
            success: false,
            streak: None,
        }
    }

    fn succeeded(streak: i64) -> Self {
        Self {
            success: true,
            streak: Some(streak),
        }
    }
}

/// Current streak plus today's check-in status
///
/// No identity, no record, or a read error all collapse to the zero state.
pub async fn get_streak(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
) -> Json<StreakStatus> {
    let Some(user) = user else {
        return Json(StreakStatus::zero());
    };

    let today = Utc::now().date_naive();
    let record = match fetch_record(&state.pool, &user.user_id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Streak read failed, reporting zero state: {e}");
            None
        }
    };

    Json(streak_status(record.as_ref(), today))
}

/// Perform today's check-in
pub async fn check_in(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
) -> Json<CheckInResponse> {
    let Some(user) = user else {
        return Json(CheckInResponse::failed());
    };

    let today = Utc::now().date_naive();

    match apply_check_in(&state.pool, &user.user_id, today).await {
        Ok(streak) => Json(CheckInResponse::succeeded(streak)),
        Err(e) => {
            tracing::error!("Check-in persistence failed: {e}");
            Json(CheckInResponse::failed())
        }
    }
}

async fn fetch_record(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<StreakRecord>> {
    sqlx::query_as(
        r"
        SELECT user_id, current_streak, last_check_in_date, updated_at
        FROM user_streaks
        WHERE user_id = ?1
        ",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Run the decision table and persist its outcome
///
/// The same-day arm writes nothing; the others go through a single upsert,
/// so a failed write leaves the stored row exactly as it was.
async fn apply_check_in(pool: &SqlitePool, user_id: &str, today: NaiveDate) -> sqlx::Result<i64> {
    let record = fetch_record(pool, user_id).await?;

    match decide_check_in(record.as_ref(), today) {
        CheckInDecision::AlreadyCheckedIn(streak) => Ok(streak),
        CheckInDecision::Record(streak) => {
            sqlx::query(
                r"
                INSERT INTO user_streaks (user_id, current_streak, last_check_in_date, updated_at)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(user_id) DO UPDATE SET
                    current_streak = ?2,
                    last_check_in_date = ?3,
                    updated_at = ?4
                ",
            )
            .bind(user_id)
            .bind(streak)
            .bind(today)
            .bind(Utc::now())
            .execute(pool)
            .await?;

            Ok(streak)
        }
    }
}
