use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Per-user daily check-in record, one row per user
///
/// A row only exists once the user has checked in at least once, so
/// `current_streak` is always >= 1 here; "streak 0" is the absence of a row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StreakRecord {
    pub user_id: String,
    pub current_streak: i64,
    pub last_check_in_date: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

/// Read-side view of a streak: the count plus whether today is already done
///
/// `checked_in` is derived at read time from the server's UTC date and is
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStatus {
    pub streak: i64,
    #[serde(rename = "checkedIn")]
    pub checked_in: bool,
}

impl StreakStatus {
    /// The state reported for users with no record (or on read failure)
    pub fn zero() -> Self {
        Self {
            streak: 0,
            checked_in: false,
        }
    }
}

/// Outcome of running the check-in decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInDecision {
    /// Same-day repeat: nothing to persist, report the stored count unchanged
    AlreadyCheckedIn(i64),
    /// Upsert a row carrying this streak value with today's date
    Record(i64),
}

impl CheckInDecision {
    /// The streak count the caller should report back to the user
    pub fn streak(self) -> i64 {
        match self {
            CheckInDecision::AlreadyCheckedIn(n) | CheckInDecision::Record(n) => n,
        }
    }
}

/// Compute the read-side status for a possibly-absent record
pub fn streak_status(existing: Option<&StreakRecord>, today: NaiveDate) -> StreakStatus {
    match existing {
        None => StreakStatus::zero(),
        Some(record) => StreakStatus {
            streak: record.current_streak,
            checked_in: record.last_check_in_date == today,
        },
    }
}

/// Apply the check-in decision table for `today`
///
/// No record -> start at 1. Last check-in today -> no-op. Yesterday ->
/// continue. Anything older -> reset to 1. All dates are server-UTC calendar
/// days; callers must use the same `today` on the read and write paths.
pub fn decide_check_in(existing: Option<&StreakRecord>, today: NaiveDate) -> CheckInDecision {
    let Some(record) = existing else {
        return CheckInDecision::Record(1);
    };

    if record.last_check_in_date == today {
        return CheckInDecision::AlreadyCheckedIn(record.current_streak);
    }

    match today.pred_opt() {
        Some(yesterday) if record.last_check_in_date == yesterday => {
            CheckInDecision::Record(record.current_streak + 1)
        }
        _ => CheckInDecision::Record(1),
    }
}
