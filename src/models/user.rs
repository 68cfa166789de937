use chrono::{DateTime, Utc};

use crate::constants::{ERR_INVALID_EMAIL, ERR_PASSWORD_TOO_SHORT};
use crate::error::{AppError, Result};

/// Account row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Validate signup credentials before touching the database
pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    let at = email.find('@');
    let valid_email = email.len() <= 254
        && matches!(at, Some(pos) if pos > 0 && email[pos + 1..].contains('.'));
    if !valid_email {
        return Err(AppError::InvalidInput(ERR_INVALID_EMAIL.to_string()));
    }

    if password.len() < 8 {
        return Err(AppError::InvalidInput(ERR_PASSWORD_TOO_SHORT.to_string()));
    }

    Ok(())
}
