use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{ERR_INVALID_WORD, MAX_CONTEXT_LEN, MAX_WORD_LEN};
use crate::error::{AppError, Result};

/// A word the user collected while reading, with optional source sentence
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VocabEntry {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub word: String,
    pub translation: Option<String>,
    pub context: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Validate a word before insertion
pub fn validate_word(word: &str) -> Result<()> {
    let trimmed = word.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_WORD_LEN {
        return Err(AppError::InvalidInput(ERR_INVALID_WORD.to_string()));
    }
    Ok(())
}

/// Validate an optional context sentence, truncation is the caller's job
pub fn validate_context(context: Option<&str>) -> Result<()> {
    if let Some(ctx) = context {
        if ctx.len() > MAX_CONTEXT_LEN {
            return Err(AppError::InvalidInput(format!(
                "Context must be at most {MAX_CONTEXT_LEN} characters"
            )));
        }
    }
    Ok(())
}
