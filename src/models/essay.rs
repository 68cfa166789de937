use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{ERR_EMPTY_ESSAY, MAX_ESSAY_LEN};
use crate::error::{AppError, Result};

/// A writing submission; `grade` holds the stored grading report (JSON)
/// once the essay has been graded
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Essay {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub question: String,
    pub content: String,
    #[serde(rename = "wordCount")]
    pub word_count: i64,
    pub grade: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Whitespace word count, the figure shown on the dashboard
pub fn count_words(text: &str) -> i64 {
    text.split_whitespace().count() as i64
}

/// Validate an essay body before saving
pub fn validate_essay(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(AppError::InvalidInput(ERR_EMPTY_ESSAY.to_string()));
    }
    if content.len() > MAX_ESSAY_LEN {
        return Err(AppError::InvalidInput(format!(
            "Essay must be at most {MAX_ESSAY_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("Technology has  reshaped \n modern education."), 5);
    }

    #[test]
    fn test_validate_essay() {
        assert!(validate_essay("Some people believe that...").is_ok());
        assert!(validate_essay("").is_err());
        assert!(validate_essay("   \n  ").is_err());
        assert!(validate_essay(&"a".repeat(MAX_ESSAY_LEN + 1)).is_err());
    }
}
