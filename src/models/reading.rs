use serde::Serialize;

/// A seeded reading-module article; `questions` is a stored JSON array of
/// `{question, answer?}` objects rendered verbatim to the client
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReadingMaterial {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub questions: String,
}

/// Article shape sent to the client, questions decoded from the stored JSON
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub questions: serde_json::Value,
}

impl ReadingMaterial {
    /// Decode the stored questions column; a corrupt row degrades to an
    /// empty list rather than failing the whole page
    pub fn into_response(self) -> ArticleResponse {
        let questions = serde_json::from_str(&self.questions).unwrap_or_else(|e| {
            tracing::warn!("Corrupt questions JSON on article {}: {}", self.id, e);
            serde_json::Value::Array(vec![])
        });

        ArticleResponse {
            id: self.id,
            title: self.title,
            subtitle: self.subtitle,
            content: self.content,
            questions,
        }
    }
}
