//! Typed client for the HTTP API
//!
//! Mirrors what the web front end does against the server: a thin request
//! layer plus small view states (streak board, vocab book) that update
//! optimistically and roll back when the authoritative write fails.

pub mod flow;
pub mod optimistic;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm::prompts::{CopilotIntent, TaskType};
use crate::llm::types::{
    ChatMessage, DictationReport, EssayGrade, ListeningScript, SpeakingTurn, WritingQuestion,
};
use crate::models::streak::StreakStatus;
use crate::routes::streak::CheckInResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("action was not accepted")]
    Rejected,
}

pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Wire shapes the client reads back
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Word {
    pub id: String,
    pub word: String,
    pub translation: Option<String>,
    pub context: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EssayRecord {
    pub id: String,
    pub question: String,
    pub content: String,
    #[serde(rename = "wordCount")]
    pub word_count: i64,
    pub grade: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub questions: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
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

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct SampleBody {
    sample: String,
}

#[derive(Debug, Deserialize)]
struct CopilotBody {
    content: String,
}

// =============================================================================
// Request layer
// =============================================================================

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<T> {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    pub async fn signup(&mut self, email: &str, password: &str) -> ClientResult<Session> {
        let session: Session = self
            .call(
                Method::POST,
                "/api/auth/signup",
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<Session> {
        let session: Session = self
            .call(
                Method::POST,
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    pub async fn logout(&mut self) -> ClientResult<()> {
        let _: serde_json::Value = self.call(Method::POST, "/api/auth/logout", None).await?;
        self.token = None;
        Ok(())
    }

    pub async fn streak(&self) -> ClientResult<StreakStatus> {
        self.call(Method::GET, "/api/streak", None).await
    }

    pub async fn check_in(&self) -> ClientResult<CheckInResponse> {
        self.call(Method::POST, "/api/streak/check-in", None).await
    }

    pub async fn vocabulary(&self) -> ClientResult<Vec<Word>> {
        self.call(Method::GET, "/api/vocabulary", None).await
    }

    pub async fn add_word(
        &self,
        word: &str,
        translation: Option<&str>,
        context: Option<&str>,
    ) -> ClientResult<Word> {
        self.call(
            Method::POST,
            "/api/vocabulary",
            Some(serde_json::json!({
                "word": word,
                "translation": translation,
                "context": context,
            })),
        )
        .await
    }

    pub async fn delete_word(&self, id: &str) -> ClientResult<()> {
        let _: serde_json::Value = self
            .call(Method::DELETE, &format!("/api/vocabulary/{id}"), None)
            .await?;
        Ok(())
    }

    pub async fn submit_essay(&self, question: &str, content: &str) -> ClientResult<EssayRecord> {
        self.call(
            Method::POST,
            "/api/essays",
            Some(serde_json::json!({ "question": question, "content": content })),
        )
        .await
    }

    pub async fn essays(&self) -> ClientResult<Vec<EssayRecord>> {
        self.call(Method::GET, "/api/essays", None).await
    }

    pub async fn grade_essay(&self, id: &str) -> ClientResult<EssayGrade> {
        self.call(Method::POST, &format!("/api/essays/{id}/grade"), None)
            .await
    }

    pub async fn article(&self) -> ClientResult<Article> {
        self.call(Method::GET, "/api/reading/article", None).await
    }

    pub async fn dashboard(&self) -> ClientResult<Stats> {
        self.call(Method::GET, "/api/dashboard", None).await
    }

    pub async fn generate_script(&self, topic: Option<&str>) -> ClientResult<ListeningScript> {
        self.call(
            Method::POST,
            "/api/listening/script",
            Some(serde_json::json!({ "topic": topic })),
        )
        .await
    }

    pub async fn analyze_dictation(
        &self,
        original: &str,
        dictated: &str,
    ) -> ClientResult<DictationReport> {
        self.call(
            Method::POST,
            "/api/listening/dictation",
            Some(serde_json::json!({ "original": original, "dictated": dictated })),
        )
        .await
    }

    pub async fn speaking_turn(
        &self,
        history: &[ChatMessage],
        input: &str,
    ) -> ClientResult<SpeakingTurn> {
        self.call(
            Method::POST,
            "/api/speaking/turn",
            Some(serde_json::json!({ "history": history, "input": input })),
        )
        .await
    }

    pub async fn generate_question(
        &self,
        task_type: TaskType,
        topic: Option<&str>,
    ) -> ClientResult<WritingQuestion> {
        self.call(
            Method::POST,
            "/api/writing/question",
            Some(serde_json::json!({ "taskType": task_type, "topic": topic })),
        )
        .await
    }

    pub async fn sample_essay(&self, question: &str) -> ClientResult<String> {
        let body: SampleBody = self
            .call(
                Method::POST,
                "/api/writing/sample",
                Some(serde_json::json!({ "question": question })),
            )
            .await?;
        Ok(body.sample)
    }

    pub async fn copilot(&self, intent: CopilotIntent, question: &str) -> ClientResult<String> {
        let body: CopilotBody = self
            .call(
                Method::POST,
                "/api/writing/copilot",
                Some(serde_json::json!({ "intent": intent, "question": question })),
            )
            .await?;
        Ok(body.content)
    }
}

// =============================================================================
// Optimistic views
// =============================================================================

/// The dashboard streak card's state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakBoard {
    pub streak: i64,
    pub checked_in: bool,
}

impl From<StreakStatus> for StreakBoard {
    fn from(status: StreakStatus) -> Self {
        Self {
            streak: status.streak,
            checked_in: status.checked_in,
        }
    }
}

impl StreakBoard {
    /// Check in with an optimistic bump
    ///
    /// The count and flag flip immediately; a failed or rejected write
    /// restores the pre-attempt state. On success the count is reconciled to
    /// the server's figure (same-day repeats report the stored count).
    pub async fn check_in(&mut self, api: &ApiClient) -> ClientResult<()> {
        if self.checked_in {
            return Ok(());
        }

        let streak = optimistic::apply(
            self,
            |board| {
                board.streak += 1;
                board.checked_in = true;
            },
            || async {
                let response = api.check_in().await?;
                if response.success {
                    Ok(response.streak)
                } else {
                    Err(ClientError::Rejected)
                }
            },
        )
        .await?;

        if let Some(streak) = streak {
            self.streak = streak;
        }

        Ok(())
    }
}

/// The vocabulary page's list state
#[derive(Debug, Clone, Default)]
pub struct VocabBook {
    pub words: Vec<Word>,
}

impl VocabBook {
    pub async fn load(api: &ApiClient) -> ClientResult<Self> {
        Ok(Self {
            words: api.vocabulary().await?,
        })
    }

    /// Delete a word optimistically, restoring the list if the write fails
    pub async fn delete(&mut self, api: &ApiClient, id: &str) -> ClientResult<()> {
        optimistic::apply(
            &mut self.words,
            |words| words.retain(|w| w.id != id),
            || api.delete_word(id),
        )
        .await
    }
}
