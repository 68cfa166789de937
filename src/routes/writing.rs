use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::constants::MAX_TOPIC_LEN;
use crate::error::{AppError, Result};
use crate::llm::prompts::{self, CopilotIntent, TaskType};
use crate::llm::types::WritingQuestion;
use crate::llm::ChatParams;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionRequest {
    #[serde(rename = "taskType")]
    pub task_type: TaskType,
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SampleRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub sample: String,
}

#[derive(Debug, Deserialize)]
pub struct CopilotRequest {
    pub question: String,
    pub intent: CopilotIntent,
}

#[derive(Debug, Serialize)]
pub struct CopilotResponse {
    pub content: String,
}

/// Generate a writing prompt for the requested task type
pub async fn generate_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<GenerateQuestionRequest>,
) -> Result<Json<WritingQuestion>> {
    let topic = match payload.topic.as_deref().map(str::trim) {
        Some(topic) if !topic.is_empty() => {
            if topic.len() > MAX_TOPIC_LEN {
                return Err(AppError::InvalidInput(format!(
                    "Topic must be at most {MAX_TOPIC_LEN} characters"
                )));
            }
            Some(topic)
        }
        _ => None,
    };

    let messages = prompts::writing_question(payload.task_type, topic);
    let question: WritingQuestion = state
        .llm
        .chat_json("writing_question", &messages, ChatParams::json())
        .await?;

    Ok(Json(question))
}

/// Produce a model answer for a question
pub async fn sample_essay(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<SampleRequest>,
) -> Result<Json<SampleResponse>> {
    if payload.question.trim().is_empty() {
        return Err(AppError::InvalidInput("Question must not be empty".to_string()));
    }

    let messages = prompts::sample_essay(&payload.question);
    let params = ChatParams {
        max_tokens: Some(500),
        ..ChatParams::default()
    };
    let sample = state.llm.chat(&messages, params).await?;

    Ok(Json(SampleResponse { sample }))
}

/// Writing copilot: analysis, outline, brainstorming or vocabulary help
pub async fn copilot(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CopilotRequest>,
) -> Result<Json<CopilotResponse>> {
    if payload.question.trim().is_empty() {
        return Err(AppError::InvalidInput("Question must not be empty".to_string()));
    }

    let messages = prompts::copilot(payload.intent, &payload.question);
    let content = state.llm.chat(&messages, ChatParams::default()).await?;

    Ok(Json(CopilotResponse { content }))
}
