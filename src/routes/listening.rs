use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::constants::{DEFAULT_LISTENING_TOPIC, MAX_TOPIC_LEN};
use crate::error::{AppError, Result};
use crate::llm::types::{DictationReport, ListeningScript};
use crate::llm::{prompts, ChatParams};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateScriptRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeDictationRequest {
    pub original: String,
    pub dictated: String,
}

/// Generate a Part 1 dialogue script for dictation practice
pub async fn generate_script(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<GenerateScriptRequest>,
) -> Result<Json<ListeningScript>> {
    let topic = match payload.topic.as_deref().map(str::trim) {
        Some(topic) if !topic.is_empty() => {
            if topic.len() > MAX_TOPIC_LEN {
                return Err(AppError::InvalidInput(format!(
                    "Topic must be at most {MAX_TOPIC_LEN} characters"
                )));
            }
            topic
        }
        _ => DEFAULT_LISTENING_TOPIC,
    };

    let messages = prompts::listening_script(topic);
    let script: ListeningScript = state
        .llm
        .chat_json("listening_script", &messages, ChatParams::json())
        .await?;

    tracing::info!("Generated listening script: {} lines", script.script.len());

    Ok(Json(script))
}

/// Compare the user's dictation against the script they heard
pub async fn analyze_dictation(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<AnalyzeDictationRequest>,
) -> Result<Json<DictationReport>> {
    if payload.original.trim().is_empty() || payload.dictated.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Both the original text and the dictation are required".to_string(),
        ));
    }

    let messages = prompts::dictation_analysis(&payload.original, &payload.dictated);
    let report: DictationReport = state
        .llm
        .chat_json("dictation_analysis", &messages, ChatParams::json())
        .await?;

    Ok(Json(report))
}
