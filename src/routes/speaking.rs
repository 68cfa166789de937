use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::constants::SPEAKING_HISTORY_TURNS;
use crate::error::{AppError, Result};
use crate::llm::history::ConversationWindow;
use crate::llm::types::{ChatMessage, SpeakingTurn};
use crate::llm::{prompts, ChatParams};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeakingTurnRequest {
    /// Prior turns, oldest first; only the newest few are kept as context
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub input: String,
}

/// One examiner turn: the next question plus feedback on the last answer
pub async fn speaking_turn(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<SpeakingTurnRequest>,
) -> Result<Json<SpeakingTurn>> {
    if payload.input.trim().is_empty() {
        return Err(AppError::InvalidInput("Say something first".to_string()));
    }

    // Clients cannot smuggle extra system instructions through the history
    let window = ConversationWindow::from_history(
        payload
            .history
            .into_iter()
            .filter(|turn| turn.role == "user" || turn.role == "assistant"),
        SPEAKING_HISTORY_TURNS,
    );

    let mut messages = vec![prompts::speaking_examiner()];
    messages.extend(window.turns().cloned());
    messages.push(ChatMessage::user(payload.input));

    let params = ChatParams {
        temperature: Some(0.7),
        ..ChatParams::json()
    };
    let turn: SpeakingTurn = state
        .llm
        .chat_json("speaking_turn", &messages, params)
        .await?;

    Ok(Json(turn))
}
