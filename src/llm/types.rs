use serde::{Deserialize, Serialize};

/// A single chat turn sent to or received from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

// =============================================================================
// Provider wire format (OpenAI-compatible chat completions)
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

// =============================================================================
// Per-integration payloads
//
// Each JSON-mode integration deserializes the completion into one of these;
// a parse failure surfaces as a SchemaMismatch naming the integration.
// =============================================================================

/// Listening script generation: a two-voice Part 1 dialogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListeningScript {
    pub title: String,
    pub script: Vec<ScriptLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub speaker: String,
    pub text: String,
}

/// Dictation analysis: score plus per-word corrections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictationReport {
    pub score: f64,
    pub feedback: String,
    pub corrections: Vec<Correction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub word: String,
    pub explanation: String,
}

/// Speaking dialogue: the examiner's next question plus feedback on the
/// candidate's last answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakingTurn {
    pub reply: String,
    pub analysis: String,
}

/// Generated writing prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritingQuestion {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub task_type: String,
}

/// Essay grading report over the four band criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssayGrade {
    pub overall_score: String,
    pub breakdown: GradeBreakdown,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeBreakdown {
    #[serde(rename = "TR")]
    pub task_response: f64,
    #[serde(rename = "CC")]
    pub coherence: f64,
    #[serde(rename = "LR")]
    pub lexical_resource: f64,
    #[serde(rename = "GRA")]
    pub grammar: f64,
}
