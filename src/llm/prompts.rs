//! Prompt templates for every AI integration
//!
//! Each builder returns the full message list for one call. The JSON shape
//! demanded by a template must stay in sync with the matching payload struct
//! in `types.rs`.

use serde::{Deserialize, Serialize};

use super::types::ChatMessage;

/// Which writing task a generated question targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Task1,
    Task2,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Task1 => "task1",
            TaskType::Task2 => "task2",
        }
    }

    fn description(self) -> &'static str {
        match self {
            TaskType::Task1 => "letter-writing (General Training Task 1)",
            TaskType::Task2 => "discursive essay (Task 2)",
        }
    }
}

/// What the writing copilot is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopilotIntent {
    Analyze,
    Outline,
    Ideas,
    Vocab,
}

pub fn listening_script(topic: &str) -> Vec<ChatMessage> {
    let system = format!(
        "You are an IELTS listening examiner. Write the transcript of a Part 1 \
         conversation on the topic: {topic}.\n\
         Requirements:\n\
         1. Exactly two speakers, \"Man\" and \"Woman\".\n\
         2. Include concrete details (names, numbers, times, places) suitable for dictation.\n\
         3. 8-12 lines of dialogue in total.\n\
         4. Return JSON: {{ \"title\": \"...\", \"script\": [{{ \"speaker\": \"Man\", \"text\": \"...\" }}, {{ \"speaker\": \"Woman\", \"text\": \"...\" }}] }}"
    );

    vec![ChatMessage::system(system), ChatMessage::user("Generate")]
}

pub fn dictation_analysis(original: &str, dictated: &str) -> Vec<ChatMessage> {
    let system = "You are an IELTS listening expert. Compare the user's dictation against \
                  the original transcript and point out every meaningful discrepancy.\n\
                  Return JSON: { \"score\": 85, \"feedback\": \"...\", \
                  \"corrections\": [{ \"word\": \"...\", \"explanation\": \"...\" }] }";

    vec![
        ChatMessage::system(system),
        ChatMessage::user(format!("Original: {original}\nUser dictation: {dictated}")),
    ]
}

/// System instruction for the speaking examiner; the caller appends the
/// bounded history window and the candidate's latest answer
pub fn speaking_examiner() -> ChatMessage {
    ChatMessage::system(
        "You are a professional IELTS Speaking examiner.\n\
         Your tasks:\n\
         1. Advance the exam: based on the candidate's answer, ask the natural next \
            question (Part 1/2/3). Stay professional, neutral and friendly.\n\
         2. Instant feedback: point out grammar mistakes or unidiomatic phrasing in the \
            candidate's last answer and offer a higher-band restatement.\n\
         Return strict JSON with no Markdown markers:\n\
         { \"reply\": \"the examiner's spoken response\", \
           \"analysis\": \"feedback on the candidate's last answer with a restated version\" }",
    )
}

pub fn writing_question(task_type: TaskType, topic: Option<&str>) -> Vec<ChatMessage> {
    let system = format!(
        "You are an IELTS question writer. Return the question directly as JSON:\n\
         {{\n  \"title\": \"short title\",\n  \"content\": \"full question text, including bullet points\",\n  \"type\": \"{}\"\n}}\n\
         Return only JSON, no Markdown.",
        task_type.as_str()
    );

    let user = match topic {
        Some(topic) => format!(
            "Write one IELTS {} question about \"{topic}\".",
            task_type.description()
        ),
        None => format!(
            "Write one standard IELTS {} question on a random topic.",
            task_type.description()
        ),
    };

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

pub fn essay_grading(question: &str, essay: &str) -> Vec<ChatMessage> {
    let system = "You are a former IELTS examiner. Grade the candidate's essay against the \
                  four criteria: TR, CC, LR, GRA.\n\
                  Return JSON:\n\
                  {\n  \"overall_score\": \"6.5\",\n  \"breakdown\": { \"TR\": 6, \"CC\": 7, \"LR\": 6, \"GRA\": 7 },\n  \"feedback\": \"a short overall assessment\",\n  \"suggestions\": [\"suggestion 1\", \"suggestion 2\"]\n}";

    vec![
        ChatMessage::system(system),
        ChatMessage::user(format!("Question: {question}\n\nCandidate essay: {essay}")),
    ]
}

pub fn sample_essay(question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(
            "You are a Band 8 IELTS candidate. Write a model answer for this question. \
             Return the essay text directly. Keep it concise and high-quality.",
        ),
        ChatMessage::user(question.to_string()),
    ]
}

pub fn copilot(intent: CopilotIntent, question: &str) -> Vec<ChatMessage> {
    let system = match intent {
        CopilotIntent::Analyze => {
            "You are an IELTS writing examiner. Analyze the question: what is it really \
             asking, what traps does it hide, and what must a complete answer cover?"
        }
        CopilotIntent::Outline => {
            "You are an IELTS writing tutor. Provide a high-band structural outline for \
             this question, paragraph by paragraph."
        }
        CopilotIntent::Ideas => {
            "You are an IELTS writing tutor. Brainstorm arguments, examples and angles \
             the candidate could use for this question."
        }
        CopilotIntent::Vocab => {
            "You are an IELTS writing tutor. Recommend C1/C2 vocabulary and collocations \
             useful for this question, each with a short gloss."
        }
    };

    vec![
        ChatMessage::system(system),
        ChatMessage::user(format!("Question: {question}")),
    ]
}
