/// Maximum essay length in characters
/// IELTS Task 2 essays run 250-350 words; this allows generous headroom
pub const MAX_ESSAY_LEN: usize = 20_000;

/// Maximum length of a collected vocabulary word
pub const MAX_WORD_LEN: usize = 64;

/// Maximum length of a vocabulary context sentence
pub const MAX_CONTEXT_LEN: usize = 500;

/// Maximum length of a user-supplied topic string for generation prompts
pub const MAX_TOPIC_LEN: usize = 200;

/// Number of past speaking turns kept as LLM context
/// Older turns are evicted; the window bounds prompt size
pub const SPEAKING_HISTORY_TURNS: usize = 6;

/// Timeout for a single LLM call in seconds
pub const LLM_TIMEOUT_SECS: u64 = 60;

/// Fallback listening topic when the user picks none
pub const DEFAULT_LISTENING_TOPIC: &str = "Random Daily Conversation";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for an empty or oversized word
pub const ERR_INVALID_WORD: &str = "Word must be non-empty and at most 64 characters";

/// Error message for an empty essay body
pub const ERR_EMPTY_ESSAY: &str = "Essay content must not be empty";

/// Error message for an invalid email address
pub const ERR_INVALID_EMAIL: &str = "Invalid email address";

/// Error message for a too-short password
pub const ERR_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
