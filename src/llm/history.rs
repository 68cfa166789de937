use std::collections::VecDeque;

use super::types::ChatMessage;

/// Bounded window over a speaking conversation
///
/// Holds at most `capacity` turns; pushing beyond that evicts the oldest.
/// The speaking route rebuilds one from the client-supplied history each
/// call, so an over-long history never inflates the prompt.
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    turns: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ConversationWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a window from an ordered history, keeping only the newest turns
    pub fn from_history(history: impl IntoIterator<Item = ChatMessage>, capacity: usize) -> Self {
        let mut window = Self::new(capacity);
        for turn in history {
            window.push(turn);
        }
        window
    }

    pub fn push(&mut self, turn: ChatMessage) {
        if self.capacity == 0 {
            return;
        }
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The retained turns, oldest first
    pub fn turns(&self) -> impl Iterator<Item = &ChatMessage> {
        self.turns.iter()
    }
}
