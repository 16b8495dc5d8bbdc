use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user-question/assistant-answer pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub user_message: String,
    pub assistant_reply: String,
}

impl Turn {
    pub fn new(user_message: impl Into<String>, assistant_reply: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            assistant_reply: assistant_reply.into(),
        }
    }

    /// Fixed two-line transcript template for this turn.
    pub fn render(&self) -> String {
        format!(
            "User: {}\nAssistant: {}",
            self.user_message, self.assistant_reply
        )
    }
}

/// Append-only conversation history for a single session.
///
/// Grows unbounded for the session lifetime; there is no eviction or
/// summarization, so prompt size grows linearly with turn count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push_turn(
        &mut self,
        user_message: impl Into<String>,
        assistant_reply: impl Into<String>,
    ) {
        self.turns.push(Turn::new(user_message, assistant_reply));
        self.updated_at = Utc::now();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Deterministic textual transcript in append order.
    ///
    /// Each turn is rendered with the two-line template, turns joined by a
    /// newline. An empty history renders to the empty string.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(Turn::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        let conversation = Conversation::new();
        assert_eq!(conversation.render(), "");
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_render_reflects_turns_in_order() {
        let mut conversation = Conversation::new();
        conversation.push_turn("What PPE is required?", "Safety glasses and gloves.");
        conversation.push_turn("Who may operate a lathe?", "Only trained staff.");

        assert_eq!(conversation.len(), 2);
        assert_eq!(
            conversation.render(),
            "User: What PPE is required?\nAssistant: Safety glasses and gloves.\n\
             User: Who may operate a lathe?\nAssistant: Only trained staff."
        );
    }

    #[test]
    fn test_push_turn_updates_timestamp() {
        let mut conversation = Conversation::new();
        let created = conversation.updated_at;
        conversation.push_turn("q", "a");
        assert!(conversation.updated_at >= created);
    }
}
