//! Conversation-related types.

use returns_agent_model::ModelMessage;

/// Represents a conversation.
///
/// A conversation is an append-only ordered sequence of turns. It is
/// owned by whoever drives the agent (typically a session), lives for
/// the duration of that conversation, and is never persisted.
#[derive(Clone, Default, Debug)]
pub struct Conversation {
    turns: Vec<ModelMessage>,
}

impl Conversation {
    /// Creates an empty conversation.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the turns of this conversation, in insertion order.
    #[inline]
    pub fn turns(&self) -> &[ModelMessage] {
        &self.turns
    }

    /// Returns the number of turns in this conversation.
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if this conversation has no turns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the text of the most recent assistant answer, if any.
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.turns.iter().rev().find_map(|turn| match turn {
            ModelMessage::Assistant(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub(crate) fn push(&mut self, turn: ModelMessage) {
        self.turns.push(turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_assistant_text() {
        let mut conversation = Conversation::new();
        assert!(conversation.last_assistant_text().is_none());

        conversation.push(ModelMessage::User("Hi".to_owned()));
        conversation.push(ModelMessage::Assistant("Hello!".to_owned()));
        conversation.push(ModelMessage::User("Thanks".to_owned()));
        assert_eq!(conversation.last_assistant_text(), Some("Hello!"));
        assert_eq!(conversation.len(), 3);
    }
}
