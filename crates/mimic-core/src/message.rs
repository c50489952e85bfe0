//! Conversation messages.

use chrono::{DateTime, Utc};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// An immutable conversation entry.
///
/// The text is never mutated after creation; the streaming reveal
/// operates on a transient copy, not on the stored message.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl RawMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_constructors() {
        assert_eq!(RawMessage::user("hi").role, Role::User);
        assert_eq!(RawMessage::assistant("hi").role, Role::Assistant);
    }
}
