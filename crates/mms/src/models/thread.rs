//! Conversation identity and the plain summary row a host materializes headers from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier for a conversation thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Summary of one conversation as read from the message store
///
/// This is plain data. [`crate::models::ConversationHeader`] wraps it with the
/// mutable pieces a list row needs (resolved sender name, waiting view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Conversation thread ID
    pub id: ThreadId,
    /// Raw sender token (phone number or address), resolved to a name later
    pub from_token: String,
    /// Number of messages in the conversation, at least 1
    pub message_count: usize,
    /// Subject or snippet of the latest message
    pub subject: String,
    /// Timestamp of the most recent message
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub has_attachment: bool,
    #[serde(default)]
    pub has_draft: bool,
    #[serde(default)]
    pub has_error: bool,
    /// Missing in JSON means read, same as [`ConversationSummary::new`]
    #[serde(default = "default_read")]
    pub is_read: bool,
}

fn default_read() -> bool {
    true
}

impl ConversationSummary {
    /// Create a read, attachment-free summary with no draft or error
    pub fn new(
        id: ThreadId,
        from_token: impl Into<String>,
        message_count: usize,
        subject: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            from_token: from_token.into(),
            message_count: message_count.max(1),
            subject: subject.into(),
            date,
            has_attachment: false,
            has_draft: false,
            has_error: false,
            is_read: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_count_is_at_least_one() {
        let summary = ConversationSummary::new(ThreadId::new("t1"), "+15550100", 0, "hi", Utc::now());
        assert_eq!(summary.message_count, 1);
    }

    #[test]
    fn test_summary_flags_default_when_missing() {
        let json = r#"{
            "id": "t7",
            "from_token": "+15550107",
            "message_count": 3,
            "subject": "Lunch?",
            "date": "2024-03-01T12:00:00Z"
        }"#;

        let summary: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, ThreadId::new("t7"));
        assert!(summary.is_read);
        assert!(!summary.has_draft);

        let built = ConversationSummary::new(
            ThreadId::new("t7"),
            "+15550107",
            3,
            "Lunch?",
            summary.date,
        );
        assert_eq!(summary.is_read, built.is_read);
    }

    #[test]
    fn test_summary_explicitly_unread() {
        let json = r#"{
            "id": "t8",
            "from_token": "+15550108",
            "message_count": 1,
            "subject": "Ping",
            "date": "2024-03-01T12:00:00Z",
            "is_read": false
        }"#;

        let summary: ConversationSummary = serde_json::from_str(json).unwrap();
        assert!(!summary.is_read);
    }
}
