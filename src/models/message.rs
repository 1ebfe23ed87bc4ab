use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub seq: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Append-only chat log for one session. Entries are never edited or removed.
#[derive(Debug, Clone)]
pub struct Transcript {
    session_id: Uuid,
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> Message {
        let seq = self.messages.len() as u64 + 1;
        let message = Message {
            id: format!("{}-{seq}", self.session_id.simple()),
            seq,
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        };
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn since(&self, last_seq: u64) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.seq > last_seq)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
