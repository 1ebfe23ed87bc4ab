use serde::Serialize;
use uuid::Uuid;

use super::Message;

/// Pushed to widget subscribers over SSE.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    Typing { active: bool },
    Message { message: Message },
    Reset { session_id: Uuid },
}

impl ChatEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ChatEvent::Typing { .. } => "typing",
            ChatEvent::Message { .. } => "message",
            ChatEvent::Reset { .. } => "reset",
        }
    }
}
