use std::sync::atomic::AtomicBool;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::models::{ChatEvent, ChatSession, Sender, Transcript};
use crate::services::dialogue;
use crate::services::submission::SubmissionAdapter;
use crate::services::typing::TypingDelay;

pub struct AppState {
    pub config: AppConfig,
    pub submitter: Box<dyn SubmissionAdapter>,
    pub typing: TypingDelay,
    pub session: Mutex<ChatSession>,
    pub transcript: Mutex<Transcript>,
    /// Set while a reply chain is running.
    pub busy: AtomicBool,
    pub events_tx: broadcast::Sender<ChatEvent>,
}

impl AppState {
    pub fn new(config: AppConfig, submitter: Box<dyn SubmissionAdapter>) -> Self {
        let typing = TypingDelay::new(config.typing_delay_min_ms, config.typing_delay_max_ms);
        let session = ChatSession::new();
        let transcript = greeted_transcript(&session, &config);
        let (events_tx, _) = broadcast::channel(256);

        Self {
            config,
            submitter,
            typing,
            session: Mutex::new(session),
            transcript: Mutex::new(transcript),
            busy: AtomicBool::new(false),
            events_tx,
        }
    }

    pub fn session(&self) -> MutexGuard<'_, ChatSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn transcript(&self) -> MutexGuard<'_, Transcript> {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn greeted_transcript(session: &ChatSession, config: &AppConfig) -> Transcript {
    let mut transcript = Transcript::new(session.id);
    transcript.push(Sender::Bot, dialogue::greeting(&config.clinic));
    transcript
}
