use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{ChatEvent, ChatSession, Message, Sender, SubmissionOutcome};
use crate::services::dialogue;
use crate::state::{greeted_transcript, AppState};

/// Holds the busy flag for the lifetime of one reply chain. Owns its handle
/// on the state so it can move into a spawned task.
pub struct ChainGuard {
    state: Arc<AppState>,
}

impl ChainGuard {
    pub fn acquire(state: &Arc<AppState>) -> Result<Self, AppError> {
        state
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| AppError::Busy)?;
        Ok(Self {
            state: Arc::clone(state),
        })
    }
}

impl Drop for ChainGuard {
    fn drop(&mut self) {
        self.state.busy.store(false, Ordering::SeqCst);
    }
}

/// Run one user turn to completion: record it, advance the dialogue, present
/// every reply, and submit the appointment when the dialogue finishes one.
/// Returns the messages appended during the turn, user message first.
///
/// The chain runs on its own task, so dropping the returned future (client
/// gone) does not stop it.
pub async fn process_message(state: Arc<AppState>, input: &str) -> Result<Vec<Message>, AppError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(AppError::EmptyMessage);
    }

    let guard = ChainGuard::acquire(&state)?;
    let text = text.to_string();

    tokio::spawn(run_chain(guard, text)).await.map_err(|e| {
        tracing::error!(error = %e, "reply chain task failed");
        AppError::Internal("reply chain failed".to_string())
    })
}

async fn run_chain(guard: ChainGuard, text: String) -> Vec<Message> {
    let state = guard.state.as_ref();
    let text = text.as_str();

    let mut appended = vec![record_message(state, Sender::User, text)];

    // The session is updated before anything is presented, so the record is
    // already cleared by the time a submission goes out.
    let (session_id, transition) = {
        let mut session = state.session();
        let transition = dialogue::advance(session.step, &session.record, text, &state.config.clinic);

        tracing::info!(
            session = %session.id,
            from = session.step.as_str(),
            to = transition.step.as_str(),
            replies = transition.replies.len(),
            "processing message"
        );

        session.step = transition.step;
        session.record = transition.record.clone();
        (session.id, transition)
    };

    for reply in transition.replies {
        appended.push(present(state, reply).await);
    }

    if let Some(appointment) = transition.submission {
        appended.push(present(state, dialogue::SUBMITTING).await);

        let outcome = state.submitter.submit(&appointment).await;
        match &outcome {
            SubmissionOutcome::Success { appointment_id, .. } => tracing::info!(
                session = %session_id,
                department = %appointment.department,
                appointment_id = appointment_id.as_deref().unwrap_or(""),
                "appointment submitted"
            ),
            SubmissionOutcome::ApplicationFailure { .. } => {
                tracing::warn!(session = %session_id, "appointment rejected by booking system")
            }
            SubmissionOutcome::TransportFailure { kind } => {
                tracing::error!(session = %session_id, ?kind, "appointment submission failed")
            }
        }

        for reply in dialogue::outcome_replies(&outcome, &state.config.clinic) {
            appended.push(present(state, reply).await);
        }
    }

    appended
}

/// Start over as if the page had been reloaded.
pub fn reset_session(state: &Arc<AppState>) -> Result<ChatSession, AppError> {
    let _guard = ChainGuard::acquire(state)?;

    let session = ChatSession::new();
    *state.transcript() = greeted_transcript(&session, &state.config);
    *state.session() = session.clone();

    tracing::info!(session = %session.id, "session reset");
    let _ = state.events_tx.send(ChatEvent::Reset {
        session_id: session.id,
    });
    Ok(session)
}

async fn present(state: &AppState, text: impl Into<String>) -> Message {
    let delay = state.typing.next_delay();
    let _ = state.events_tx.send(ChatEvent::Typing { active: true });
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let _ = state.events_tx.send(ChatEvent::Typing { active: false });
    record_message(state, Sender::Bot, text)
}

fn record_message(state: &AppState, sender: Sender, text: impl Into<String>) -> Message {
    let message = state.transcript().push(sender, text);
    // No subscribers is fine.
    let _ = state.events_tx.send(ChatEvent::Message {
        message: message.clone(),
    });
    message
}
