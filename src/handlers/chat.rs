use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::sse::{Event, Sse};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ChatEvent, ConversationStep, Message};
use crate::services::chat;
use crate::state::AppState;

// GET /api/chat/messages
pub async fn get_messages(State(state): State<Arc<AppState>>) -> Json<Vec<Message>> {
    Json(state.transcript().messages().to_vec())
}

// POST /api/chat/message
#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SendMessageResponse {
    pub messages: Vec<Message>,
    pub step: ConversationStep,
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let messages = chat::process_message(Arc::clone(&state), &body.text).await?;
    let step = state.session().step;
    Ok(Json(SendMessageResponse { messages, step }))
}

// POST /api/chat/reset
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<SessionResponse>, AppError> {
    let session = chat::reset_session(&state)?;
    Ok(Json(SessionResponse {
        session_id: session.id,
        step: session.step,
        booking_in_progress: false,
        busy: state.busy.load(Ordering::SeqCst),
    }))
}

// GET /api/chat/session
#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub step: ConversationStep,
    pub booking_in_progress: bool,
    pub busy: bool,
}

pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.session().clone();
    Json(SessionResponse {
        session_id: session.id,
        step: session.step,
        booking_in_progress: session.step.is_booking(),
        busy: state.busy.load(Ordering::SeqCst),
    })
}

// GET /api/chat/quick-actions
#[derive(Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub text: &'static str,
}

static QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "Book Appointment",
        text: "I want to book an appointment",
    },
    QuickAction {
        label: "Hours",
        text: "What are your hospital hours?",
    },
    QuickAction {
        label: "Services",
        text: "What services do you offer?",
    },
    QuickAction {
        label: "Location",
        text: "What is the hospital location?",
    },
];

pub async fn quick_actions() -> Json<&'static [QuickAction]> {
    Json(&QUICK_ACTIONS[..])
}

// GET /api/chat/events (SSE)
#[derive(Deserialize)]
pub struct EventsQuery {
    pub last_seq: Option<u64>,
}

fn to_sse(event: &ChatEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_default();
    Event::default().data(data).event(event.name())
}

fn already_replayed(replayed: &HashSet<String>, event: &ChatEvent) -> bool {
    matches!(event, ChatEvent::Message { message } if replayed.contains(&message.id))
}

pub async fn events_stream(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    // Subscribe before the snapshot so nothing falls between the two.
    let rx = state.events_tx.subscribe();
    let catchup = state.transcript().since(query.last_seq.unwrap_or(0));
    let replayed: HashSet<String> = catchup.iter().map(|m| m.id.clone()).collect();

    let catchup_stream = tokio_stream::iter(catchup.into_iter().map(|message| {
        Ok::<_, Infallible>(to_sse(&ChatEvent::Message { message }))
    }));

    let live_stream = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(event) if already_replayed(&replayed, &event) => None,
        Ok(event) => Some(Ok(to_sse(&event))),
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "chat event subscriber lagged");
            None
        }
    });

    let keepalive_stream = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let combined = catchup_stream.chain(live_stream);
    let merged = StreamExt::merge(combined, keepalive_stream);

    Sse::new(merged)
}
