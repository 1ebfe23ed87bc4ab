use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/chat/messages", get(handlers::chat::get_messages))
        .route("/api/chat/message", post(handlers::chat::send_message))
        .route("/api/chat/reset", post(handlers::chat::reset))
        .route("/api/chat/session", get(handlers::chat::get_session))
        .route("/api/chat/quick-actions", get(handlers::chat::quick_actions))
        .route("/api/chat/events", get(handlers::chat::events_stream))
        // The widget is served from its own origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
