//! Router configuration for the huddle HTTP surface.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{check_email, get_message, get_room_list, index, make_room, AppState};
use super::middleware::create_cors_layer;
use super::ws::chat_ws_handler;

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/check_email", get(check_email))
        .route("/make_room", post(make_room))
        .route("/get_room_list", get(get_room_list))
        .route("/get_message", get(get_message))
        .route("/ws", get(chat_ws_handler))
        .with_state(app_state)
        .merge(create_health_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
