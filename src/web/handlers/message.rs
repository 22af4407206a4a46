//! Message history handler.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::chat::{ChatMessage, MessageStore};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Query carrying a room id.
#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    /// Room identifier.
    #[serde(default, rename = "roomId")]
    pub room_id: String,
}

/// GET /get_message?roomId= - Replay the stored messages of a room.
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let messages = MessageStore::new(state.db.pool())
        .query_by_room(&query.room_id)
        .await?;

    Ok(Json(messages))
}
