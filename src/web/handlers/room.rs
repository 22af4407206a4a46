//! Room handlers for the huddle HTTP surface.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::chat::{RoomDirectory, RoomSummary};
use crate::web::error::ApiError;
use crate::web::handlers::{AppState, EmailQuery};

/// Status line returned after a room is created.
pub const ROOM_CREATED: &str = "Chat room created.";

/// Status line returned when room creation fails.
pub const ROOM_CREATE_FAILED: &str = "Failed to create chat room due to an internal server error.";

/// Request body for room creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    /// Creator address.
    #[serde(default)]
    pub room_maker: String,
    /// Display name. Empty means do nothing.
    #[serde(default)]
    pub room_name: String,
    /// Invited addresses.
    #[serde(default)]
    pub invites: Vec<String>,
}

/// POST /make_room - Create a room and its membership.
///
/// Responds with status lines; on success the last one is the room id.
pub async fn make_room(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRoomRequest>,
) -> (StatusCode, Json<Vec<String>>) {
    let directory = RoomDirectory::new(state.db.pool());

    match directory
        .create_room(&req.room_name, &req.room_maker, &req.invites)
        .await
    {
        Ok(Some(room_id)) => (
            StatusCode::OK,
            Json(vec![ROOM_CREATED.to_string(), room_id]),
        ),
        Ok(None) => (StatusCode::OK, Json(Vec::new())),
        Err(e) => {
            tracing::error!(room_maker = %req.room_maker, "Failed to create room: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(vec![ROOM_CREATE_FAILED.to_string()]),
            )
        }
    }
}

/// GET /get_room_list?email= - List the rooms a user belongs to.
pub async fn get_room_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<RoomSummary>>, ApiError> {
    let rooms = RoomDirectory::new(state.db.pool())
        .rooms_for(&query.email)
        .await?;

    Ok(Json(rooms))
}
