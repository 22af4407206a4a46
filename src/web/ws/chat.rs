//! Chat WebSocket handler.
//!
//! One read loop per connection feeds the broadcast engine; a writer task
//! drains the connection's frame queue into the socket.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::chat::BroadcastEngine;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Query parameters for WebSocket connection.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Address of the connecting user.
    #[serde(default)]
    pub email: String,
}

/// WebSocket chat handler.
///
/// GET /ws?email={address}
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<WsQuery>,
) -> Response {
    if query.email.is_empty() {
        tracing::debug!("WebSocket connection rejected: missing email");
        return ApiError::bad_request("email query parameter is required").into_response();
    }

    tracing::info!(address = %query.email, "WebSocket connection");

    let engine = Arc::clone(&state.engine);
    ws.on_upgrade(move |socket| handle_socket(socket, engine, query.email))
}

/// Handle a WebSocket connection until the peer goes away.
async fn handle_socket(socket: WebSocket, engine: Arc<BroadcastEngine>, address: String) {
    let (handle, mut frames) = engine.connect(&address).await;
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let mut writer = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            if ws_sender.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
        let _ = ws_sender.close().await;
    });

    loop {
        tokio::select! {
            msg = ws_receiver.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    engine.handle_frame(&handle, text.as_bytes()).await;
                }
                Some(Ok(Message::Binary(data))) => {
                    engine.handle_frame(&handle, &data).await;
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!(address = %address, "WebSocket closed by client");
                    break;
                }
                // Pings are answered by the protocol layer.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(address = %address, "WebSocket error: {}", e);
                    break;
                }
            },
            _ = &mut writer => {
                tracing::debug!(address = %address, "WebSocket writer stopped");
                break;
            }
        }
    }

    engine.disconnect(&handle).await;
    writer.abort();
}
