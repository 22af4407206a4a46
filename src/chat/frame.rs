//! Wire frames exchanged over a chat connection.

use serde::{Deserialize, Serialize};

use super::store::NewMessage;
use crate::Result;

/// Error code sent when a message could not be stored.
pub const DELIVERY_FAILED: &str = "delivery_failed";

/// A message frame sent by a client.
///
/// Client-supplied `time` and `id` fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundFrame {
    /// Sender display name.
    #[serde(default)]
    pub sender: String,
    /// Sender address.
    #[serde(default)]
    pub sender_email: String,
    /// Target room.
    pub room_id: String,
    /// Message body.
    pub msg: String,
}

impl InboundFrame {
    /// Decode a frame from raw JSON bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Stamp the frame with the current server time.
    ///
    /// An empty sender address is filled with the connection's address.
    pub fn stamp(self, connection_address: &str) -> NewMessage {
        let sender_email = if self.sender_email.is_empty() {
            connection_address.to_string()
        } else {
            self.sender_email
        };
        NewMessage::stamped(self.sender, sender_email, self.room_id, self.msg)
    }
}

/// Error frame sent back to the sender only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFrame {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Room the failed message was addressed to.
    pub room_id: String,
}

impl ErrorFrame {
    /// Frame reporting that a message was neither stored nor delivered.
    pub fn delivery_failed(room_id: impl Into<String>) -> Self {
        Self {
            error: DELIVERY_FAILED.to_string(),
            message: "Message could not be stored and was not delivered.".to_string(),
            room_id: room_id.into(),
        }
    }

    /// Encode as JSON text.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
