//! Broadcast engine for huddle.
//!
//! Moves one inbound frame through decode, stamp, persist and room-scoped
//! fan-out. Frames from a single connection are handled in arrival order;
//! there is no ordering across connections.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::directory::RoomDirectory;
use super::frame::{ErrorFrame, InboundFrame};
use super::registry::{ConnectionHandle, ConnectionRegistry, FrameReceiver};
use super::store::{ChatMessage, MessageStore};
use crate::db::Database;

/// What happened to one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame could not be decoded and was ignored.
    Dropped,
    /// The message could not be stored; the sender got an error frame.
    Rejected,
    /// The message was stored and queued for room members.
    Delivered {
        /// Sequence id assigned by the store.
        message_id: i64,
        /// Number of connections the message was queued on.
        recipients: usize,
    },
}

/// Orchestrates persistence and fan-out for every live connection.
pub struct BroadcastEngine {
    db: Database,
    registry: Arc<ConnectionRegistry>,
}

impl BroadcastEngine {
    /// Create an engine over the given database with an empty registry.
    pub fn new(db: Database) -> Self {
        Self::with_registry(db, Arc::new(ConnectionRegistry::new()))
    }

    /// Create an engine sharing an existing registry.
    pub fn with_registry(db: Database, registry: Arc<ConnectionRegistry>) -> Self {
        Self { db, registry }
    }

    /// The connection registry.
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Register a new connection for an address.
    ///
    /// Returns the handle and the queue of encoded frames to write to the
    /// client.
    pub async fn connect(&self, address: &str) -> (ConnectionHandle, FrameReceiver) {
        let (handle, frames) = ConnectionHandle::new(address);
        let replaced = self.registry.register(handle.clone()).await;

        info!(
            address = %address,
            connection_id = %handle.id(),
            replaced,
            "Connection registered"
        );
        (handle, frames)
    }

    /// Release a connection whose read loop has ended.
    pub async fn disconnect(&self, handle: &ConnectionHandle) {
        let removed = self.registry.release(handle.address(), handle.id()).await;
        info!(
            address = %handle.address(),
            connection_id = %handle.id(),
            removed,
            "Connection closed"
        );
    }

    /// Handle one raw inbound frame from a connection.
    pub async fn handle_frame(&self, from: &ConnectionHandle, bytes: &[u8]) -> FrameOutcome {
        let frame = match InboundFrame::decode(bytes) {
            Ok(frame) => frame,
            Err(e) => {
                debug!(address = %from.address(), error = %e, "Dropping malformed frame");
                return FrameOutcome::Dropped;
            }
        };

        let new_message = frame.stamp(from.address());

        let message_id = match MessageStore::new(self.db.pool()).append(&new_message).await {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    address = %from.address(),
                    room_id = %new_message.room_id,
                    error = %e,
                    "Failed to store message, skipping delivery"
                );
                match ErrorFrame::delivery_failed(&new_message.room_id).encode() {
                    Ok(json) => {
                        from.send(&json);
                    }
                    Err(e) => warn!(error = %e, "Failed to encode error frame"),
                }
                return FrameOutcome::Rejected;
            }
        };

        let message = new_message.into_message(message_id);
        let recipients = self.fan_out(&message).await;

        debug!(
            room_id = %message.room_id,
            message_id,
            recipients,
            "Message delivered"
        );
        FrameOutcome::Delivered {
            message_id,
            recipients,
        }
    }

    /// Queue a stored message on every live connection of a room member.
    ///
    /// Connections whose writer is gone or whose queue is full are skipped.
    async fn fan_out(&self, message: &ChatMessage) -> usize {
        let encoded = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                warn!(message_id = message.id, error = %e, "Failed to encode message");
                return 0;
            }
        };

        let members: HashSet<String> = match RoomDirectory::new(self.db.pool())
            .members_of(&message.room_id)
            .await
        {
            Ok(members) => members.into_iter().collect(),
            Err(e) => {
                warn!(
                    room_id = %message.room_id,
                    error = %e,
                    "Failed to resolve room members"
                );
                return 0;
            }
        };

        let mut delivered = 0;
        for handle in self.registry.all().await {
            if !members.contains(handle.address()) {
                continue;
            }
            if handle.send(&encoded) {
                delivered += 1;
            } else {
                debug!(address = %handle.address(), "Skipping unwritable connection");
            }
        }
        delivered
    }
}
