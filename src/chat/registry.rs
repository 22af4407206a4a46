//! Connection registry for huddle.
//!
//! Process-wide table of live client connections keyed by address. There
//! is at most one entry per address; a reconnect replaces the old entry.

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Maximum number of frames queued for one connection.
///
/// A client that stops reading loses frames past this point instead of
/// growing its queue.
pub const CHANNEL_CAPACITY: usize = 256;

/// Sender half of a connection's outbound frame queue.
type FrameSender = mpsc::Sender<String>;

/// Receiver half of a connection's outbound frame queue.
pub type FrameReceiver = mpsc::Receiver<String>;

/// Handle to one live connection.
///
/// Frames pushed through the handle are written to the socket by the
/// connection's writer task.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: Uuid,
    address: String,
    sender: FrameSender,
}

impl ConnectionHandle {
    /// Create a handle and the queue its writer drains.
    pub fn new(address: impl Into<String>) -> (Self, FrameReceiver) {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let handle = Self {
            id: Uuid::new_v4(),
            address: address.into(),
            sender,
        };
        (handle, receiver)
    }

    /// Unique id of this physical connection.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Address of the connected user.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Queue an encoded frame without waiting.
    ///
    /// Returns false if the writer side is gone or the queue is full.
    pub fn send(&self, frame: &str) -> bool {
        match self.sender.try_send(frame.to_string()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!(address = %self.address, connection_id = %self.id, "Frame queue full");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

/// Registry of live connections.
///
/// Every mutation and snapshot takes the lock once, so concurrent
/// connect/disconnect never interleaves with a fan-out read.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    /// Entries in registration order.
    entries: RwLock<Vec<ConnectionHandle>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection.
    ///
    /// An existing entry for the same address is removed and the new one is
    /// appended. The replaced connection is not closed. Returns true if an
    /// entry was replaced.
    pub async fn register(&self, handle: ConnectionHandle) -> bool {
        let mut entries = self.entries.write().await;
        let existing = entries.iter().position(|e| e.address == handle.address);
        if let Some(index) = existing {
            entries.remove(index);
        }
        entries.push(handle);
        existing.is_some()
    }

    /// Snapshot of all live connections in registration order.
    pub async fn all(&self) -> Vec<ConnectionHandle> {
        self.entries.read().await.clone()
    }

    /// Remove the entry for an address, if any.
    pub async fn remove(&self, address: &str) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.address != address);
        entries.len() != before
    }

    /// Remove the entry for an address only if it still belongs to the
    /// given connection.
    ///
    /// A connection that was replaced by a reconnect must not evict its
    /// replacement when its own read loop ends.
    pub async fn release(&self, address: &str, connection_id: Uuid) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| !(e.address == address && e.id == connection_id));
        entries.len() != before
    }

    /// Check whether an address has a live entry.
    pub async fn contains(&self, address: &str) -> bool {
        self.entries.read().await.iter().any(|e| e.address == address)
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
