//! Chat module for huddle.
//!
//! This module provides the real-time delivery core:
//! - Connection registry (one live connection per address)
//! - Room directory (transactional room creation, membership lookup)
//! - Message store (append and replay by room)
//! - Broadcast engine (persist, then fan out to room members)

mod broadcast;
mod directory;
mod frame;
mod registry;
mod store;

pub use broadcast::{BroadcastEngine, FrameOutcome};
pub use directory::{RoomDirectory, RoomSummary};
pub use frame::{ErrorFrame, InboundFrame, DELIVERY_FAILED};
pub use registry::{ConnectionHandle, ConnectionRegistry, FrameReceiver, CHANNEL_CAPACITY};
pub use store::{ChatMessage, MessageStore, NewMessage};
