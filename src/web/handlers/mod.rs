//! API handlers for the huddle HTTP surface.

pub mod account;
pub mod message;
pub mod room;

pub use account::*;
pub use message::*;
pub use room::*;

use std::sync::Arc;

use crate::chat::BroadcastEngine;
use crate::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Broadcast engine owning the connection registry.
    pub engine: Arc<BroadcastEngine>,
}

impl AppState {
    /// Create application state over a database with a fresh engine.
    pub fn new(db: Database) -> Self {
        let engine = Arc::new(BroadcastEngine::new(db.clone()));
        Self { db, engine }
    }
}

/// GET / - Liveness greeting.
pub async fn index() -> &'static str {
    "Hello World"
}
