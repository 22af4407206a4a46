//! huddle - real-time group chat delivery service.
//!
//! Clients open a WebSocket identified by their address, send messages to
//! rooms they belong to, and every live member of the room receives them.
//! Messages are stored and can be replayed over HTTP.

pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use chat::{BroadcastEngine, ChatMessage, ConnectionRegistry, RoomDirectory, RoomSummary};
pub use config::Config;
pub use db::{Database, UserRepository};
pub use error::{HuddleError, Result};
pub use web::WebServer;
