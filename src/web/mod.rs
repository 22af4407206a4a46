//! Web module for huddle.
//!
//! HTTP endpoints for accounts, rooms and history, plus the WebSocket that
//! carries live chat traffic.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod ws;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
