//! Middleware for the huddle HTTP surface.

pub mod cors;

pub use cors::create_cors_layer;
