//! Retro board API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! WebSocket infrastructure, background tasks) so integration tests and the
//! binary entrypoint can both access them.

pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod realtime;
pub mod response;
pub mod routes;
pub mod state;
pub mod ws;
