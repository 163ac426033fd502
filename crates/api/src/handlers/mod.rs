//! HTTP request handlers.

pub mod board_locks;
