//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod drag_lock_repo;

pub use drag_lock_repo::DragLockRepo;
