//! Row models.
//!
//! Each submodule contains a `FromRow` struct matching the database row plus
//! conversions into the core domain type it backs.

pub mod drag_lock;

pub use drag_lock::DragLockRow;
