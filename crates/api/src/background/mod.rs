//! Background tasks spawned from `main`.

pub mod lock_reaper;
