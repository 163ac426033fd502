//! Domain crate for the retro board backend.
//!
//! Zero internal dependencies: the database layer, the API server, and the
//! realtime event fan-out all build on the types and contracts defined here.

pub mod draglock;
pub mod error;
pub mod types;
