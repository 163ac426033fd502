//! Stack resolution seam.
//!
//! The notes service owns stacking; the coordinator only needs to know which
//! notes move together when one of them is grabbed.

use async_trait::async_trait;

use crate::types::NoteId;

#[derive(Debug, thiserror::Error)]
pub enum StackResolverError {
    #[error("Stack resolution failed: {0}")]
    Lookup(String),
}

/// Resolves a note to its stack group.
#[async_trait]
pub trait StackResolver: Send + Sync {
    /// The grabbed note plus every note piled onto it, in stack order.
    /// The returned set always contains `note_id` itself.
    async fn stack_of(&self, note_id: NoteId) -> Result<Vec<NoteId>, StackResolverError>;
}
