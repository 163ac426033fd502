//! Postgres-backed stack resolution.
//!
//! The notes service owns stacking; this adapter reads just enough of its
//! data to answer "which notes move together when this one is grabbed".

use async_trait::async_trait;

use retroboard_core::draglock::resolver::{StackResolver, StackResolverError};
use retroboard_core::types::NoteId;

use crate::DbPool;

pub struct PgStackResolver {
    pool: DbPool,
}

impl PgStackResolver {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StackResolver for PgStackResolver {
    async fn stack_of(&self, note_id: NoteId) -> Result<Vec<NoteId>, StackResolverError> {
        let ids: Vec<NoteId> = sqlx::query_scalar(
            "SELECT id FROM notes \
             WHERE id = $1 OR stack_parent_id = $1 \
             ORDER BY (id = $1) DESC, rank, id",
        )
        .bind(note_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StackResolverError::Lookup(e.to_string()))?;

        // A note unknown to this replica still has to lock itself.
        if ids.is_empty() {
            return Ok(vec![note_id]);
        }
        Ok(ids)
    }
}
