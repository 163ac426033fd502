//! Periodic cleanup of lapsed drag leases (Postgres backend only).
//!
//! Disconnected clients never send a release; their leases self-heal by
//! expiry, and this task deletes the leftover rows. Runs on a fixed interval
//! using `tokio::time::interval`, independent of the request path. The
//! in-memory backend expires natively and needs no sweep.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use retroboard_db::repositories::DragLockRepo;
use retroboard_db::DbPool;

/// Run the drag-lock reaper loop.
///
/// Deletes rows whose lease has lapsed, every `interval_secs` seconds.
/// Runs until `cancel` is triggered.
pub async fn run(pool: DbPool, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(interval_secs, "Drag-lock reaper started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Drag-lock reaper stopping");
                break;
            }
            _ = interval.tick() => {
                match DragLockRepo::delete_expired(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Drag-lock reaper: purged lapsed leases");
                        } else {
                            tracing::debug!("Drag-lock reaper: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Drag-lock reaper: sweep failed");
                    }
                }
            }
        }
    }
}
