//! Expired refresh-token purge job
//!
//! Deletes refresh-token rows whose expiry has passed. Validation already
//! rejects expired tokens, so this sweep is housekeeping, not correctness;
//! a failed cycle is logged and retried on the next tick.

use std::time::Duration;
use tokio::time::sleep;

use crate::services::SessionService;

pub async fn start_token_purge(sessions: SessionService, interval: Duration) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Starting refresh-token purge job"
    );

    loop {
        sleep(interval).await;

        match sessions.purge_expired().await {
            Ok(0) => {}
            Ok(purged) => {
                tracing::info!(purged, "Removed expired refresh tokens");
            }
            Err(e) => {
                tracing::error!(error = %e, "Refresh-token purge failed");
            }
        }
    }
}
