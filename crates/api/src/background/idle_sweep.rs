//! Periodic idle-lead sweep.
//!
//! Spawns a background task that runs the engine's sweep on a fixed interval
//! using `tokio::time::interval`. Only started when
//! `IDLE_SWEEP_INTERVAL_SECS` is configured; the manual `/sweep/idle`
//! endpoint works either way and shares the same serialization guard.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::AssignmentEngine;

/// Run the idle-lead sweep loop.
///
/// A refused sweep (too few agents online) is logged and retried on the next
/// tick; it is the expected overnight state, not a fault.
pub async fn run(engine: Arc<AssignmentEngine>, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(interval_secs, "Idle-lead sweep job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Idle-lead sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                match engine.run_idle_sweep().await {
                    Ok(report) => {
                        if !report.reassignments.is_empty() || !report.failures.is_empty() {
                            tracing::info!(
                                reassigned = report.reassignments.len(),
                                failed = report.failures.len(),
                                "Scheduled sweep: {}", report.message
                            );
                        } else {
                            tracing::debug!("Scheduled sweep: nothing to redistribute");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Scheduled sweep did not run");
                    }
                }
            }
        }
    }
}
