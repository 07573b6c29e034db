//! Process-wide scheduler heartbeat.
//!
//! The heartbeat deliberately does not fan work out to merchants: waking
//! every tenant from one timer would synchronize load across the fleet.
//! Each tenant's client polls its own due-check instead, and operator-driven
//! batch runs go through the engine's batch entry point. The tick exists
//! for liveness logging only.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;

/// Default tick interval.
const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Background liveness ticker for the scheduling loop.
pub struct Heartbeat {
    interval: Duration,
    clock: Arc<dyn Clock>,
}

impl Heartbeat {
    /// Create a heartbeat with the default one-minute interval.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            clock,
        }
    }

    /// Override the tick interval (ops tuning and tests).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the heartbeat loop until `cancel` is triggered.
    ///
    /// Ticks log at debug level; one info line is emitted per calendar day
    /// so production logs show the scheduler is alive without a line per
    /// minute.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Scheduler heartbeat started"
        );

        let mut interval = tokio::time::interval(self.interval);
        let mut last_logged: Option<NaiveDate> = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Scheduler heartbeat stopping");
                    break;
                }
                _ = interval.tick() => {
                    let today = self.clock.now().date_naive();
                    if last_logged != Some(today) {
                        tracing::info!(%today, "Scheduler heartbeat alive");
                        last_logged = Some(today);
                    } else {
                        tracing::debug!("Scheduler heartbeat tick");
                    }
                }
            }
        }
    }
}
