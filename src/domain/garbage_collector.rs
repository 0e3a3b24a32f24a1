//! Background removal of expired links.
//!
//! The collector alternates between two states:
//!
//! - **idle**: waiting for the next interval tick
//! - **sweeping**: listing every link and deleting those whose `expire_at`
//!   has passed
//!
//! Each sweep is a fresh full scan; the collector keeps no state between
//! sweeps and talks to storage only through [`LinkRepository`]. A failed
//! deletion is logged and skipped, the row stays eligible and is retried on
//! the next sweep.
//!
//! The stop signal is only observed while idle, so a sweep in progress always
//! runs to completion.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Links returned by the listing.
    pub scanned: usize,
    /// Links whose expiry had passed.
    pub expired: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Periodically deletes expired links.
pub struct GarbageCollector {
    repository: Arc<dyn LinkRepository>,
    interval: Duration,
}

impl GarbageCollector {
    pub fn new(repository: Arc<dyn LinkRepository>, interval: Duration) -> Self {
        Self {
            repository,
            interval,
        }
    }

    /// Runs a single sweep against `now`.
    ///
    /// # Errors
    ///
    /// Returns the listing error if the links cannot be read. Individual
    /// deletion failures are counted in the report instead.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport, AppError> {
        let links = self.repository.list().await?;

        let mut report = SweepReport {
            scanned: links.len(),
            ..SweepReport::default()
        };

        for link in links.iter().filter(|link| link.is_expired_at(now)) {
            report.expired += 1;

            match self.repository.delete_by_short(&link.short).await {
                Ok(()) => {
                    report.deleted += 1;
                    debug!(short = %link.short, expire_at = %link.expire_at, "Removed expired link");
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(short = %link.short, error = %e, "Failed to remove expired link");
                }
            }
        }

        Ok(report)
    }

    /// Spawns the collector loop on the Tokio runtime.
    ///
    /// The loop exits once `true` is sent on `shutdown` or its sender is dropped.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Garbage collector started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            match self.sweep(Utc::now()).await {
                Ok(report) if report.expired > 0 => {
                    info!(
                        scanned = report.scanned,
                        deleted = report.deleted,
                        failed = report.failed,
                        "Sweep finished"
                    );
                }
                Ok(report) => debug!(scanned = report.scanned, "Sweep found nothing to remove"),
                Err(e) => warn!(error = %e, "Sweep skipped, could not list links"),
            }
        }

        info!("Garbage collector stopped");
    }
}
