use super::{
    CycleReport, DeliveryStats, FetchOutcome, HeartbeatStatus, MonitorConfig, RunCounters,
};
use crate::alerts::{Notifier, NotifyOutcome, transition_message};
use crate::heartbeat::HeartbeatReporter;
use crate::tracking::RangeStateStore;
use chrono::Utc;
use clmm_monitor_protocols::PositionSource;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Receives the status summary of every cycle.
pub type SummarySink = Box<dyn Fn(&CycleReport) + Send + Sync>;

fn print_summary(report: &CycleReport) {
    println!("{report}\n");
}

/// Watches one wallet's positions and alerts on range changes.
///
/// Owns its state store and counters; cycles run one after another, so
/// nothing here is shared or locked.
pub struct PositionMonitor {
    config: MonitorConfig,
    source: Arc<dyn PositionSource>,
    notifier: Arc<dyn Notifier>,
    heartbeat: Option<Arc<dyn HeartbeatReporter>>,
    summary: SummarySink,
    state: RangeStateStore,
    counters: RunCounters,
}

impl PositionMonitor {
    /// Creates a monitor with an empty state store and heartbeat disabled.
    pub fn new(
        config: MonitorConfig,
        source: Arc<dyn PositionSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            source,
            notifier,
            heartbeat: None,
            summary: Box::new(print_summary),
            state: RangeStateStore::new(),
            counters: RunCounters::new(),
        }
    }

    /// Enables per-cycle heartbeat reporting.
    #[must_use]
    pub fn with_heartbeat(mut self, heartbeat: Arc<dyn HeartbeatReporter>) -> Self {
        self.heartbeat = Some(heartbeat);
        self
    }

    /// Replaces the stdout status summary.
    #[must_use]
    pub fn with_summary_sink(mut self, sink: SummarySink) -> Self {
        self.summary = sink;
        self
    }

    /// Last known classification per position.
    pub fn state(&self) -> &RangeStateStore {
        &self.state
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    /// Runs one full cycle without sleeping: fetch, diff, notify, emit the
    /// status summary, then report the heartbeat.
    ///
    /// Never fails: source, notifier and heartbeat errors are logged and
    /// reflected in the returned report.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let timestamp = Utc::now();

        self.counters.record_attempt();
        let (fetch, positions) = match self.source.fetch_positions(&self.config.wallet).await {
            Ok(positions) => {
                self.counters.record_success();
                debug!(
                    source = self.source.name(),
                    count = positions.len(),
                    "Fetched positions"
                );
                (FetchOutcome::Fetched, positions)
            }
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    kind = e.kind(),
                    error = %e,
                    "Position fetch failed"
                );
                let outcome = FetchOutcome::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                };
                (outcome, Vec::new())
            }
        };

        let transitions = if fetch.is_success() {
            self.state.apply(&positions, timestamp)
        } else {
            Vec::new()
        };

        let mut notifications = DeliveryStats::default();
        for transition in &transitions {
            info!(
                event = %transition.id,
                position = %transition.position_id,
                previous = %transition.previous,
                current = %transition.current,
                "Range status changed"
            );

            let message = transition_message(transition);
            match self
                .notifier
                .notify(&message, self.config.target.as_ref())
                .await
            {
                Ok(NotifyOutcome::Sent) => notifications.sent += 1,
                Ok(NotifyOutcome::Skipped) => notifications.skipped += 1,
                Err(e) => {
                    notifications.failed += 1;
                    error!(position = %transition.position_id, error = %e, "Failed to deliver alert");
                }
            }
        }

        let mut report = CycleReport {
            timestamp,
            fetch,
            positions,
            transitions,
            notifications,
            heartbeat: HeartbeatStatus::Disabled,
        };
        (self.summary)(&report);

        report.heartbeat = match &self.heartbeat {
            None => HeartbeatStatus::Disabled,
            Some(reporter) => match reporter
                .report(&self.counters, self.counters.uptime())
                .await
            {
                Ok(()) => HeartbeatStatus::Sent,
                Err(e) => {
                    warn!(error = %e, "Heartbeat failed");
                    HeartbeatStatus::Failed
                }
            },
        };

        report
    }

    /// Runs cycles forever, sleeping the configured interval in between.
    pub async fn start(&mut self) {
        info!(
            wallet = %self.config.wallet,
            source = self.source.name(),
            interval_secs = self.config.poll_interval.as_secs(),
            heartbeat = self.heartbeat.is_some(),
            "Starting LP range monitor"
        );

        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
