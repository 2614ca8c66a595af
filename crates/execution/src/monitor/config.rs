use crate::alerts::DeliveryTarget;
use clmm_monitor_domain::WalletAddress;
use std::time::Duration;

/// Static settings for the monitor loop, read once at startup.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Wallet whose positions are watched.
    pub wallet: WalletAddress,
    /// Sleep between cycles.
    pub poll_interval: Duration,
    /// Where transition alerts go; `None` disables delivery.
    pub target: Option<DeliveryTarget>,
}

impl MonitorConfig {
    /// Config with a five minute poll interval and no delivery target.
    pub fn new(wallet: WalletAddress) -> Self {
        Self {
            wallet,
            poll_interval: Duration::from_secs(300),
            target: None,
        }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: DeliveryTarget) -> Self {
        self.target = Some(target);
        self
    }
}
