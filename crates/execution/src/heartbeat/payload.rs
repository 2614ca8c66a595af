use crate::monitor::RunCounters;
use chrono::{DateTime, Utc};
use clmm_monitor_domain::WalletAddress;
use serde::Serialize;
use std::time::Duration;

/// Request statistics group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    pub label: &'static str,
    pub total_requests: u64,
    pub success_rate: String,
}

/// Runtime and identity group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeInfo {
    pub label: &'static str,
    pub wallet: String,
    pub uptime: String,
    pub last_update: String,
}

/// Body posted to the heartbeat collector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatPayload {
    pub service_name: String,
    pub service_id: String,
    /// Reporting interval in milliseconds.
    pub heartbeat_interval: u64,
    pub status1: RequestStats,
    pub status2: RuntimeInfo,
}

impl HeartbeatPayload {
    pub fn build(
        service_name: &str,
        service_id: &str,
        interval: Duration,
        wallet: &WalletAddress,
        counters: &RunCounters,
        uptime: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            service_name: service_name.to_string(),
            service_id: service_id.to_string(),
            heartbeat_interval: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            status1: RequestStats {
                label: "Request stats",
                total_requests: counters.total_fetches(),
                success_rate: format_success_rate(counters.success_ratio()),
            },
            status2: RuntimeInfo {
                label: "Runtime",
                wallet: wallet.to_string(),
                uptime: format_uptime(uptime),
                last_update: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        }
    }
}

/// `"66.7%"`, or `"N/A"` when nothing has been attempted yet.
pub fn format_success_rate(ratio: Option<f64>) -> String {
    match ratio {
        Some(ratio) => format!("{:.1}%", ratio * 100.0),
        None => "N/A".to_string(),
    }
}

/// `HH:MM:SS`; hours keep counting past a day.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_success_rate() {
        assert_eq!(format_success_rate(None), "N/A");
        assert_eq!(format_success_rate(Some(1.0)), "100.0%");
        assert_eq!(format_success_rate(Some(2.0 / 3.0)), "66.7%");
        assert_eq!(format_success_rate(Some(0.0)), "0.0%");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_uptime(Duration::from_secs(3_661)), "01:01:01");
        assert_eq!(format_uptime(Duration::from_secs(27 * 3600 + 5)), "27:00:05");
    }

    #[test]
    fn test_payload_shape() {
        let wallet = WalletAddress::parse("0x1111111111111111111111111111111111111111").unwrap();
        let mut counters = RunCounters::new();
        counters.record_attempt();
        counters.record_success();
        counters.record_attempt();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let payload = HeartbeatPayload::build(
            "LP Monitor",
            "lp-monitor",
            Duration::from_secs(300),
            &wallet,
            &counters,
            Duration::from_secs(90),
            now,
        );
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["serviceName"], "LP Monitor");
        assert_eq!(value["serviceId"], "lp-monitor");
        assert_eq!(value["heartbeatInterval"], 300_000);
        assert_eq!(value["status1"]["label"], "Request stats");
        assert_eq!(value["status1"]["totalRequests"], 2);
        assert_eq!(value["status1"]["successRate"], "50.0%");
        assert_eq!(value["status2"]["label"], "Runtime");
        assert_eq!(value["status2"]["wallet"], wallet.as_str());
        assert_eq!(value["status2"]["uptime"], "00:01:30");
        assert_eq!(value["status2"]["lastUpdate"], "2025-06-01 12:00:00");
    }
}
