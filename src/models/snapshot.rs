// Per-tick host snapshot, the unit stored in the history buffer

use serde::{Deserialize, Serialize};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// One sampling tick. Byte counters are raw; `memory_used`, `disk_total` etc. are GiB views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cpu_usage: f64,
    pub cpu_cores: u32,
    pub cpu_threads: u32,
    pub memory_used: f64,
    pub memory_total: f64,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    pub memory_percent: f64,
    pub disk_used: f64,
    pub disk_total: f64,
    pub disk_used_bytes: u64,
    pub disk_total_bytes: u64,
    pub disk_percent: f64,
    pub network_sent: u64,
    pub network_recv: u64,
    pub uptime: String,
    pub uptime_seconds: u64,
    pub hostname: String,
    pub platform: String,
    pub os: String,
    /// Epoch seconds.
    pub timestamp: u64,
}

pub fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

/// `used / total * 100`, or 0 when total is 0.
pub fn usage_percent(used: u64, total: u64) -> f64 {
    if total > 0 {
        (used as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Renders seconds as `1h2m3s` / `2m3s` / `3s`.
pub fn format_uptime(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
