// Reduces one round of OS queries into a Snapshot. Never fails: a query error zeroes its fields.

use crate::models::{Snapshot, bytes_to_gib, format_uptime, usage_percent};
use crate::sysinfo_repo::{RepoError, SysinfoRepo};
use std::future::Future;

/// Source of snapshots for the collection worker.
pub trait Sampler: Send + Sync + 'static {
    fn sample(&self) -> impl Future<Output = Snapshot> + Send;
}

fn or_zero<T: Default>(result: Result<T, RepoError>, operation: &'static str) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, operation, "metric query failed; reporting zero");
        T::default()
    })
}

fn unix_now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                operation = "get_timestamp",
                "system time error"
            );
            0
        })
}

impl Sampler for SysinfoRepo {
    async fn sample(&self) -> Snapshot {
        let cpu = or_zero(self.measure_cpu().await, "measure_cpu");
        let memory = or_zero(self.read_memory().await, "read_memory");
        let disk = or_zero(self.read_primary_disk().await, "read_primary_disk");
        let traffic = or_zero(self.read_traffic_totals().await, "read_traffic_totals");
        let host = self.host_identity();

        Snapshot {
            cpu_usage: cpu.usage_percent,
            cpu_cores: cpu.physical_cores,
            cpu_threads: cpu.logical_cores,
            memory_used: bytes_to_gib(memory.used),
            memory_total: bytes_to_gib(memory.total),
            memory_used_bytes: memory.used,
            memory_total_bytes: memory.total,
            memory_percent: usage_percent(memory.used, memory.total),
            disk_used: bytes_to_gib(disk.used),
            disk_total: bytes_to_gib(disk.total),
            disk_used_bytes: disk.used,
            disk_total_bytes: disk.total,
            disk_percent: disk.percent(),
            network_sent: traffic.sent,
            network_recv: traffic.recv,
            uptime: format_uptime(host.uptime_seconds),
            uptime_seconds: host.uptime_seconds,
            hostname: host.hostname,
            platform: host.platform,
            os: host.os,
            timestamp: unix_now_secs(),
        }
    }
}
