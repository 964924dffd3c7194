// Host metrics via sysinfo

pub mod filter;
mod platform;

use crate::models::{DiskDevice, DiskUsage, NetworkStats};
use filter::{RawInterface, RawPartition};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sysinfo::{Disks, Networks, System};
use tracing::instrument;

/// Length of the blocking window CPU usage is averaged over.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("sysinfo {0} lock poisoned")]
    LockPoisoned(&'static str),
    #[error("sysinfo task join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuReading {
    pub usage_percent: f64,
    pub physical_cores: u32,
    pub logical_cores: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    pub total: u64,
    pub used: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficTotals {
    pub sent: u64,
    pub recv: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostIdentity {
    pub hostname: String,
    pub platform: String,
    pub os: String,
    pub uptime_seconds: u64,
}

/// Owns the sysinfo handles. CPU/memory, disks and networks sit behind separate locks
/// so request-time disk/network listings never wait on the CPU window.
pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
    disks: Arc<Mutex<Disks>>,
    networks: Arc<Mutex<Networks>>,
    cpu_window: Duration,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        Self::with_cpu_window(CPU_SAMPLE_WINDOW)
    }

    pub fn with_cpu_window(cpu_window: Duration) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            disks: Arc::new(Mutex::new(Disks::new_with_refreshed_list())),
            networks: Arc::new(Mutex::new(Networks::new_with_refreshed_list())),
            cpu_window,
        }
    }

    /// Blocks a pool thread for the CPU window, then reports usage over it.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "measure_cpu"))]
    pub async fn measure_cpu(&self) -> Result<CpuReading, RepoError> {
        let sys = self.sys.clone();
        let window = self.cpu_window;
        tokio::task::spawn_blocking(move || {
            let mut sys = sys.lock().map_err(|_| RepoError::LockPoisoned("system"))?;
            sys.refresh_cpu_all();
            std::thread::sleep(window);
            sys.refresh_cpu_all();
            Ok(CpuReading {
                usage_percent: (sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
                physical_cores: System::physical_core_count().unwrap_or(0) as u32,
                logical_cores: sys.cpus().len() as u32,
            })
        })
        .await?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "read_memory"))]
    pub async fn read_memory(&self) -> Result<MemoryReading, RepoError> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys.lock().map_err(|_| RepoError::LockPoisoned("system"))?;
            sys.refresh_memory();
            let total = sys.total_memory();
            Ok(MemoryReading {
                total,
                used: total.saturating_sub(sys.available_memory()),
            })
        })
        .await?
    }

    /// Usage of the first candidate mount point with a non-zero total, or all zeroes.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "read_primary_disk"))]
    pub async fn read_primary_disk(&self) -> Result<DiskUsage, RepoError> {
        let partitions = self.partitions().await?;
        let candidates = filter::primary_disk_candidates(&partitions);
        let usage = filter::resolve_primary_disk(&candidates, |candidate| {
            partitions
                .iter()
                .find(|p| Path::new(&p.mountpoint) == candidate)
                .map(RawPartition::usage)
        });
        if usage.total == 0 {
            tracing::debug!(candidates = candidates.len(), "no usable primary disk");
        }
        Ok(usage)
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "read_traffic_totals"))]
    pub async fn read_traffic_totals(&self) -> Result<TrafficTotals, RepoError> {
        let interfaces = self.interfaces().await?;
        let (sent, recv) = filter::traffic_totals(&interfaces);
        Ok(TrafficTotals { sent, recv })
    }

    /// Partitions for GET /api/disks, filtered and deduplicated by mount point.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "list_disks"))]
    pub async fn list_disks(&self) -> Result<Vec<DiskDevice>, RepoError> {
        Ok(filter::filter_partitions(self.partitions().await?))
    }

    /// Interfaces for GET /api/network, loopback and idle ones removed.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "list_interfaces"))]
    pub async fn list_interfaces(&self) -> Result<Vec<NetworkStats>, RepoError> {
        Ok(filter::filter_interfaces(self.interfaces().await?))
    }

    pub fn host_identity(&self) -> HostIdentity {
        HostIdentity {
            hostname: System::host_name().unwrap_or_default(),
            platform: System::distribution_id(),
            os: std::env::consts::OS.to_string(),
            uptime_seconds: System::uptime(),
        }
    }

    async fn partitions(&self) -> Result<Vec<RawPartition>, RepoError> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks = disks.lock().map_err(|_| RepoError::LockPoisoned("disks"))?;
            disks.refresh(true);
            Ok(disks
                .list()
                .iter()
                .map(|d| RawPartition {
                    device: d.name().to_string_lossy().into_owned(),
                    mountpoint: d.mount_point().to_string_lossy().into_owned(),
                    fstype: d.file_system().to_string_lossy().into_owned(),
                    total: d.total_space(),
                    available: d.available_space(),
                })
                .collect())
        })
        .await?
    }

    async fn interfaces(&self) -> Result<Vec<RawInterface>, RepoError> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks = networks
                .lock()
                .map_err(|_| RepoError::LockPoisoned("networks"))?;
            networks.refresh(true);
            Ok(networks
                .list()
                .iter()
                .map(|(name, data)| RawInterface {
                    name: name.clone(),
                    bytes_sent: data.total_transmitted(),
                    bytes_recv: data.total_received(),
                    packets_sent: data.total_packets_transmitted(),
                    packets_recv: data.total_packets_received(),
                })
                .collect())
        })
        .await?
    }
}

#[cfg(test)]
impl SysinfoRepo {
    fn poison<T: Send + 'static>(lock: Arc<Mutex<T>>) {
        let _ = std::thread::spawn(move || {
            let _guard = lock.lock().unwrap();
            panic!("poisoning sysinfo lock for test");
        })
        .join();
    }

    pub(crate) fn poison_disks(&self) {
        Self::poison(self.disks.clone());
    }

    pub(crate) fn poison_networks(&self) {
        Self::poison(self.networks.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Sampler;

    fn fast_repo() -> SysinfoRepo {
        SysinfoRepo::with_cpu_window(Duration::from_millis(250))
    }

    #[tokio::test]
    async fn sample_zeroes_disk_when_disk_query_fails() {
        let repo = fast_repo();
        repo.poison_disks();
        assert!(matches!(
            repo.list_disks().await,
            Err(RepoError::LockPoisoned("disks"))
        ));

        let snapshot = repo.sample().await;
        assert_eq!(snapshot.disk_total_bytes, 0);
        assert_eq!(snapshot.disk_used_bytes, 0);
        assert_eq!(snapshot.disk_percent, 0.0);
        assert_eq!(snapshot.disk_total, 0.0);
        assert!(snapshot.memory_total_bytes > 0);
        assert!(snapshot.cpu_threads > 0);
        assert!(snapshot.timestamp > 0);
    }

    #[tokio::test]
    async fn sample_zeroes_traffic_when_network_query_fails() {
        let repo = fast_repo();
        repo.poison_networks();

        let snapshot = repo.sample().await;
        assert_eq!(snapshot.network_sent, 0);
        assert_eq!(snapshot.network_recv, 0);
        assert!(snapshot.memory_total_bytes > 0);
        assert!(snapshot.cpu_threads > 0);
    }
}
