// Pure reductions over raw OS listings: partition/interface filters and primary-disk choice.

use super::platform::{LOOPBACK_INTERFACES, ROOT_MOUNT, primary_data_mounts};
use crate::models::{DiskDevice, DiskUsage, NetworkStats};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Filesystems that never back user data.
pub const PSEUDO_FILESYSTEMS: &[&str] =
    &["devfs", "autofs", "proc", "sysfs", "devtmpfs", "squashfs"];

/// A partition as enumerated by the OS, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPartition {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub total: u64,
    pub available: u64,
}

impl RawPartition {
    pub fn usage(&self) -> DiskUsage {
        DiskUsage::from_total_and_available(self.total, self.available)
    }
}

/// An interface as enumerated by the OS, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInterface {
    pub name: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

pub fn is_pseudo_filesystem(fstype: &str) -> bool {
    PSEUDO_FILESYSTEMS.contains(&fstype)
}

pub fn is_loopback(name: &str) -> bool {
    LOOPBACK_INTERFACES.contains(&name)
}

/// Drops pseudo filesystems, repeated mount points (first one wins) and zero-sized partitions.
pub fn filter_partitions(partitions: impl IntoIterator<Item = RawPartition>) -> Vec<DiskDevice> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut devices = Vec::new();
    for p in partitions {
        if seen.contains(&p.mountpoint) || is_pseudo_filesystem(&p.fstype) {
            continue;
        }
        seen.insert(p.mountpoint.clone());
        if p.total == 0 {
            continue;
        }
        let usage = p.usage();
        devices.push(DiskDevice {
            device: p.device,
            mountpoint: p.mountpoint,
            fstype: p.fstype,
            total_bytes: usage.total,
            used_bytes: usage.used,
            free_bytes: p.available.min(usage.total),
            used_percent: usage.percent(),
        });
    }
    devices
}

/// Drops loopback and idle interfaces; result is ordered by interface name.
pub fn filter_interfaces(
    interfaces: impl IntoIterator<Item = RawInterface>,
) -> Vec<NetworkStats> {
    let mut stats: Vec<NetworkStats> = interfaces
        .into_iter()
        .filter(|i| !is_loopback(&i.name) && (i.bytes_sent > 0 || i.bytes_recv > 0))
        .map(|i| NetworkStats {
            interface: i.name,
            bytes_sent: i.bytes_sent,
            bytes_recv: i.bytes_recv,
            packets_sent: i.packets_sent,
            packets_recv: i.packets_recv,
        })
        .collect();
    stats.sort_by(|a, b| a.interface.cmp(&b.interface));
    stats
}

/// Sum of (sent, received) bytes over every non-loopback interface.
pub fn traffic_totals(interfaces: &[RawInterface]) -> (u64, u64) {
    interfaces
        .iter()
        .filter(|i| !is_loopback(&i.name))
        .fold((0, 0), |(sent, recv), i| {
            (sent.saturating_add(i.bytes_sent), recv.saturating_add(i.bytes_recv))
        })
}

/// Ordered mount points to try for the primary disk: the platform data volume, `/`,
/// then every other enumerated real partition in listing order. No duplicates.
pub fn primary_disk_candidates(partitions: &[RawPartition]) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    primary_data_mounts()
        .iter()
        .copied()
        .chain(std::iter::once(ROOT_MOUNT))
        .map(PathBuf::from)
        .chain(
            partitions
                .iter()
                .filter(|p| !is_pseudo_filesystem(&p.fstype))
                .map(|p| PathBuf::from(&p.mountpoint)),
        )
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// First candidate whose usage lookup reports a non-zero total; zero reading otherwise.
pub fn resolve_primary_disk<P, F>(candidates: &[P], mut usage_at: F) -> DiskUsage
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Option<DiskUsage>,
{
    candidates
        .iter()
        .filter_map(|c| usage_at(c.as_ref()))
        .find(|u| u.total > 0)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(device: &str, mountpoint: &str, fstype: &str, total: u64) -> RawPartition {
        RawPartition {
            device: device.into(),
            mountpoint: mountpoint.into(),
            fstype: fstype.into(),
            total,
            available: total / 4,
        }
    }

    fn interface(name: &str, sent: u64, recv: u64) -> RawInterface {
        RawInterface {
            name: name.into(),
            bytes_sent: sent,
            bytes_recv: recv,
            packets_sent: sent / 100,
            packets_recv: recv / 100,
        }
    }

    #[test]
    fn filter_partitions_keeps_first_of_duplicate_mountpoints() {
        let devices = filter_partitions(vec![
            partition("/dev/sda1", "/", "ext4", 1000),
            partition("/dev/sdb1", "/", "ext4", 5000),
        ]);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device, "/dev/sda1");
        assert_eq!(devices[0].total_bytes, 1000);
        assert_eq!(devices[0].used_bytes, 750);
        assert_eq!(devices[0].free_bytes, 250);
        assert_eq!(devices[0].used_percent, 75.0);
    }

    #[test]
    fn filter_partitions_skips_pseudo_and_empty() {
        let devices = filter_partitions(vec![
            partition("devfs", "/dev", "devfs", 1000),
            partition("map auto_home", "/System/Volumes/Data/home", "autofs", 1000),
            partition("tmp", "/mnt/empty", "ext4", 0),
            partition("/dev/nvme0n1p2", "/home", "btrfs", 2000),
        ]);
        let mounts: Vec<&str> = devices.iter().map(|d| d.mountpoint.as_str()).collect();
        assert_eq!(mounts, vec!["/home"]);
    }

    #[test]
    fn pseudo_duplicate_does_not_shadow_real_mount() {
        // A skipped pseudo entry must not claim the mount point.
        let devices = filter_partitions(vec![
            partition("proc", "/data", "proc", 10),
            partition("/dev/sdc1", "/data", "xfs", 4000),
        ]);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device, "/dev/sdc1");
    }

    #[test]
    fn filter_interfaces_skips_loopback_and_idle_and_sorts() {
        let stats = filter_interfaces(vec![
            interface("wlan0", 10, 20),
            interface("lo", 500, 500),
            interface("docker0", 0, 0),
            interface("eth0", 0, 7),
        ]);
        let names: Vec<&str> = stats.iter().map(|s| s.interface.as_str()).collect();
        assert_eq!(names, vec!["eth0", "wlan0"]);
        assert_eq!(stats[1].bytes_recv, 20);
    }

    #[test]
    fn traffic_totals_ignores_loopback() {
        let totals = traffic_totals(&[
            interface("lo0", 1000, 1000),
            interface("en0", 10, 20),
            interface("en1", 1, 2),
        ]);
        assert_eq!(totals, (11, 22));
    }

    #[test]
    fn resolve_primary_disk_takes_first_non_zero_candidate() {
        let candidates = ["/a", "/b", "/c"];
        let usage = resolve_primary_disk(&candidates, |p| match p.to_str() {
            Some("/a") => Some(DiskUsage::default()),
            Some("/b") => Some(DiskUsage { total: 100, used: 40 }),
            Some("/c") => Some(DiskUsage { total: 900, used: 1 }),
            _ => None,
        });
        assert_eq!(usage, DiskUsage { total: 100, used: 40 });
    }

    #[test]
    fn resolve_primary_disk_skips_missing_candidates() {
        let candidates = ["/missing", "/c"];
        let usage = resolve_primary_disk(&candidates, |p| {
            (p == Path::new("/c")).then_some(DiskUsage { total: 9, used: 3 })
        });
        assert_eq!(usage.total, 9);
    }

    #[test]
    fn resolve_primary_disk_falls_back_to_zero() {
        let candidates = ["/a", "/b"];
        let usage = resolve_primary_disk(&candidates, |_| Some(DiskUsage::default()));
        assert_eq!(usage, DiskUsage { total: 0, used: 0 });
    }

    #[test]
    fn candidates_put_root_before_enumerated_mounts() {
        let candidates = primary_disk_candidates(&[
            partition("/dev/sdb1", "/srv", "ext4", 10),
            partition("/dev/sda1", "/", "ext4", 10),
            partition("proc", "/proc", "proc", 0),
        ]);
        let root_pos = candidates.iter().position(|c| c == Path::new("/"));
        let srv_pos = candidates.iter().position(|c| c == Path::new("/srv"));
        assert!(root_pos < srv_pos);
        assert!(srv_pos.is_some());
        assert!(!candidates.iter().any(|c| c == Path::new("/proc")));
        assert_eq!(candidates.iter().filter(|c| *c == Path::new("/")).count(), 1);
    }
}
