// Disk / partition models

use serde::{Deserialize, Serialize};

use super::usage_percent;

/// Used/total capacity of a single mount point. All zeroes means "no usable disk".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
}

impl DiskUsage {
    pub fn from_total_and_available(total: u64, available: u64) -> Self {
        Self {
            total,
            used: total.saturating_sub(available),
        }
    }

    pub fn percent(&self) -> f64 {
        usage_percent(self.used, self.total)
    }
}

/// One partition as listed by GET /api/disks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskDevice {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub used_percent: f64,
}
