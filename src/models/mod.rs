// Wire models served by the HTTP surface

mod network;
mod snapshot;
mod storage;

pub use network::NetworkStats;
pub use snapshot::{Snapshot, bytes_to_gib, format_uptime, usage_percent};
pub use storage::{DiskDevice, DiskUsage};
