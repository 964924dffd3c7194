// Shared test helpers

#![allow(dead_code)]

use hostpulse::models::Snapshot;
use hostpulse::sampler::Sampler;
use std::sync::atomic::{AtomicU64, Ordering};

pub fn minimal_snapshot(timestamp: u64) -> Snapshot {
    Snapshot {
        hostname: "test-host".into(),
        os: "linux".into(),
        timestamp,
        ..Default::default()
    }
}

/// Sampler that returns instantly with timestamps 1, 2, 3, ...
#[derive(Default)]
pub struct CountingSampler {
    next: AtomicU64,
}

impl CountingSampler {
    pub fn samples_taken(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Sampler for CountingSampler {
    async fn sample(&self) -> Snapshot {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        minimal_snapshot(n)
    }
}
