// Background collection worker: one sample per tick, appended to the history buffer.

use crate::history::HistoryBuffer;
use crate::sampler::Sampler;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::Instrument;

/// Sampler, history and shutdown for the worker.
pub struct WorkerDeps<S> {
    pub sampler: Arc<S>,
    pub history: Arc<HistoryBuffer>,
    /// Fired (or dropped) to stop the worker; checked once per tick.
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub sample_interval_ms: u64,
    /// How often to log history stats at INFO (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Spawns the collection loop. Zero periods are raised to one unit. Ticks that fire while
/// a sample is still running are skipped, so the effective period is
/// max(sample_interval_ms, sampler latency).
pub fn spawn<S: Sampler>(deps: WorkerDeps<S>, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        sampler,
        history,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        sample_interval_ms,
        stats_log_interval_secs,
    } = config;

    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", sample_interval_ms);

    tokio::spawn(
        async move {
            let mut tick = interval(Duration::from_millis(sample_interval_ms.max(1)));
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut stats_log_tick =
                interval(Duration::from_secs(stats_log_interval_secs.max(1)));
            stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut ticks_total: u64 = 0;

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        let snapshot = sampler.sample().await;
                        history.push(snapshot);
                        ticks_total += 1;
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Worker shutting down");
                        break;
                    }
                    _ = stats_log_tick.tick() => {
                        tracing::info!(
                            history_len = history.len(),
                            history_capacity = history.capacity(),
                            ticks_total,
                            "history stats"
                        );
                    }
                }
            }
        }
        .instrument(worker_span),
    )
}
