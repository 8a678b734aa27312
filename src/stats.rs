//! Shared load-test statistics.
//!
//! A single [`StatsRegistry`] is created at startup and shared by every
//! worker. All counters are plain atomics updated with single indivisible
//! operations; there is no cross-counter consistency requirement, so the
//! reporter may observe slightly stale combinations. That is acceptable for
//! a monitoring signal.

use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

/// Counters updated atomically by every connection worker.
///
/// `errors` and `messages_read` are cumulative since process start and never
/// reset; `active_connections` is a live gauge.
#[derive(Debug, Default)]
pub struct StatsRegistry {
    /// Currently open connections.
    active_connections: AtomicI64,
    /// Failed attempts and terminated connections since start.
    errors: AtomicU64,
    /// Messages successfully read across all connections since start.
    messages_read: AtomicU64,
}

impl StatsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully opened connection.
    pub fn connection_opened(&self) {
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a closed connection.
    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record one failed attempt or terminated connection.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one message read from any connection.
    pub fn record_message(&self) {
        self.messages_read.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current counter values.
    ///
    /// Each counter is loaded independently; the combination is not a
    /// point-in-time snapshot of all three.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            active_connections: self.active_connections.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            messages_read: self.messages_read.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the registry's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub active_connections: i64,
    pub errors: u64,
    pub messages_read: u64,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "connections={} read_messages={} errors_since_start={}",
            self.active_connections, self.messages_read, self.errors
        )
    }
}

/// Spawn the periodic stats reporter.
///
/// Logs one snapshot line per `interval` for as long as the process runs.
pub fn spawn_reporter(
    stats: Arc<StatsRegistry>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval_at(
            tokio::time::Instant::now() + interval,
            interval,
        );
        loop {
            tick.tick().await;
            let s = stats.snapshot();
            info!(
                connections = s.active_connections,
                read_messages = s.messages_read,
                errors_since_start = s.errors,
                "stats"
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_increments_are_never_lost() {
        const WORKERS: usize = 8;
        const INCREMENTS: u64 = 10_000;

        let stats = Arc::new(StatsRegistry::new());
        let handles: Vec<_> = (0..WORKERS)
            .map(|_| {
                let stats = stats.clone();
                thread::spawn(move || {
                    for _ in 0..INCREMENTS {
                        stats.record_error();
                        stats.record_message();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("worker thread");
        }

        let s = stats.snapshot();
        assert_eq!(s.errors, WORKERS as u64 * INCREMENTS);
        assert_eq!(s.messages_read, WORKERS as u64 * INCREMENTS);
    }

    #[test]
    fn gauge_tracks_opens_and_closes() {
        let stats = StatsRegistry::new();
        stats.connection_opened();
        stats.connection_opened();
        assert_eq!(stats.snapshot().active_connections, 2);
        stats.connection_closed();
        assert_eq!(stats.snapshot().active_connections, 1);
        stats.connection_closed();
        assert_eq!(stats.snapshot().active_connections, 0);
    }

    #[test]
    fn snapshot_formats_like_the_log_line() {
        let stats = StatsRegistry::new();
        stats.connection_opened();
        stats.record_message();
        stats.record_message();
        stats.record_error();
        assert_eq!(
            stats.snapshot().to_string(),
            "connections=1 read_messages=2 errors_since_start=1"
        );
    }
}
