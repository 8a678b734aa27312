//! The connection-pool engine.
//!
//! # Architecture
//!
//! [`Engine::run`] fans one worker task out per requested connection slot
//! (`targets × connections_per_target`), all spawned eagerly. Every worker
//! self-throttles through a shared [`ThrottleGate`] before each attempt, so
//! ramp-up rate is decoupled from spawn time, and updates the shared
//! [`StatsRegistry`] as connections come and go. A background reporter logs
//! a stats snapshot every five seconds.
//!
//! Workers retry forever and never terminate on their own; `run` awaits
//! them all and therefore never returns under normal operation. The process
//! runs until it is killed.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::info;

use crate::connector::Connector;
use crate::stats::{spawn_reporter, StatsRegistry};
use crate::target::Target;
use crate::throttle::ThrottleGate;

mod worker;


use worker::{worker_loop, WorkerContext};

/// Interval between logged stats snapshots.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Coordinates the worker pool: owns the stats registry, the throttle gate,
/// and the periodic reporter.
pub struct Engine {
    connector: Arc<dyn Connector>,
    stats: Arc<StatsRegistry>,
}

impl Engine {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            stats: Arc::new(StatsRegistry::new()),
        }
    }

    /// Shared handle to the engine's counters, for observation.
    pub fn stats(&self) -> Arc<StatsRegistry> {
        self.stats.clone()
    }

    /// Drive `connections_per_target` connection slots at every target,
    /// pacing attempts by `throttle`.
    ///
    /// Spawns all workers immediately and awaits them; since workers retry
    /// forever, this future completes only if there are no slots to run.
    pub async fn run(
        &self,
        targets: Vec<Target>,
        connections_per_target: usize,
        throttle: Duration,
    ) {
        let gate = Arc::new(ThrottleGate::new(throttle));
        let reporter = spawn_reporter(self.stats.clone(), REPORT_INTERVAL);

        info!(
            targets = targets.len(),
            connections_per_target,
            throttle = ?throttle,
            "starting connection pool"
        );

        let mut handles = Vec::with_capacity(targets.len() * connections_per_target);
        let mut worker_id = 0;
        for target in targets {
            let target = Arc::new(target);
            for _ in 0..connections_per_target {
                worker_id += 1;
                handles.push(tokio::spawn(worker_loop(WorkerContext {
                    id: worker_id,
                    target: target.clone(),
                    connector: self.connector.clone(),
                    gate: gate.clone(),
                    stats: self.stats.clone(),
                })));
            }
        }

        join_all(handles).await;
        reporter.abort();
    }
}
