//! The per-slot connection worker.

use std::sync::Arc;

use tracing::debug;

use crate::connector::Connector;
use crate::stats::StatsRegistry;
use crate::target::Target;
use crate::throttle::ThrottleGate;

/// Everything one worker needs, shared by reference with the pool.
pub(super) struct WorkerContext {
    /// Slot number, used only for log correlation.
    pub(super) id: usize,
    pub(super) target: Arc<Target>,
    pub(super) connector: Arc<dyn Connector>,
    pub(super) gate: Arc<ThrottleGate>,
    pub(super) stats: Arc<StatsRegistry>,
}

/// Drive one connection slot forever: take a ticket, attempt the
/// connection, hold it reading messages until it ends, repeat.
///
/// Every termination counts as an error: the read loop exposes no
/// "expected closure" signal, so a clean remote close and a dropped
/// connection are indistinguishable in the counters. Failed attempts are
/// retried without limit or backoff beyond the gate's pacing.
pub(super) async fn worker_loop(ctx: WorkerContext) {
    loop {
        ctx.gate.acquire().await;

        let mut conn = match ctx.connector.connect(&ctx.target).await {
            Ok(conn) => conn,
            Err(e) => {
                ctx.stats.record_error();
                debug!(worker = ctx.id, endpoint = %ctx.target.endpoint, error = %e, "connect failed");
                continue;
            }
        };

        ctx.stats.connection_opened();
        debug!(worker = ctx.id, endpoint = %ctx.target.endpoint, "connected");

        let err = loop {
            match conn.read_next().await {
                Ok(()) => ctx.stats.record_message(),
                Err(e) => break e,
            }
        };
        ctx.stats.record_error();
        debug!(worker = ctx.id, endpoint = %ctx.target.endpoint, error = %err, "connection ended");

        conn.close().await;
        ctx.stats.connection_closed();
    }
}
