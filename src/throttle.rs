//! Pacing of connection attempts.
//!
//! The gate hands out tickets: a worker takes one ticket before every
//! connection attempt and never returns it. A background refill task banks
//! one ticket per interval, up to a small cap, so attempt *rate* is bounded
//! by the refill interval while concurrency stays bounded by worker count.
//! Workers that fall behind the refill schedule can catch up by at most
//! [`TICKET_BANK`] immediate starts.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Upper bound on banked tickets.
///
/// Refilling pauses at the cap instead of accumulating a burst, so a long
/// stall never turns into a thundering herd of attempts.
const TICKET_BANK: usize = 10;

/// Paced supply of connection-attempt permissions.
///
/// The gate never refuses and never cancels; `acquire` simply waits until
/// the next ticket is banked. It lives for the process lifetime.
pub struct ThrottleGate {
    tickets: Arc<Semaphore>,
    refill: tokio::task::JoinHandle<()>,
}

impl ThrottleGate {
    /// Create a gate that banks one ticket per `interval`.
    ///
    /// The bank starts empty: the first ticket becomes available one full
    /// interval after creation, never immediately.
    pub fn new(interval: Duration) -> Self {
        let tickets = Arc::new(Semaphore::new(0));
        let refill = tokio::spawn(refill_task(tickets.clone(), interval));
        Self { tickets, refill }
    }

    /// Wait for a ticket and consume it.
    pub async fn acquire(&self) {
        match self.tickets.acquire().await {
            Ok(permit) => permit.forget(),
            // The semaphore is never closed.
            Err(_) => std::future::pending().await,
        }
    }
}

impl Drop for ThrottleGate {
    fn drop(&mut self) {
        self.refill.abort();
    }
}

async fn refill_task(tickets: Arc<Semaphore>, interval: Duration) {
    let mut tick = interval_at(Instant::now() + interval, interval);
    // Match a wall-clock ticker: delayed ticks are skipped, never bursted.
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tick.tick().await;
        if tickets.available_permits() < TICKET_BANK {
            tickets.add_permits(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn first_ticket_takes_one_full_interval() {
        let gate = ThrottleGate::new(INTERVAL);
        let start = Instant::now();
        gate.acquire().await;
        assert!(start.elapsed() >= INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_tickets_are_at_least_an_interval_apart() {
        let gate = ThrottleGate::new(INTERVAL);
        let mut last = None;
        for _ in 0..5 {
            gate.acquire().await;
            let now = Instant::now();
            if let Some(prev) = last {
                assert!(now - prev >= INTERVAL);
            }
            last = Some(now);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn bank_never_exceeds_its_cap() {
        let gate = ThrottleGate::new(INTERVAL);
        tokio::time::sleep(INTERVAL * 100 + INTERVAL / 2).await;
        assert_eq!(gate.tickets.available_permits(), TICKET_BANK);
    }

    #[tokio::test(start_paused = true)]
    async fn banked_tickets_allow_catch_up_then_pacing_resumes() {
        let gate = ThrottleGate::new(INTERVAL);
        tokio::time::sleep(INTERVAL * 100 + INTERVAL / 2).await;

        // The banked tickets are consumed without waiting.
        let start = Instant::now();
        for _ in 0..TICKET_BANK {
            gate.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);

        // The next acquire waits for a fresh refill.
        gate.acquire().await;
        assert!(start.elapsed() >= INTERVAL / 2);
    }
}
