//! Scripted mock connectors.
//!
//! [`ScriptedConnector`] pops one [`Outcome`] per connection attempt from a
//! script (falling back to a fixed outcome once the script is exhausted) and
//! counts attempts and closes, so tests can assert on retry and lifecycle
//! behavior without a network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::connector::{Connection, Connector};
use crate::error::{Error, Result};
use crate::target::Target;

/// Behavior of one scripted connection attempt.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    /// The attempt fails.
    Fail,
    /// The attempt succeeds and the connection delivers this many messages,
    /// one per configured delay, before ending.
    Serve(usize),
    /// The attempt succeeds and the connection stays open forever without
    /// delivering anything.
    Hold,
}

/// Mock connector with scripted per-attempt outcomes.
pub struct ScriptedConnector {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
    message_delay: Duration,
    connect_attempts: AtomicU32,
    closed_connections: Arc<AtomicU32>,
}

impl ScriptedConnector {
    /// A connector applying the same outcome to every attempt.
    pub fn always(outcome: Outcome) -> Self {
        Self::with_script(Vec::new(), outcome)
    }

    /// A connector that plays `script` front to back, then `fallback`.
    pub fn with_script(script: Vec<Outcome>, fallback: Outcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            message_delay: Duration::from_millis(1),
            connect_attempts: AtomicU32::new(0),
            closed_connections: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Override the delay between served messages.
    pub fn with_message_delay(mut self, delay: Duration) -> Self {
        self.message_delay = delay;
        self
    }

    /// Number of connection attempts so far, failures included.
    pub fn connect_attempts(&self) -> u32 {
        self.connect_attempts.load(Ordering::Relaxed)
    }

    /// Number of connections closed so far.
    pub fn closed_connections(&self) -> u32 {
        self.closed_connections.load(Ordering::Relaxed)
    }

    fn next_outcome(&self) -> Outcome {
        self.script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self, _target: &Target) -> Result<Box<dyn Connection>> {
        self.connect_attempts.fetch_add(1, Ordering::Relaxed);
        let connection = |remaining| ScriptedConnection {
            remaining,
            message_delay: self.message_delay,
            closed: self.closed_connections.clone(),
        };
        match self.next_outcome() {
            Outcome::Fail => Err(Error::Connection("scripted connect failure".into())),
            Outcome::Serve(messages) => Ok(Box::new(connection(Some(messages)))),
            Outcome::Hold => Ok(Box::new(connection(None))),
        }
    }
}

struct ScriptedConnection {
    /// Messages left to deliver; `None` holds the connection open forever.
    remaining: Option<usize>,
    message_delay: Duration,
    closed: Arc<AtomicU32>,
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn read_next(&mut self) -> Result<()> {
        match &mut self.remaining {
            None => std::future::pending().await,
            Some(0) => Err(Error::ConnectionClosed),
            Some(n) => {
                tokio::time::sleep(self.message_delay).await;
                *n -= 1;
                Ok(())
            }
        }
    }

    async fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::Relaxed);
    }
}
