//! wsflood - throttled load generation for long-lived WebSocket connections.
//!
//! The crate drives a configurable number of concurrent WebSocket
//! connections against one or more targets, paces new connection attempts
//! through a ticket gate, retries failed or dropped connections forever,
//! and reports live aggregate statistics.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument surface and target resolution
//! - [`connector`] - The connection capability: traits plus the
//!   tokio-tungstenite implementation
//! - [`engine`] - The pool coordinator fanning workers out per target
//! - [`error`] - Error types for the crate
//! - [`logging`] - tracing subscriber setup
//! - [`stats`] - Atomic counters and the periodic reporter
//! - [`target`] - Target descriptors and the target-file format
//! - [`throttle`] - Pacing of connection attempts
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use wsflood::connector::WebSocketConnector;
//! use wsflood::engine::Engine;
//! use wsflood::target::Target;
//!
//! # async fn run() -> Result<(), wsflood::error::Error> {
//! let target = Target::new("wss://example.com", Default::default())?;
//! let engine = Engine::new(Arc::new(WebSocketConnector));
//! // Runs until the process is killed.
//! engine.run(vec![target], 10, Duration::from_millis(200)).await;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod connector;
pub mod engine;
pub mod error;
pub mod logging;
pub mod stats;
pub mod target;
pub mod throttle;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
