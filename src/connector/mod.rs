//! The connection capability: opening, reading, and closing one connection.
//!
//! The engine drives connections purely through these traits and never sees
//! the wire protocol. The production implementation is
//! [`WebSocketConnector`]; tests substitute the scripted connectors from
//! `crate::testkit`.

use async_trait::async_trait;

use crate::error::Result;
use crate::target::Target;

mod websocket;

pub use websocket::WebSocketConnector;

/// Opens connections to a target.
///
/// Shared by every worker (`Arc<dyn Connector>`); implementations must be
/// safe to call concurrently.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempt to open one connection.
    async fn connect(&self, target: &Target) -> Result<Box<dyn Connection>>;
}

/// One live connection, owned by the worker that opened it.
///
/// A handle never reopens; a new attempt creates a new handle.
#[async_trait]
pub trait Connection: Send {
    /// Wait for the next message and discard it.
    ///
    /// Returns an error once the connection has ended for any reason:
    /// remote close, protocol error, or transport failure.
    async fn read_next(&mut self) -> Result<()>;

    /// Close the connection. Called exactly once per handle, on every worker
    /// exit path; transport errors during close are swallowed.
    async fn close(&mut self);
}
