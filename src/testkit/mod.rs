//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`connector`] — Scripted mock implementations of
//!   [`Connector`](crate::connector::Connector): per-attempt outcomes with
//!   shared attempt/close counters.

pub mod connector;

use http::HeaderMap;

use crate::target::Target;

/// Build a header-less target for tests.
pub fn target(endpoint: &str) -> Target {
    Target::new(endpoint, HeaderMap::new()).expect("valid test endpoint")
}
