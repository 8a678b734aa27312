//! Load-test target descriptors and their two configuration sources:
//! `key=value` header tokens from the command line and the line-oriented
//! target file format.
//!
//! A target file holds one target per line; blank lines and lines starting
//! with `#` are skipped:
//!
//! ```text
//! wss://example.com cookie=user=123 origin=https://app.example.com
//! wss://example2.com
//! ```

use std::fs;
use std::path::Path;

use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::ConfigError;

/// One load-test destination: an endpoint and the headers to attach to its
/// connection requests.
///
/// Constructed once at startup and shared read-only by every worker driving
/// connections at it.
#[derive(Debug, Clone)]
pub struct Target {
    /// Endpoint URL exactly as the user supplied it.
    pub endpoint: String,
    /// Headers attached to every connection request. May be empty.
    pub headers: HeaderMap,
}

impl Target {
    /// Build a target, validating that the endpoint is a `ws://` or `wss://`
    /// URL. The original string is kept verbatim for dialing and logging.
    pub fn new(endpoint: impl Into<String>, headers: HeaderMap) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        let url = Url::parse(&endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "ws" | "wss" => Ok(Self { endpoint, headers }),
            other => {
                let reason = format!("unsupported scheme {other}, expected ws or wss");
                Err(ConfigError::InvalidEndpoint { endpoint, reason })
            }
        }
    }
}

/// Parse a single `key=value` header token.
///
/// The token is split on the FIRST `=` only, so values may themselves
/// contain `=` (`cookie=user=123` is the header `cookie: user=123`).
pub fn parse_header(token: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let (key, value) = token.split_once('=').ok_or_else(|| ConfigError::MalformedHeader {
        token: token.to_string(),
    })?;
    let invalid = |reason: String| ConfigError::InvalidHeader {
        token: token.to_string(),
        reason,
    };
    let name = key.parse::<HeaderName>().map_err(|e| invalid(e.to_string()))?;
    let value = value.parse::<HeaderValue>().map_err(|e| invalid(e.to_string()))?;
    Ok((name, value))
}

/// Parse a list of `key=value` tokens into a header map.
///
/// Repeated names accumulate values rather than overwriting.
pub fn parse_headers<S: AsRef<str>>(tokens: &[S]) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    for token in tokens {
        let (name, value) = parse_header(token.as_ref())?;
        headers.append(name, value);
    }
    Ok(headers)
}

/// Read a target list from a file.
///
/// Lines are whitespace-trimmed; empty lines and `#` comments are skipped.
/// The first whitespace-delimited token of a line is the endpoint, every
/// following token a `key=value` header. Any malformed token is fatal and
/// reports the offending (1-based) line number.
pub fn from_file(path: &Path) -> Result<Vec<Target>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut targets = Vec::new();
    for (i, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let at_line = |e: ConfigError| ConfigError::MalformedLine {
            line: i + 1,
            reason: e.to_string(),
        };

        let mut tokens = line.split_whitespace();
        // split_whitespace on a non-empty line always yields a first token
        let endpoint = tokens.next().unwrap_or_default();
        let headers = parse_headers(&tokens.collect::<Vec<_>>()).map_err(at_line)?;
        targets.push(Target::new(endpoint, headers).map_err(at_line)?);
    }

    Ok(targets)
}
