//! Command-line interface definitions.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;
use crate::target::{self, Target};

/// Throttled load generator for long-lived WebSocket connections.
///
/// Opens `--connections` concurrent connections to every target, paces new
/// attempts by `--throttle`, retries dropped connections forever, and logs
/// aggregate stats every five seconds. Runs until killed.
#[derive(Parser, Debug)]
#[command(name = "wsflood")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Read the target list from a file (one `<url> [key=value ...]` per
    /// line; `#` comments and blank lines are skipped). Takes precedence
    /// over --url.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Target URL (ws:// or wss://)
    #[arg(long)]
    pub url: Option<String>,

    /// Add a header to the connection request (key=value, repeatable; only
    /// used with --url)
    #[arg(short = 'H', long = "header", value_name = "KEY=VALUE")]
    pub headers: Vec<String>,

    /// Number of concurrent connections per target
    #[arg(short = 'c', long, default_value_t = 1)]
    pub connections: usize,

    /// Allow a new connection attempt every interval (e.g. 200ms, 1s)
    #[arg(long, default_value = "200ms", value_parser = humantime::parse_duration)]
    pub throttle: Duration,

    /// Log every connection failure with its error text
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Reject values the engine cannot run with before anything is spawned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connections",
                reason: "must be > 0",
            });
        }
        if self.throttle.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "throttle",
                reason: "must be > 0",
            });
        }
        Ok(())
    }

    /// Resolve the configured targets.
    ///
    /// `--file` wins when both sources are given; with `--url` the
    /// `--header` tokens are attached to the single target.
    pub fn targets(&self) -> Result<Vec<Target>, ConfigError> {
        if let Some(path) = &self.file {
            return target::from_file(path);
        }
        if let Some(url) = &self.url {
            let headers = target::parse_headers(&self.headers)?;
            return Ok(vec![Target::new(url.clone(), headers)?]);
        }
        Err(ConfigError::MissingTarget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("parse args")
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let args = parse(&["wsflood", "--url", "wss://example.com"]);
        assert_eq!(args.connections, 1);
        assert_eq!(args.throttle, Duration::from_millis(200));
        assert!(!args.verbose);
        assert!(args.headers.is_empty());
    }

    #[test]
    fn throttle_accepts_humantime_durations() {
        let args = parse(&["wsflood", "--url", "wss://example.com", "--throttle", "1s"]);
        assert_eq!(args.throttle, Duration::from_secs(1));
    }

    #[test]
    fn url_target_carries_parsed_headers() {
        let args = parse(&[
            "wsflood",
            "--url",
            "wss://example.com",
            "-H",
            "cookie=user=123",
            "-H",
            "origin=https://app.example.com",
        ]);
        let targets = args.targets().expect("targets");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].endpoint, "wss://example.com");
        assert_eq!(targets[0].headers.get("cookie").unwrap(), "user=123");
    }

    #[test]
    fn missing_url_and_file_is_an_error() {
        let args = parse(&["wsflood"]);
        assert!(matches!(
            args.targets().unwrap_err(),
            ConfigError::MissingTarget
        ));
    }

    #[test]
    fn malformed_header_token_is_an_error() {
        let args = parse(&["wsflood", "--url", "wss://example.com", "-H", "malformed"]);
        assert!(matches!(
            args.targets().unwrap_err(),
            ConfigError::MalformedHeader { .. }
        ));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let args = parse(&["wsflood", "--url", "wss://example.com", "-c", "0"]);
        assert!(matches!(
            args.validate().unwrap_err(),
            ConfigError::InvalidValue { field: "connections", .. }
        ));
    }

    #[test]
    fn zero_throttle_is_rejected() {
        let args = parse(&["wsflood", "--url", "wss://example.com", "--throttle", "0s"]);
        assert!(matches!(
            args.validate().unwrap_err(),
            ConfigError::InvalidValue { field: "throttle", .. }
        ));
    }
}
