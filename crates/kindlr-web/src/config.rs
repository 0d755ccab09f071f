//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Relays queried for sample events when no fixture file is configured.
pub const DEFAULT_RELAYS: &[&str] = &[
    "wss://relay.damus.io",
    "wss://nos.lol",
    "wss://relay.primal.net",
    "wss://relay.nostr.band",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Relay URLs used for sample events.
    pub relays: Vec<String>,

    /// JSONL file of events served instead of querying relays.
    pub fixture_path: Option<PathBuf>,

    /// Skip ID/signature verification when loading the fixture file.
    pub fixture_skip_verify: bool,

    /// Sample events kept per kind.
    pub sample_limit: usize,

    /// Upper bound on a single relay fetch.
    pub fetch_timeout: Duration,

    /// How long fetched samples stay cached.
    pub cache_ttl: Duration,

    /// Port for the Prometheus `/metrics` listener. Disabled when unset.
    pub metrics_port: Option<u16>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        _ => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `KINDLR_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `KINDLR_RELAYS`: Comma-separated relay URLs (default: [`DEFAULT_RELAYS`])
    /// - `KINDLR_FIXTURE_PATH`: JSONL event file; replaces relays when set
    /// - `KINDLR_FIXTURE_SKIP_VERIFY`: "true" to skip signature checks on the fixture
    /// - `KINDLR_SAMPLE_LIMIT`: Samples per kind (default: 5, at least 1)
    /// - `KINDLR_FETCH_TIMEOUT_SECS`: Relay fetch timeout (default: 5)
    /// - `KINDLR_CACHE_TTL_SECS`: Sample cache TTL (default: 300)
    /// - `KINDLR_METRICS_PORT`: Prometheus port (default: disabled)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env_or("KINDLR_BIND_ADDR", "0.0.0.0:8080");

        let relays: Vec<String> = std::env::var("KINDLR_RELAYS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let relays = if relays.is_empty() {
            DEFAULT_RELAYS.iter().map(|s| s.to_string()).collect()
        } else {
            relays
        };

        for relay in &relays {
            if !(relay.starts_with("wss://") || relay.starts_with("ws://")) {
                anyhow::bail!("invalid relay URL in KINDLR_RELAYS: {relay}");
            }
        }

        let fixture_path = std::env::var("KINDLR_FIXTURE_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let fixture_skip_verify = parse_env("KINDLR_FIXTURE_SKIP_VERIFY", false)?;

        let sample_limit: usize = parse_env("KINDLR_SAMPLE_LIMIT", 5)?;
        if sample_limit == 0 {
            anyhow::bail!("KINDLR_SAMPLE_LIMIT must be at least 1");
        }

        let fetch_timeout = Duration::from_secs(parse_env("KINDLR_FETCH_TIMEOUT_SECS", 5)?);
        let cache_ttl = Duration::from_secs(parse_env("KINDLR_CACHE_TTL_SECS", 300)?);

        let metrics_port = match std::env::var("KINDLR_METRICS_PORT") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u16>()
                    .with_context(|| format!("invalid value for KINDLR_METRICS_PORT: {raw:?}"))?,
            ),
            _ => None,
        };

        tracing::info!(
            bind_addr = %bind_addr,
            relay_count = relays.len(),
            fixture = ?fixture_path,
            sample_limit,
            fetch_timeout_secs = fetch_timeout.as_secs(),
            cache_ttl_secs = cache_ttl.as_secs(),
            metrics_port = ?metrics_port,
            "kindlr configuration loaded"
        );

        Ok(Self {
            bind_addr,
            relays,
            fixture_path,
            fixture_skip_verify,
            sample_limit,
            fetch_timeout,
            cache_ttl,
            metrics_port,
        })
    }
}
