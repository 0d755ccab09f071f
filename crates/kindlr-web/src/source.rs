//! Where sample events come from.
//!
//! [`RelaySource`] queries live relays through `nostr-sdk`. [`JsonlSource`]
//! serves a fixed set of events read from a JSONL file (one event per line),
//! which is what tests and offline deployments use.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use kindlr_core::metrics::{SAMPLE_FETCH_SECONDS, SAMPLE_FETCH_TOTAL};
use kindlr_core::{SampleEvent, parse_event_unverified, validate_event};
use nostr_sdk::prelude::*;

/// A provider of sample events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Up to `limit` events of `kind`, newest first.
    async fn fetch_kind(&self, kind: u16, limit: usize) -> anyhow::Result<Vec<SampleEvent>>;

    /// One event of `kind` by hex id.
    async fn fetch_event(&self, kind: u16, id_hex: &str) -> anyhow::Result<Option<SampleEvent>>;
}

fn record_fetch(source: &'static str, outcome: &'static str, started: Instant) {
    metrics::counter!(SAMPLE_FETCH_TOTAL, "source" => source, "outcome" => outcome).increment(1);
    metrics::histogram!(SAMPLE_FETCH_SECONDS, "source" => source)
        .record(started.elapsed().as_secs_f64());
}

fn newest_first(mut events: Vec<SampleEvent>, limit: usize) -> Vec<SampleEvent> {
    events.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    events.truncate(limit);
    events
}

/// Samples fetched from relays.
pub struct RelaySource {
    client: Client,
    timeout: Duration,
}

impl RelaySource {
    /// Add every relay and start connecting in the background.
    ///
    /// Relays that cannot be added are logged and skipped; it is an error
    /// only when none can be added.
    pub async fn connect(relays: &[String], timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::default();
        let mut added = 0usize;
        for relay in relays {
            match client.add_relay(relay.as_str()).await {
                Ok(_) => added += 1,
                Err(e) => tracing::warn!(relay = %relay, error = %e, "failed to add relay"),
            }
        }
        if added == 0 {
            anyhow::bail!("none of the {} configured relays could be added", relays.len());
        }
        client.connect().await;

        tracing::info!(relay_count = added, "relay source connected");

        Ok(Self { client, timeout })
    }

    async fn fetch(&self, filter: Filter) -> anyhow::Result<Vec<SampleEvent>> {
        let started = Instant::now();
        match self.client.fetch_events(filter, self.timeout).await {
            Ok(events) => {
                record_fetch(self.name(), "ok", started);
                Ok(events.into_iter().map(SampleEvent::from).collect())
            }
            Err(e) => {
                record_fetch(self.name(), "error", started);
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl EventSource for RelaySource {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn fetch_kind(&self, kind: u16, limit: usize) -> anyhow::Result<Vec<SampleEvent>> {
        let filter = Filter::new().kind(Kind::from(kind)).limit(limit);
        let events = self.fetch(filter).await?;
        tracing::debug!(kind, count = events.len(), "fetched samples from relays");
        Ok(newest_first(events, limit))
    }

    async fn fetch_event(&self, kind: u16, id_hex: &str) -> anyhow::Result<Option<SampleEvent>> {
        let id = EventId::from_hex(id_hex)?;
        let filter = Filter::new().id(id).kind(Kind::from(kind)).limit(1);
        Ok(self.fetch(filter).await?.into_iter().next())
    }
}

/// Samples served from memory, loaded once from a JSONL file.
#[derive(Debug, Default)]
pub struct JsonlSource {
    by_kind: HashMap<u16, Vec<SampleEvent>>,
}

impl JsonlSource {
    /// Build from already-parsed events.
    pub fn from_events(events: impl IntoIterator<Item = SampleEvent>) -> Self {
        let mut by_kind: HashMap<u16, Vec<SampleEvent>> = HashMap::new();
        for event in events {
            by_kind.entry(event.kind).or_default().push(event);
        }
        for events in by_kind.values_mut() {
            let all = std::mem::take(events);
            *events = newest_first(all, usize::MAX);
        }
        Self { by_kind }
    }

    /// Parse JSONL text. Blank lines are skipped; invalid lines are logged
    /// and skipped.
    ///
    /// With `verify` each event's id and signature are checked.
    pub fn parse(text: &str, verify: bool) -> Self {
        let mut skipped = 0usize;
        let events: Vec<SampleEvent> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(i, line)| {
                let parsed = if verify {
                    validate_event(line)
                } else {
                    parse_event_unverified(line)
                };
                match parsed {
                    Ok(event) => Some(event),
                    Err(e) => {
                        skipped += 1;
                        tracing::warn!(line = i + 1, error = %e, "skipping invalid fixture event");
                        None
                    }
                }
            })
            .collect();

        tracing::info!(loaded = events.len(), skipped, "fixture events parsed");
        Self::from_events(events)
    }

    /// Read and parse a JSONL file.
    pub async fn load(path: &Path, verify: bool) -> anyhow::Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to read fixture {}: {e}", path.display()))?;
        Ok(Self::parse(&text, verify))
    }
}

#[async_trait]
impl EventSource for JsonlSource {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn fetch_kind(&self, kind: u16, limit: usize) -> anyhow::Result<Vec<SampleEvent>> {
        let started = Instant::now();
        let events = self
            .by_kind
            .get(&kind)
            .map(|events| events.iter().take(limit).cloned().collect())
            .unwrap_or_default();
        record_fetch(self.name(), "ok", started);
        Ok(events)
    }

    async fn fetch_event(&self, kind: u16, id_hex: &str) -> anyhow::Result<Option<SampleEvent>> {
        Ok(self
            .by_kind
            .get(&kind)
            .and_then(|events| events.iter().find(|e| e.id.eq_ignore_ascii_case(id_hex)))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr::{EventBuilder, JsonUtil, Keys};

    fn sample(kind: u16, created_at: u64, id_char: char) -> SampleEvent {
        SampleEvent {
            id: id_char.to_string().repeat(64),
            pubkey: "b".repeat(64),
            created_at,
            kind,
            tags: Vec::new(),
            content: String::new(),
            sig: "c".repeat(128),
        }
    }

    #[tokio::test]
    async fn test_from_events_groups_newest_first() {
        let source = JsonlSource::from_events([
            sample(1, 10, 'a'),
            sample(1, 30, 'b'),
            sample(7, 5, 'c'),
            sample(1, 20, 'd'),
        ]);

        let notes = source.fetch_kind(1, 10).await.unwrap();
        let times: Vec<u64> = notes.iter().map(|e| e.created_at).collect();
        assert_eq!(times, vec![30, 20, 10]);

        assert_eq!(source.fetch_kind(1, 2).await.unwrap().len(), 2);
        assert!(source.fetch_kind(3, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_event_by_id() {
        let source = JsonlSource::from_events([sample(1, 10, 'a'), sample(7, 5, 'd')]);

        let found = source.fetch_event(1, &"A".repeat(64)).await.unwrap();
        assert_eq!(found.map(|e| e.created_at), Some(10));

        // Right id, wrong kind
        assert!(source.fetch_event(1, &"d".repeat(64)).await.unwrap().is_none());
    }

    #[test]
    fn test_parse_verified_skips_bad_lines() {
        let keys = Keys::generate();
        let good = EventBuilder::text_note("hello")
            .sign_with_keys(&keys)
            .unwrap()
            .as_json();
        let text = format!("{good}\n\nnot json\n{}\n", good.replace("hello", "tampered"));

        let source = JsonlSource::parse(&text, true);
        assert_eq!(source.by_kind.get(&1).map(Vec::len), Some(1));
    }

    #[test]
    fn test_parse_unverified_accepts_unsigned_shapes() {
        let line = serde_json::to_string(&sample(30023, 1, 'e')).unwrap();
        let source = JsonlSource::parse(&line, false);
        assert_eq!(source.by_kind.keys().copied().collect::<Vec<_>>(), vec![30023]);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let err = JsonlSource::load(Path::new("/nonexistent/kindlr.jsonl"), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read fixture"));
    }
}
