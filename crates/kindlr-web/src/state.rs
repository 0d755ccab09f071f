//! Application state shared across all request handlers.

use std::sync::Arc;

use kindlr_core::metrics::REGISTRY_KINDS;
use kindlr_core::{KindRegistry, SampleEvent, ViewTable};

use crate::cache::{EventCache, SampleCache, get_or_compute, new_cache};
use crate::config::Config;
use crate::error::WebError;
use crate::render::{ViewFn, view_table};
use crate::source::EventSource;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Kind catalog and variant declarations.
    pub registry: Arc<KindRegistry>,

    /// Specialized renderers per `(kind, variant)`.
    pub views: Arc<ViewTable<ViewFn>>,

    /// Where sample events come from.
    pub source: Arc<dyn EventSource>,

    /// Newest samples per kind.
    pub samples: SampleCache,

    /// Single events looked up by id.
    pub events: EventCache,
}

impl AppState {
    /// Build the registry and view table and set up the caches.
    ///
    /// # Errors
    ///
    /// Fails if the built-in registry or view table is inconsistent.
    pub fn new(config: Config, source: Arc<dyn EventSource>) -> kindlr_core::Result<Self> {
        let registry = KindRegistry::builtin()?;
        let views = view_table(&registry)?;

        metrics::gauge!(REGISTRY_KINDS).set(registry.len() as f64);

        tracing::info!(
            kinds = registry.len(),
            source = source.name(),
            cache_ttl_secs = config.cache_ttl.as_secs(),
            sample_limit = config.sample_limit,
            "application state initialized"
        );

        Ok(Self {
            samples: new_cache(config.cache_ttl),
            events: new_cache(config.cache_ttl),
            config: Arc::new(config),
            registry: Arc::new(registry),
            views: Arc::new(views),
            source,
        })
    }

    /// Cached samples for `kind`, newest first.
    pub async fn samples_for(&self, kind: u16) -> Result<Arc<Vec<SampleEvent>>, WebError> {
        let source = Arc::clone(&self.source);
        let limit = self.config.sample_limit;
        get_or_compute(&self.samples, kind, || async move {
            let events = source.fetch_kind(kind, limit).await?;
            Ok(Arc::new(events))
        })
        .await
    }

    /// Samples for `kind`, or an empty list if the source failed.
    ///
    /// Used where one failing kind must not break a whole page.
    pub async fn samples_or_empty(&self, kind: u16) -> Arc<Vec<SampleEvent>> {
        match self.samples_for(kind).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(kind, error = %e, "sample fetch failed");
                Arc::new(Vec::new())
            }
        }
    }

    /// An event of `kind` by hex id, checking cached samples first.
    pub async fn event_for(&self, kind: u16, id_hex: &str) -> Result<Option<SampleEvent>, WebError> {
        let id_hex = id_hex.to_ascii_lowercase();

        if let Some(entry) = self.samples.get(&kind).await
            && let Some(event) = entry.value.iter().find(|e| e.id == id_hex)
        {
            return Ok(Some(event.clone()));
        }

        let source = Arc::clone(&self.source);
        let key = format!("{kind}:{id_hex}");
        get_or_compute(&self.events, key, || async move {
            Ok(source.fetch_event(kind, &id_hex).await?)
        })
        .await
    }
}
