//! Serving haiku: cache first, regenerate when stale, built-ins on failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_core::PoemArtifact;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::builtin;
use super::cache::{CachedBatch, PoemCache};
use super::generator::PoemGenerator;

/// Where a served batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSource {
    /// Served from the cache
    Cached,
    /// Generated by this request
    Fresh,
    /// The built-in set, because generation was unavailable
    Fallback,
}

/// A batch of artifacts as served to a caller.
#[derive(Debug, Clone)]
pub struct PoemBatch {
    pub haikus: Vec<PoemArtifact>,
    pub generated_at: DateTime<Utc>,
    pub source: BatchSource,
}

impl PoemBatch {
    fn from_cache(batch: CachedBatch, source: BatchSource) -> Self {
        Self {
            haikus: batch.poems,
            generated_at: batch.generated_at,
            source,
        }
    }

    fn fallback() -> Self {
        Self {
            haikus: builtin::shuffled(),
            generated_at: Utc::now(),
            source: BatchSource::Fallback,
        }
    }

    pub fn is_cached(&self) -> bool {
        self.source == BatchSource::Cached
    }

    pub fn is_fallback(&self) -> bool {
        self.source == BatchSource::Fallback
    }
}

/// The haiku endpoint's business logic.
pub struct PoemService {
    cache: Arc<PoemCache>,
    generator: PoemGenerator,
    /// Serializes regenerate-and-store.
    regenerating: Mutex<()>,
}

impl PoemService {
    pub fn new(cache: Arc<PoemCache>, generator: PoemGenerator) -> Self {
        Self {
            cache,
            generator,
            regenerating: Mutex::new(()),
        }
    }

    pub fn cache(&self) -> &Arc<PoemCache> {
        &self.cache
    }

    /// Serve a batch, regenerating when the cache is empty, stale, or
    /// `refresh` is set. Never fails.
    pub async fn serve(&self, refresh: bool) -> PoemBatch {
        if !refresh {
            if let Some(batch) = self.cache.get() {
                let age = self.cache.age().map(|a| a.as_secs()).unwrap_or_default();
                info!(age_secs = age, "Serving cached haikus");
                return PoemBatch::from_cache(batch, BatchSource::Cached);
            }
        }

        if !self.generator.is_configured() {
            warn!("OPENROUTER_API_KEY not set, serving built-in haikus");
            return PoemBatch::fallback();
        }

        let seen = self.cache.generation();
        let _guard = self.regenerating.lock().await;

        // Someone else regenerated while we waited.
        if self.cache.generation() != seen {
            if let Some(batch) = self.cache.get() {
                info!("Serving haikus regenerated by a concurrent request");
                return PoemBatch::from_cache(batch, BatchSource::Cached);
            }
        }

        info!(refresh, "Generating fresh haikus");
        match self.generator.generate().await {
            Ok(poems) => {
                let stored = self.cache.put(poems);
                PoemBatch::from_cache(stored, BatchSource::Fresh)
            }
            Err(e) => {
                error!(error = %e, "Haiku generation failed, serving built-ins");
                PoemBatch::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poems::BATCH_SIZE;
    use crate::test_support::{SequentialMockGateway, empty_assembler, poems_json};
    use folio_providers::{FallbackInvoker, ModelChain};
    use std::collections::HashSet;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(86_400);

    fn service(gateway: Arc<SequentialMockGateway>) -> Arc<PoemService> {
        let generator = PoemGenerator::new(FallbackInvoker::new(gateway), empty_assembler())
            .with_chain(ModelChain::new("test", &["m1"]));
        Arc::new(PoemService::new(Arc::new(PoemCache::new(TTL)), generator))
    }

    fn builtin_ids() -> HashSet<String> {
        builtin::builtin_poems().into_iter().map(|p| p.id).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn second_read_within_ttl_is_cached() {
        let gateway = Arc::new(SequentialMockGateway::single_text(&poems_json(10)));
        let service = service(gateway.clone());

        let first = service.serve(false).await;
        assert_eq!(first.source, BatchSource::Fresh);
        assert_eq!(first.haikus.len(), BATCH_SIZE);

        tokio::time::advance(Duration::from_secs(3600)).await;
        let second = service.serve(false).await;
        assert!(second.is_cached());
        assert_eq!(second.haikus, first.haikus);
        assert_eq!(second.generated_at, first.generated_at);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_cache_regenerates() {
        let gateway = Arc::new(SequentialMockGateway::new(vec![Ok(poems_json(10)), Ok(poems_json(10))]));
        let service = service(gateway.clone());

        service.serve(false).await;
        tokio::time::advance(TTL).await;
        let batch = service.serve(false).await;

        assert_eq!(batch.source, BatchSource::Fresh);
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_bypasses_fresh_cache() {
        let gateway = Arc::new(SequentialMockGateway::new(vec![Ok(poems_json(10)), Ok(poems_json(10))]));
        let service = service(gateway.clone());

        service.serve(false).await;
        let batch = service.serve(true).await;

        assert_eq!(batch.source, BatchSource::Fresh);
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn unconfigured_serves_builtins_without_calls() {
        let gateway = Arc::new(SequentialMockGateway::unconfigured());
        let service = service(gateway.clone());

        let batch = service.serve(false).await;
        assert!(batch.is_fallback());
        let ids: HashSet<String> = batch.haikus.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, builtin_ids());
        assert_eq!(gateway.call_count(), 0);
        assert!(service.cache().get().is_none());
    }

    #[tokio::test]
    async fn failed_generation_leaves_cache_untouched() {
        let gateway = Arc::new(SequentialMockGateway::single_text("not json at all"));
        let service = service(gateway.clone());

        let batch = service.serve(false).await;
        assert!(batch.is_fallback());
        assert_eq!(batch.haikus.len(), BATCH_SIZE);
        assert!(service.cache().get().is_none());
        assert_eq!(service.cache().generation(), 0);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_batch() {
        let gateway = Arc::new(SequentialMockGateway::new(vec![Ok(poems_json(10))]));
        let service = service(gateway.clone());

        let first = service.serve(false).await;
        let refreshed = service.serve(true).await;
        assert!(refreshed.is_fallback());

        let after = service.serve(false).await;
        assert!(after.is_cached());
        assert_eq!(after.haikus, first.haikus);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_misses_generate_once() {
        let gateway = Arc::new(
            SequentialMockGateway::new(vec![Ok(poems_json(10)), Ok(poems_json(10))])
                .with_delay(Duration::from_secs(2)),
        );
        let service = service(gateway.clone());

        let a = tokio::spawn({
            let service = service.clone();
            async move { service.serve(false).await }
        });
        let b = tokio::spawn({
            let service = service.clone();
            async move { service.serve(false).await }
        });
        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        assert_eq!(gateway.call_count(), 1);
        assert_eq!(a.haikus, b.haikus);
        let sources: HashSet<_> = [a.source, b.source].into_iter().map(|s| format!("{s:?}")).collect();
        assert!(sources.contains("Fresh"));
    }
}
