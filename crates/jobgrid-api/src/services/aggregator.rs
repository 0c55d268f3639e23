//! Aggregation orchestrator.
//!
//! Per request: cache lookup → on hit, done → on miss, provider fetch →
//! cache write → detail enrichment → pagination normalization. A fetch
//! failure is terminal and skips the cache write; no retries happen at
//! this layer. Concurrent identical requests may each miss and fetch
//! redundantly; the cache makes no at-most-one-fetch-per-key promise.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use jobgrid_core::{Error, JobPage, JobSummary, PageMeta, PageRequest, PagingSignal, Result};
use jobgrid_providers::ProviderRegistry;

use super::enricher::DetailEnricher;
use super::listing_cache::ListingCache;

/// Cached payload: the adapter's raw page, written before enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPage {
    records: Vec<JobSummary>,
    signal: PagingSignal,
}

/// Composes the registry, cache, and enricher into one request pipeline.
pub struct JobAggregator {
    registry: Arc<ProviderRegistry>,
    cache: ListingCache,
    enricher: DetailEnricher,
}

impl JobAggregator {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        cache: ListingCache,
        enricher: DetailEnricher,
    ) -> Self {
        Self {
            registry,
            cache,
            enricher,
        }
    }

    /// Registered provider ids, sorted.
    pub fn provider_ids(&self) -> Vec<String> {
        self.registry.ids().into_iter().map(String::from).collect()
    }

    /// Fetch one normalized page of listings.
    #[instrument(
        skip(self, request),
        fields(
            subsystem = "aggregator",
            op = "fetch_listings",
            provider = %request.provider,
            page = request.page,
            filter_count = request.filters.len(),
        )
    )]
    pub async fn fetch_listings(&self, request: &PageRequest) -> Result<JobPage> {
        if request.page == 0 {
            return Err(Error::InvalidInput("page number must be >= 1".to_string()));
        }
        if request.page_size == 0 {
            return Err(Error::InvalidInput("page size must be >= 1".to_string()));
        }

        let board = self.registry.get(&request.provider)?;
        let key = self
            .cache
            .cache_key(board.id(), &request.filters, request.page);

        if let Some(cached) = self.cache.get::<CachedPage>(&key).await {
            debug!(cache_outcome = "hit", result_count = cached.records.len());
            let pagination = PageMeta::resolve(
                cached.signal,
                request.page,
                request.page_size,
                cached.records.len(),
            );
            return Ok(JobPage {
                records: cached.records,
                pagination,
            });
        }

        debug!(cache_outcome = "miss", "Fetching from provider");
        let start = Instant::now();

        let page = board
            .fetch_page(&request.filters, request.page, request.page_size)
            .await?;

        self.cache
            .set(
                &key,
                &CachedPage {
                    records: page.records.clone(),
                    signal: page.signal,
                },
                board.cache_ttl(),
            )
            .await;

        let records = self.enricher.enrich(board.as_ref(), page.records).await;
        let pagination =
            PageMeta::resolve(page.signal, request.page, request.page_size, records.len());

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            result_count = records.len(),
            duration_ms = elapsed,
            "Listings fetch complete"
        );
        if elapsed > 10_000 {
            warn!(
                duration_ms = elapsed,
                slow = true,
                "Slow listings fetch"
            );
        }

        Ok(JobPage {
            records,
            pagination,
        })
    }
}
