//! Concurrent per-record detail enrichment.
//!
//! For boards whose feed carries no descriptions, each page record needs a
//! secondary fetch. All fetches for one page run concurrently under a
//! bounded limit and a per-fetch timeout; the enricher joins on every one
//! of them before returning. A failed or timed-out fetch leaves that one
//! record with whatever short description the feed shipped; a single bad
//! record never fails the page.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use jobgrid_core::{defaults, JobBoard, JobSummary};

/// Detail enricher with a bounded concurrent fan-out.
#[derive(Debug, Clone)]
pub struct DetailEnricher {
    concurrency: usize,
    timeout: Duration,
}

impl DetailEnricher {
    /// Create an enricher with default limits.
    pub fn new() -> Self {
        Self {
            concurrency: defaults::DETAIL_CONCURRENCY,
            timeout: Duration::from_secs(defaults::DETAIL_TIMEOUT_SECS),
        }
    }

    /// Create an enricher with explicit limits.
    pub fn with_limits(concurrency: usize, timeout: Duration) -> Self {
        Self {
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    /// Create from environment variables.
    ///
    /// - `JOBGRID_DETAIL_CONCURRENCY` (default 8)
    /// - `JOBGRID_DETAIL_TIMEOUT_SECS` (default 10)
    pub fn from_env() -> Self {
        let concurrency = std::env::var("JOBGRID_DETAIL_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults::DETAIL_CONCURRENCY);
        let timeout_secs = std::env::var("JOBGRID_DETAIL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::DETAIL_TIMEOUT_SECS);
        Self::with_limits(concurrency, Duration::from_secs(timeout_secs))
    }

    /// Enrich a page of records.
    ///
    /// Returns records one-to-one with the input, in input order. Boards
    /// with inline descriptions pass through untouched.
    pub async fn enrich(&self, board: &dyn JobBoard, records: Vec<JobSummary>) -> Vec<JobSummary> {
        if !board.needs_detail() || records.is_empty() {
            return records;
        }

        let timeout = self.timeout;
        let mut enriched: Vec<(usize, JobSummary, bool)> =
            stream::iter(records.into_iter().enumerate())
                .map(|(index, mut record)| async move {
                    match tokio::time::timeout(timeout, board.fetch_detail(&record)).await {
                        Ok(Ok(detail)) => {
                            record.merge_detail(detail);
                            (index, record, true)
                        }
                        Ok(Err(e)) => {
                            warn!(
                                provider = board.id(),
                                job_id = %record.id,
                                error = %e,
                                "Detail fetch failed, keeping summary description"
                            );
                            (index, record, false)
                        }
                        Err(_) => {
                            warn!(
                                provider = board.id(),
                                job_id = %record.id,
                                timeout_ms = timeout.as_millis() as u64,
                                "Detail fetch timed out, keeping summary description"
                            );
                            (index, record, false)
                        }
                    }
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

        // Fetches complete unordered; restore the feed order.
        enriched.sort_by_key(|(index, ..)| *index);

        let failures = enriched.iter().filter(|(.., ok)| !ok).count();
        debug!(
            provider = board.id(),
            result_count = enriched.len(),
            detail_failures = failures,
            "Enrichment complete"
        );

        enriched.into_iter().map(|(_, record, _)| record).collect()
    }
}

impl Default for DetailEnricher {
    fn default() -> Self {
        Self::new()
    }
}
