//! Mock job board for deterministic testing.
//!
//! Provides a configurable [`JobBoard`] implementation with canned records,
//! scripted failures, and a call log, so orchestrator and enricher behavior
//! can be tested without any network.
//!
//! ## Usage
//!
//! ```rust
//! use jobgrid_core::{FilterSet, JobBoard};
//! use jobgrid_providers::mock::MockBoard;
//!
//! # #[tokio::main] async fn main() {
//! let board = MockBoard::new("mock")
//!     .with_records(MockBoard::sample_records(3))
//!     .with_needs_detail(true);
//!
//! let page = board.fetch_page(&FilterSet::new(), 1, 10).await.unwrap();
//! assert_eq!(page.records.len(), 3);
//! assert_eq!(board.fetch_page_calls(), 1);
//! # }
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use jobgrid_core::{
    defaults, BoardPage, Error, FilterSet, JobBoard, JobDetail, JobSummary, PagingSignal, Result,
};

/// One recorded call against the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

struct MockConfig {
    id: String,
    display_name: String,
    records: Vec<JobSummary>,
    signal: PagingSignal,
    needs_detail: bool,
    detail_text: String,
    fail_fetch: bool,
    fail_detail_for: HashSet<String>,
    latency: Option<Duration>,
    cache_ttl: Duration,
}

/// Mock job board for testing.
#[derive(Clone)]
pub struct MockBoard {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockBoard {
    /// Create a mock board with the given provider id and no records.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            config: Arc::new(MockConfig {
                display_name: format!("Mock ({})", id),
                id,
                records: Vec::new(),
                signal: PagingSignal::Unknown,
                needs_detail: false,
                detail_text: "Full description from detail endpoint".to_string(),
                fail_fetch: false,
                fail_detail_for: HashSet::new(),
                latency: None,
                cache_ttl: Duration::from_secs(defaults::LISTING_TTL_SECS),
            }),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn config_mut(&mut self) -> &mut MockConfig {
        Arc::get_mut(&mut self.config).expect("MockBoard configured after being shared")
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.config_mut().display_name = name.into();
        self
    }

    /// Set the records every `fetch_page` call returns.
    pub fn with_records(mut self, records: Vec<JobSummary>) -> Self {
        self.config_mut().records = records;
        self
    }

    /// Set the paging signal.
    pub fn with_signal(mut self, signal: PagingSignal) -> Self {
        self.config_mut().signal = signal;
        self
    }

    /// Mark the board as requiring detail enrichment.
    pub fn with_needs_detail(mut self, needs_detail: bool) -> Self {
        self.config_mut().needs_detail = needs_detail;
        self
    }

    /// Set the description returned by successful detail fetches.
    pub fn with_detail_text(mut self, text: impl Into<String>) -> Self {
        self.config_mut().detail_text = text.into();
        self
    }

    /// Make every `fetch_page` call fail with an upstream error.
    pub fn with_fetch_error(mut self, fail: bool) -> Self {
        self.config_mut().fail_fetch = fail;
        self
    }

    /// Make detail fetches for the given record id fail.
    pub fn with_failing_detail(mut self, id: impl Into<String>) -> Self {
        self.config_mut().fail_detail_for.insert(id.into());
        self
    }

    /// Add artificial latency to every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.config_mut().latency = Some(latency);
        self
    }

    /// Override the cache TTL reported by the board.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config_mut().cache_ttl = ttl;
        self
    }

    /// Generate `count` distinct sample records.
    pub fn sample_records(count: usize) -> Vec<JobSummary> {
        (0..count)
            .map(|i| JobSummary {
                id: format!("job-{}", i),
                title: format!("Engineer {}", i),
                posted_at: "2025-10-01".to_string(),
                locations: vec!["Remote".to_string()],
                url: format!("https://example.com/jobs/job-{}", i),
                description: format!("short summary {}", i),
                qualifications: String::new(),
            })
            .collect()
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of `fetch_page` calls seen.
    pub fn fetch_page_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.operation == "fetch_page")
            .count()
    }

    /// Number of `fetch_detail` calls seen.
    pub fn fetch_detail_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.operation == "fetch_detail")
            .count()
    }

    fn log(&self, operation: &str, input: String) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input,
        });
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.config.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl JobBoard for MockBoard {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn display_name(&self) -> &str {
        &self.config.display_name
    }

    async fn fetch_page(
        &self,
        filters: &FilterSet,
        page: u32,
        _page_size: usize,
    ) -> Result<BoardPage> {
        self.log("fetch_page", format!("page={} {}", page, filters.canonical()));
        self.simulate_latency().await;

        if self.config.fail_fetch {
            return Err(Error::Upstream("mock upstream failure".to_string()));
        }

        Ok(BoardPage {
            records: self.config.records.clone(),
            signal: self.config.signal,
        })
    }

    fn needs_detail(&self) -> bool {
        self.config.needs_detail
    }

    async fn fetch_detail(&self, record: &JobSummary) -> Result<JobDetail> {
        self.log("fetch_detail", record.id.clone());
        self.simulate_latency().await;

        if self.config.fail_detail_for.contains(&record.id) {
            return Err(Error::DetailFetch(format!(
                "mock detail failure for {}",
                record.id
            )));
        }

        Ok(JobDetail {
            description: Some(format!("{} [{}]", self.config.detail_text, record.id)),
            qualifications: None,
            posted_at: None,
        })
    }

    fn cache_ttl(&self) -> Duration {
        self.config.cache_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_records_and_signal() {
        let board = MockBoard::new("mock")
            .with_records(MockBoard::sample_records(2))
            .with_signal(PagingSignal::TotalCount(25));
        let page = board.fetch_page(&FilterSet::new(), 1, 10).await.unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.signal, PagingSignal::TotalCount(25));
    }

    #[tokio::test]
    async fn scripted_fetch_failure_is_upstream_error() {
        let board = MockBoard::new("mock").with_fetch_error(true);
        let err = board
            .fetch_page(&FilterSet::new(), 1, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn scripted_detail_failure_only_hits_named_record() {
        let records = MockBoard::sample_records(2);
        let board = MockBoard::new("mock")
            .with_needs_detail(true)
            .with_failing_detail("job-0");

        assert!(board.fetch_detail(&records[0]).await.is_err());
        assert!(board.fetch_detail(&records[1]).await.is_ok());
    }

    #[tokio::test]
    async fn call_log_counts_operations() {
        let board = MockBoard::new("mock").with_records(MockBoard::sample_records(1));
        board.fetch_page(&FilterSet::new(), 1, 10).await.unwrap();
        board.fetch_page(&FilterSet::new(), 2, 10).await.unwrap();
        assert_eq!(board.fetch_page_calls(), 2);
        assert_eq!(board.fetch_detail_calls(), 0);
    }
}
