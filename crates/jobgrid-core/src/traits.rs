//! Core traits for jobgrid abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable provider adapters and testability.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::filters::FilterSet;
use crate::models::{BoardPage, JobDetail, JobSummary};

/// A provider adapter: the translation layer between normalized requests /
/// records and one career site's native API.
///
/// Implementations own three things:
/// - the mapping from [`FilterSet`] keys to the provider's query parameter
///   names and value encodings,
/// - parsing of the provider's response envelope into [`JobSummary`]
///   records (absent optional fields become empty strings, never `null`
///   propagating downstream),
/// - reporting the provider's paging signal in whatever form it exposes.
///
/// One `fetch_page` call issues one network request. Boards whose provider
/// requires a secondary per-record request for the full description return
/// `true` from [`needs_detail`](Self::needs_detail) and implement
/// [`fetch_detail`](Self::fetch_detail); the enricher drives those calls
/// concurrently with failure isolation.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Provider selector tag, unique within a registry (e.g. `"microsoft"`).
    fn id(&self) -> &str;

    /// Human-readable provider name.
    fn display_name(&self) -> &str;

    /// Fetch one page of listings.
    ///
    /// Fails with [`Error::Upstream`](crate::Error::Upstream) when the
    /// provider responds with a non-success status, a malformed payload,
    /// or times out.
    async fn fetch_page(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: usize,
    ) -> Result<BoardPage>;

    /// Whether records from this board require a secondary detail fetch.
    fn needs_detail(&self) -> bool {
        false
    }

    /// Fetch enrichment data for one record.
    ///
    /// Boards with inline descriptions keep the default no-op.
    async fn fetch_detail(&self, record: &JobSummary) -> Result<JobDetail> {
        let _ = record;
        Ok(JobDetail::default())
    }

    /// How long cached pages from this board stay valid.
    fn cache_ttl(&self) -> Duration {
        Duration::from_secs(crate::defaults::LISTING_TTL_SECS)
    }
}
