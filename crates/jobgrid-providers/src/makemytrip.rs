//! MakeMyTrip careers adapter.
//!
//! The careers API returns its whole feed regardless of the paging
//! parameters it accepts, and its server-side filtering is unreliable, so
//! the adapter re-filters locally: only positions gated onto the careers
//! page (`post_on_careers_page == 1`), exact business-unit match for the
//! category filter, and case-insensitive substring match of the country
//! against any listed location. Pages are sliced from the filtered list,
//! making the has-more answer exact.
//!
//! Descriptions come from a separate `jobDetails` endpoint whose payload is
//! only valid when `status == 1`. Because every page fetch pulls the full
//! feed, this board carries the long full-feed cache TTL.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use jobgrid_core::{
    defaults, BoardPage, Error, FilterKey, FilterSet, JobBoard, JobDetail, JobSummary,
    PagingSignal, Result,
};

use crate::wire::UpstreamId;

/// Default MakeMyTrip careers endpoint.
pub const DEFAULT_BASE_URL: &str = "https://careers.makemytrip.com";

/// MakeMyTrip careers board.
pub struct MakeMyTripBoard {
    client: Client,
    base_url: String,
}

impl MakeMyTripBoard {
    /// Create a board against the production endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a board against a custom endpoint (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::FETCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Opportunity-page slug: slashes and whitespace runs become dashes.
    fn title_slug(title: &str) -> String {
        title
            .replace('/', "-")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    fn matches_filters(job: &MmtJob, filters: &FilterSet) -> bool {
        if job.post_on_careers_page != 1 {
            return false;
        }
        if let Some(category) = filters.get(FilterKey::Category) {
            if job.business_unit != category {
                return false;
            }
        }
        if let Some(country) = filters.get(FilterKey::Country) {
            let needle = country.to_lowercase();
            if !job
                .location
                .iter()
                .any(|loc| loc.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}

impl Default for MakeMyTripBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct FeedResponse {
    data: Vec<MmtJob>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MmtJob {
    job_id: UpstreamId,
    job_title: String,
    job_updated_timestamp: String,
    location: Vec<String>,
    business_unit: String,
    post_on_careers_page: i64,
}

impl From<MmtJob> for JobSummary {
    fn from(job: MmtJob) -> Self {
        let id = job.job_id.into_string();
        let url = format!(
            "{}/prod/opportunity/{}/{}",
            DEFAULT_BASE_URL,
            id,
            MakeMyTripBoard::title_slug(&job.job_title)
        );
        JobSummary {
            id,
            title: job.job_title,
            posted_at: job.job_updated_timestamp,
            locations: job.location,
            url,
            description: String::new(),
            qualifications: String::new(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DetailResponse {
    status: i64,
    data: DetailData,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DetailData {
    // Field name as served by the upstream API.
    job_decription: String,
}

#[async_trait]
impl JobBoard for MakeMyTripBoard {
    fn id(&self) -> &str {
        "makemytrip"
    }

    fn display_name(&self) -> &str {
        "MakeMyTrip"
    }

    #[instrument(skip(self, filters), fields(subsystem = "board", component = "makemytrip", op = "fetch_page", page = page, filter_count = filters.len()))]
    async fn fetch_page(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: usize,
    ) -> Result<BoardPage> {
        let start = Instant::now();
        let url = format!("{}/api/jobs", self.base_url);

        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(category) = filters.get(FilterKey::Category) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(country) = filters.get(FilterKey::Country) {
            pairs.push(("country", country.to_string()));
        }
        pairs.push(("page", page.to_string()));
        pairs.push(("results_per_page", page_size.to_string()));

        let response = self.client.get(&url).query(&pairs).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "MakeMyTrip returned {}: {}",
                status, body
            )));
        }

        let feed: FeedResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse MakeMyTrip feed: {}", e)))?;

        let filtered: Vec<MmtJob> = feed
            .data
            .into_iter()
            .filter(|job| Self::matches_filters(job, filters))
            .collect();

        let total = filtered.len();
        let offset = (page.max(1) as usize - 1) * page_size;
        let end = (offset + page_size).min(total);
        let records: Vec<JobSummary> = filtered
            .into_iter()
            .skip(offset)
            .take(end.saturating_sub(offset))
            .map(JobSummary::from)
            .collect();

        debug!(
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Feed filter and slice complete"
        );

        Ok(BoardPage {
            records,
            signal: PagingSignal::HasMore(end < total),
        })
    }

    fn needs_detail(&self) -> bool {
        true
    }

    async fn fetch_detail(&self, record: &JobSummary) -> Result<JobDetail> {
        let url = format!("{}/api/jobDetails", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("jobId", record.id.as_str())])
            .timeout(Duration::from_secs(defaults::DETAIL_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| Error::DetailFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::DetailFetch(format!(
                "MakeMyTrip job {} returned {}",
                record.id,
                response.status()
            )));
        }

        let detail: DetailResponse = response
            .json()
            .await
            .map_err(|e| Error::DetailFetch(format!("Failed to parse detail: {}", e)))?;

        let description = (detail.status == 1 && !detail.data.job_decription.is_empty())
            .then_some(detail.data.job_decription);

        Ok(JobDetail {
            description,
            qualifications: None,
            posted_at: None,
        })
    }

    fn cache_ttl(&self) -> Duration {
        Duration::from_secs(defaults::FULL_FEED_TTL_SECS)
    }
}
