//! Thoughtworks careers adapter.
//!
//! A single unpaged REST endpoint returns every open role; there are no
//! server-side filters at all. Keyword, country, and category filters are
//! applied locally and pages sliced from the filtered list, so the
//! has-more answer is exact.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use jobgrid_core::{
    defaults, BoardPage, Error, FilterKey, FilterSet, JobBoard, JobSummary, PagingSignal, Result,
};

use crate::wire::UpstreamId;

/// Default Thoughtworks endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.thoughtworks.com";

/// Thoughtworks careers board.
pub struct ThoughtworksBoard {
    client: Client,
    base_url: String,
}

impl ThoughtworksBoard {
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

    fn matches_filters(job: &TwJob, filters: &FilterSet) -> bool {
        if let Some(keyword) = filters.get(FilterKey::Keyword) {
            let needle = keyword.to_lowercase();
            if !job.name.to_lowercase().contains(&needle)
                && !job.role.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(country) = filters.get(FilterKey::Country) {
            if !job.country.eq_ignore_ascii_case(country) {
                return false;
            }
        }
        if let Some(category) = filters.get(FilterKey::Category) {
            if !job
                .job_functions
                .iter()
                .any(|f| f.eq_ignore_ascii_case(category))
            {
                return false;
            }
        }
        true
    }
}

impl Default for ThoughtworksBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TwResponse {
    jobs: Vec<TwJob>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TwJob {
    #[serde(rename = "sourceSystemId")]
    source_system_id: UpstreamId,
    name: String,
    role: String,
    location: String,
    country: String,
    #[serde(rename = "jobFunctions")]
    job_functions: Vec<String>,
    #[serde(rename = "updatedAt")]
    updated_at: String,
}

impl From<TwJob> for JobSummary {
    fn from(job: TwJob) -> Self {
        let id = job.source_system_id.into_string();
        let url = format!("{}/careers/jobs/{}", DEFAULT_BASE_URL, id);
        let locations = [job.location, job.country]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        JobSummary {
            id,
            title: job.name,
            posted_at: job.updated_at,
            locations,
            url,
            description: job.role,
            qualifications: String::new(),
        }
    }
}

#[async_trait]
impl JobBoard for ThoughtworksBoard {
    fn id(&self) -> &str {
        "thoughtworks"
    }

    fn display_name(&self) -> &str {
        "Thoughtworks"
    }

    #[instrument(skip(self, filters), fields(subsystem = "board", component = "thoughtworks", op = "fetch_page", page = page, filter_count = filters.len()))]
    async fn fetch_page(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: usize,
    ) -> Result<BoardPage> {
        let start = Instant::now();
        let url = format!("{}/rest/careers/jobs", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Thoughtworks returned {}: {}",
                status, body
            )));
        }

        let parsed: TwResponse = response.json().await.map_err(|e| {
            Error::Upstream(format!("Failed to parse Thoughtworks response: {}", e))
        })?;

        let filtered: Vec<TwJob> = parsed
            .jobs
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
}
