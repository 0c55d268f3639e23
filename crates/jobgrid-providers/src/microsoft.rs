//! Microsoft Global Career Site adapter.
//!
//! Query parameters use single-letter codes (`p` for profession, `et` for
//! employment type, `q` for the keyword…), paging is page-numbered
//! (`pg`/`pgSz`), and the search response nests everything under an
//! `operationResult.result` envelope. The search feed carries no
//! description text at all; the full description and qualifications come
//! from a per-job detail endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};

use jobgrid_core::{
    defaults, BoardPage, Error, FilterKey, FilterSet, JobBoard, JobDetail, JobSummary,
    PagingSignal, Result,
};

/// Default Microsoft careers search API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://gcsservices.careers.microsoft.com";

/// Public job-detail portal; listing URLs are built from the job id.
const PORTAL_URL: &str = "https://jobs.careers.microsoft.com/global/en/job";

/// Microsoft careers board.
pub struct MicrosoftBoard {
    client: Client,
    base_url: String,
}

impl MicrosoftBoard {
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

    /// Map a normalized filter key to Microsoft's query parameter code.
    fn param_for(key: FilterKey) -> Option<&'static str> {
        match key {
            FilterKey::Category => Some("p"),
            FilterKey::JobType => Some("et"),
            FilterKey::Country => Some("lc"),
            FilterKey::ExperienceLevel => Some("exp"),
            FilterKey::Workplace => Some("ws"),
            FilterKey::Discipline => Some("d"),
            FilterKey::Keyword => Some("q"),
            _ => None,
        }
    }

    fn query_pairs(filters: &FilterSet, page: u32, page_size: usize) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for (key, value) in filters.iter() {
            match Self::param_for(key) {
                Some(param) => pairs.push((param, value.to_string())),
                None => trace!(filter = %key, "Filter not supported by this provider, skipping"),
            }
        }
        pairs.push(("pg", page.to_string()));
        pairs.push(("l", "en_us".to_string()));
        pairs.push(("pgSz", page_size.to_string()));
        pairs.push(("o", "Relevance".to_string()));
        pairs.push(("flt", "true".to_string()));
        pairs
    }
}

impl Default for MicrosoftBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "operationResult")]
    operation_result: SearchOperationResult,
}

#[derive(Deserialize)]
struct SearchOperationResult {
    result: SearchResult,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SearchResult {
    jobs: Vec<MsJob>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MsJob {
    #[serde(rename = "jobId")]
    job_id: String,
    title: String,
    #[serde(rename = "postingDate")]
    posting_date: String,
    properties: MsJobProperties,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MsJobProperties {
    locations: Vec<String>,
}

impl From<MsJob> for JobSummary {
    fn from(job: MsJob) -> Self {
        let url = format!("{}/{}", PORTAL_URL, job.job_id);
        JobSummary {
            id: job.job_id,
            title: job.title,
            posted_at: job.posting_date,
            locations: job.properties.locations,
            url,
            description: String::new(),
            qualifications: String::new(),
        }
    }
}

#[derive(Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "operationResult")]
    operation_result: DetailOperationResult,
}

#[derive(Deserialize)]
struct DetailOperationResult {
    result: MsJobDetail,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MsJobDetail {
    description: String,
    qualifications: String,
}

#[async_trait]
impl JobBoard for MicrosoftBoard {
    fn id(&self) -> &str {
        "microsoft"
    }

    fn display_name(&self) -> &str {
        "Microsoft"
    }

    #[instrument(skip(self, filters), fields(subsystem = "board", component = "microsoft", op = "fetch_page", page = page, filter_count = filters.len()))]
    async fn fetch_page(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: usize,
    ) -> Result<BoardPage> {
        let start = Instant::now();
        let url = format!("{}/search/api/v1/search", self.base_url);
        let pairs = Self::query_pairs(filters, page, page_size);

        let response = self.client.get(&url).query(&pairs).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Microsoft search returned {}: {}",
                status, body
            )));
        }

        let envelope: SearchEnvelope = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse Microsoft response: {}", e)))?;

        let records: Vec<JobSummary> = envelope
            .operation_result
            .result
            .jobs
            .into_iter()
            .map(JobSummary::from)
            .collect();

        debug!(
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Page fetch complete"
        );

        // The search envelope carries no usable count; pagination falls back
        // to the record-count heuristic.
        Ok(BoardPage {
            records,
            signal: PagingSignal::Unknown,
        })
    }

    fn needs_detail(&self) -> bool {
        true
    }

    async fn fetch_detail(&self, record: &JobSummary) -> Result<JobDetail> {
        let url = format!("{}/search/api/v1/job/{}", self.base_url, record.id);
        let response = self
            .client
            .get(&url)
            .query(&[("lang", "en_us")])
            .timeout(Duration::from_secs(defaults::DETAIL_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| Error::DetailFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::DetailFetch(format!(
                "Microsoft job {} returned {}",
                record.id,
                response.status()
            )));
        }

        let envelope: DetailEnvelope = response
            .json()
            .await
            .map_err(|e| Error::DetailFetch(format!("Failed to parse detail: {}", e)))?;

        let detail = envelope.operation_result.result;
        Ok(JobDetail {
            description: Some(detail.description),
            qualifications: Some(detail.qualifications),
            posted_at: None,
        })
    }
}
