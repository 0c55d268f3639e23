//! Huawei campus recruitment portal adapter.
//!
//! The portal embeds the page number in the URL path *and* repeats it as a
//! `curPage` query parameter, takes repeated category/country code keys,
//! and percent-encodes the search text. Records arrive under `result` with
//! descriptions inline, so no detail fetch is needed. The response carries
//! no usable count; pagination falls back to the record-count heuristic.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use jobgrid_core::{
    defaults, BoardPage, Error, FilterKey, FilterSet, JobBoard, JobSummary, PagingSignal, Result,
};

use crate::wire::UpstreamId;

/// Default Huawei career portal endpoint.
pub const DEFAULT_BASE_URL: &str = "https://career.huawei.com";

/// Job-detail page; listing URLs are built from the job id.
const PORTAL_URL: &str =
    "https://career.huawei.com/reccampportal/portal5/campus-recruitment-detail.html";

const ORDER_BY: &str = "ISS_STARTDATE_DESC_AND_IS_HOT_JOB";

/// Huawei campus recruitment board.
pub struct HuaweiBoard {
    client: Client,
    base_url: String,
}

impl HuaweiBoard {
    /// Create a board against the production portal.
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

    fn page_url(&self, filters: &FilterSet, page: u32, page_size: usize) -> String {
        let mut qs = format!("curPage={}&pageSize={}", page, page_size);
        if let Some(categories) = filters.get(FilterKey::Category) {
            for code in categories.split(',').map(str::trim).filter(|c| !c.is_empty()) {
                qs.push_str("&jobFamClsCode=");
                qs.push_str(&urlencoding::encode(code));
            }
        }
        if let Some(countries) = filters.get(FilterKey::Country) {
            for code in countries.split(',').map(str::trim).filter(|c| !c.is_empty()) {
                qs.push_str("&countryCode=");
                qs.push_str(&urlencoding::encode(code));
            }
        }
        if let Some(keyword) = filters.get(FilterKey::Keyword) {
            qs.push_str("&searchText=");
            qs.push_str(&urlencoding::encode(keyword));
        }
        format!(
            "{}/reccampportal/services/portal/portalpub/getJob/newHr/page/10/{}?{}&language=en_US&orderBy={}",
            self.base_url, page, qs, ORDER_BY
        )
    }
}

impl Default for HuaweiBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HuaweiResponse {
    result: Vec<HuaweiJob>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HuaweiJob {
    #[serde(rename = "jobId")]
    job_id: UpstreamId,
    jobname: String,
    #[serde(rename = "releaseDate")]
    release_date: String,
    #[serde(rename = "jobArea")]
    job_area: String,
    #[serde(rename = "mainBusinessEn")]
    main_business_en: String,
    #[serde(rename = "jobRequireEn")]
    job_require_en: String,
}

impl From<HuaweiJob> for JobSummary {
    fn from(job: HuaweiJob) -> Self {
        let id = job.job_id.into_string();
        let url = format!(
            "{}?jobId={}&dataSource=1&jobType=3&recruitType=CR&sourceType=001",
            PORTAL_URL, id
        );
        let locations = if job.job_area.is_empty() {
            Vec::new()
        } else {
            vec![job.job_area]
        };
        JobSummary {
            id,
            title: job.jobname,
            posted_at: job.release_date,
            locations,
            url,
            description: job.main_business_en,
            qualifications: job.job_require_en,
        }
    }
}

#[async_trait]
impl JobBoard for HuaweiBoard {
    fn id(&self) -> &str {
        "huawei"
    }

    fn display_name(&self) -> &str {
        "Huawei"
    }

    #[instrument(skip(self, filters), fields(subsystem = "board", component = "huawei", op = "fetch_page", page = page, filter_count = filters.len()))]
    async fn fetch_page(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: usize,
    ) -> Result<BoardPage> {
        let start = Instant::now();
        let url = self.page_url(filters, page, page_size);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Huawei returned {}: {}",
                status, body
            )));
        }

        let parsed: HuaweiResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse Huawei response: {}", e)))?;

        let records: Vec<JobSummary> = parsed.result.into_iter().map(JobSummary::from).collect();

        debug!(
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Page fetch complete"
        );

        Ok(BoardPage {
            records,
            signal: PagingSignal::Unknown,
        })
    }
}
