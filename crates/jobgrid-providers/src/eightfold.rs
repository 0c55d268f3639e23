//! Eightfold AI platform adapter.
//!
//! Several career sites are hosted on the Eightfold platform and share one
//! API shape: offset paging (`start`/`num`), a `positions` array, an
//! optional `items[0].TotalJobsCount`, and a per-job detail endpoint
//! carrying `job_description`. What differs per tenant is the domain, the
//! filter-parameter vocabulary, and a few fixed query-string suffixes, so
//! one adapter serves all tenants via configuration.
//!
//! Tenant quirks handled here:
//! - UKG ships the posting date as a `t_create` epoch on the listing feed.
//! - Morgan Stanley only exposes the posting date inside the detail
//!   payload (`custom_JD.data_fields.posteddate[0]`), merged during
//!   enrichment.
//! - Values are encoded with spaces as `+`; parameter names keep `%20`
//!   (one tenant's vocabulary includes `Job Type`).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use jobgrid_core::{
    defaults, rfc3339_from_epoch_secs, BoardPage, Error, FilterKey, FilterSet, JobBoard,
    JobDetail, JobSummary, PagingSignal, Result,
};

use crate::wire::UpstreamId;

/// Static configuration for one Eightfold tenant.
struct Tenant {
    id: &'static str,
    display_name: &'static str,
    base_url: &'static str,
    domain: &'static str,
    /// Normalized filter key → tenant's query parameter name.
    params: &'static [(FilterKey, &'static str)],
    /// Fixed query-string suffix for page fetches.
    extra_query: &'static str,
    /// Fixed query-string suffix for detail fetches.
    detail_extra: &'static str,
    /// Render `t_create` (epoch seconds) as the posting date.
    posted_from_epoch: bool,
}

const MORGAN_STANLEY: Tenant = Tenant {
    id: "morganstanley",
    display_name: "Morgan Stanley",
    base_url: "https://morganstanley.eightfold.ai",
    domain: "morganstanley.com",
    params: &[
        (FilterKey::JobType, "EmploymentType"),
        (FilterKey::Country, "Location"),
        (FilterKey::Category, "BusinessArea"),
        (FilterKey::ExperienceLevel, "PCSJobLevel"),
        (FilterKey::Keyword, "query"),
    ],
    extra_query: "sort_by=relevance&triggerGoButton=false",
    detail_extra: "",
    posted_from_epoch: false,
};

const JUNIPER: Tenant = Tenant {
    id: "juniper",
    display_name: "Juniper Networks",
    base_url: "https://jobs.juniper.net",
    domain: "juniper.net",
    params: &[
        (FilterKey::Location, "location"),
        (FilterKey::Category, "Category"),
        (FilterKey::ExperienceLevel, "Job Type"),
        (FilterKey::Seniority, "Seniority"),
        (FilterKey::Skills, "Skills"),
        (FilterKey::Keyword, "query"),
    ],
    extra_query: "triggerGoButton=false",
    detail_extra: "",
    posted_from_epoch: false,
};

const UKG: Tenant = Tenant {
    id: "ukg",
    display_name: "UKG",
    base_url: "https://apply.ukg.com",
    domain: "ukg.com",
    params: &[
        (FilterKey::Keyword, "query"),
        (FilterKey::Location, "location"),
        (FilterKey::Skills, "Skills"),
        (FilterKey::Category, "Function"),
        (FilterKey::Seniority, "Seniority"),
        (FilterKey::Workplace, "Workplace_Type"),
    ],
    extra_query: "",
    detail_extra: "microsite=microsite_1",
    posted_from_epoch: true,
};

/// A career board hosted on the Eightfold platform.
pub struct EightfoldBoard {
    client: Client,
    tenant: Tenant,
    base_url: String,
}

impl EightfoldBoard {
    fn for_tenant(tenant: Tenant) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::FETCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        let base_url = tenant.base_url.to_string();
        Self {
            client,
            tenant,
            base_url,
        }
    }

    /// Morgan Stanley careers.
    pub fn morgan_stanley() -> Self {
        Self::for_tenant(MORGAN_STANLEY)
    }

    /// Juniper Networks careers.
    pub fn juniper() -> Self {
        Self::for_tenant(JUNIPER)
    }

    /// UKG careers.
    pub fn ukg() -> Self {
        Self::for_tenant(UKG)
    }

    /// Override the endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Encode a filter value: percent-encoded, spaces as `+`.
    fn encode_value(value: &str) -> String {
        urlencoding::encode(value).replace("%20", "+")
    }

    fn page_query(&self, filters: &FilterSet, page: u32, page_size: usize) -> String {
        let mut qs = format!("domain={}", self.tenant.domain);
        for (key, param) in self.tenant.params {
            if let Some(value) = filters.get(*key) {
                qs.push('&');
                qs.push_str(&urlencoding::encode(param));
                qs.push('=');
                qs.push_str(&Self::encode_value(value));
            }
        }
        let start = (page.max(1) as usize - 1) * page_size;
        qs.push_str(&format!("&start={}&num={}", start, page_size));
        if !self.tenant.extra_query.is_empty() {
            qs.push('&');
            qs.push_str(self.tenant.extra_query);
        }
        qs
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JobsResponse {
    positions: Vec<Position>,
    items: Vec<CountItem>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CountItem {
    #[serde(rename = "TotalJobsCount")]
    total_jobs_count: Option<u64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Position {
    id: UpstreamId,
    name: String,
    #[serde(rename = "canonicalPositionUrl")]
    canonical_position_url: String,
    locations: Vec<String>,
    t_create: Option<i64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PositionDetail {
    job_description: String,
    #[serde(rename = "custom_JD")]
    custom_jd: CustomJd,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CustomJd {
    data_fields: CustomDataFields,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CustomDataFields {
    posteddate: Vec<String>,
}

#[async_trait]
impl JobBoard for EightfoldBoard {
    fn id(&self) -> &str {
        self.tenant.id
    }

    fn display_name(&self) -> &str {
        self.tenant.display_name
    }

    #[instrument(skip(self, filters), fields(subsystem = "board", component = %self.tenant.id, op = "fetch_page", page = page, filter_count = filters.len()))]
    async fn fetch_page(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: usize,
    ) -> Result<BoardPage> {
        let start = Instant::now();
        let url = format!(
            "{}/api/apply/v2/jobs?{}",
            self.base_url,
            self.page_query(filters, page, page_size)
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "{} returned {}: {}",
                self.tenant.display_name, status, body
            )));
        }

        let parsed: JobsResponse = response.json().await.map_err(|e| {
            Error::Upstream(format!(
                "Failed to parse {} response: {}",
                self.tenant.display_name, e
            ))
        })?;

        let signal = match parsed.items.first().and_then(|item| item.total_jobs_count) {
            Some(total) => PagingSignal::TotalCount(total),
            None => PagingSignal::Unknown,
        };

        let posted_from_epoch = self.tenant.posted_from_epoch;
        let records: Vec<JobSummary> = parsed
            .positions
            .into_iter()
            .map(|position| {
                let posted_at = match (posted_from_epoch, position.t_create) {
                    (true, Some(epoch)) => rfc3339_from_epoch_secs(epoch),
                    _ => String::new(),
                };
                JobSummary {
                    id: position.id.into_string(),
                    title: position.name,
                    posted_at,
                    locations: position.locations,
                    url: position.canonical_position_url,
                    description: String::new(),
                    qualifications: String::new(),
                }
            })
            .collect();

        debug!(
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Page fetch complete"
        );

        Ok(BoardPage { records, signal })
    }

    fn needs_detail(&self) -> bool {
        true
    }

    async fn fetch_detail(&self, record: &JobSummary) -> Result<JobDetail> {
        if record.id.is_empty() {
            return Err(Error::DetailFetch("record has no upstream id".to_string()));
        }

        let mut url = format!(
            "{}/api/apply/v2/jobs/{}?domain={}",
            self.base_url, record.id, self.tenant.domain
        );
        if !self.tenant.detail_extra.is_empty() {
            url.push('&');
            url.push_str(self.tenant.detail_extra);
        }

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(defaults::DETAIL_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| Error::DetailFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::DetailFetch(format!(
                "{} job {} returned {}",
                self.tenant.display_name,
                record.id,
                response.status()
            )));
        }

        let detail: PositionDetail = response
            .json()
            .await
            .map_err(|e| Error::DetailFetch(format!("Failed to parse detail: {}", e)))?;

        // An empty description falls back to whatever the feed carried.
        let description = (!detail.job_description.is_empty()).then_some(detail.job_description);
        let posted_at = detail
            .custom_jd
            .data_fields
            .posteddate
            .into_iter()
            .next()
            .filter(|date| !date.is_empty());

        Ok(JobDetail {
            description,
            qualifications: None,
            posted_at,
        })
    }
}
