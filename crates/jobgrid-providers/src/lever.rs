//! Lever postings API adapter.
//!
//! Lever serves an organization's entire posting list in one unpaged
//! response, so the adapter slices pages locally and therefore knows the
//! has-more answer exactly. List-valued filters arrive as comma-joined
//! strings and go out as repeated query keys (`team=a&team=b`).
//! Descriptions ship inline with the feed; no detail fetch is needed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use jobgrid_core::{
    defaults, rfc3339_from_epoch_millis, BoardPage, Error, FilterKey, FilterSet, JobBoard,
    JobSummary, PagingSignal, Result,
};

/// Default Lever postings endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.lever.co";

/// A career board served by the Lever postings API.
pub struct LeverBoard {
    client: Client,
    id: String,
    display_name: String,
    org: String,
    base_url: String,
}

impl LeverBoard {
    /// Create a board for one Lever organization.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        org: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::FETCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            id: id.into(),
            display_name: display_name.into(),
            org: org.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Meesho careers (Lever-hosted).
    pub fn meesho() -> Self {
        Self::new("meesho", "Meesho", "meesho")
    }

    /// Override the endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Expand a comma-joined filter value into repeated query pairs.
    fn repeated_pairs<'a>(
        filters: &'a FilterSet,
        key: FilterKey,
        param: &'static str,
    ) -> Vec<(&'static str, &'a str)> {
        filters
            .get(key)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(|code| (param, code))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LeverPosting {
    id: String,
    text: String,
    #[serde(rename = "createdAt")]
    created_at: Option<i64>,
    categories: LeverCategories,
    #[serde(rename = "descriptionPlain")]
    description_plain: String,
    #[serde(rename = "additionalPlain")]
    additional_plain: String,
    #[serde(rename = "hostedUrl")]
    hosted_url: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LeverCategories {
    #[serde(rename = "allLocations")]
    all_locations: Vec<String>,
}

impl From<LeverPosting> for JobSummary {
    fn from(posting: LeverPosting) -> Self {
        JobSummary {
            id: posting.id,
            title: posting.text,
            posted_at: posting
                .created_at
                .map(rfc3339_from_epoch_millis)
                .unwrap_or_default(),
            locations: posting.categories.all_locations,
            url: posting.hosted_url,
            // Lever's long-form fields are inverted relative to their names:
            // `additionalPlain` carries the role description and
            // `descriptionPlain` the requirements text.
            description: posting.additional_plain,
            qualifications: posting.description_plain,
        }
    }
}

#[async_trait]
impl JobBoard for LeverBoard {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    #[instrument(skip(self, filters), fields(subsystem = "board", component = %self.id, op = "fetch_page", page = page, filter_count = filters.len()))]
    async fn fetch_page(
        &self,
        filters: &FilterSet,
        page: u32,
        page_size: usize,
    ) -> Result<BoardPage> {
        let start = Instant::now();
        let url = format!("{}/v0/postings/{}/", self.base_url, self.org);

        let mut pairs = Self::repeated_pairs(filters, FilterKey::Category, "team");
        pairs.extend(Self::repeated_pairs(
            filters,
            FilterKey::JobType,
            "commitment",
        ));

        let response = self.client.get(&url).query(&pairs).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Lever ({}) returned {}: {}",
                self.org, status, body
            )));
        }

        let postings: Vec<LeverPosting> = response.json().await.map_err(|e| {
            Error::Upstream(format!("Failed to parse Lever ({}) response: {}", self.org, e))
        })?;

        let total = postings.len();
        let offset = (page.max(1) as usize - 1) * page_size;
        let end = (offset + page_size).min(total);
        let records: Vec<JobSummary> = postings
            .into_iter()
            .skip(offset)
            .take(end.saturating_sub(offset))
            .map(JobSummary::from)
            .collect();

        debug!(
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Page slice complete"
        );

        // The full list is in hand, so the has-more answer is exact.
        Ok(BoardPage {
            records,
            signal: PagingSignal::HasMore(end < total),
        })
    }
}
