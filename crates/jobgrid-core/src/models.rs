//! Normalized data model shared by adapters, cache, and API.

use serde::{Deserialize, Serialize};

use crate::filters::FilterSet;
use crate::paging::PageMeta;

/// A normalized, display-ready job listing.
///
/// Produced by a provider adapter and immutable from then on, except for
/// the description/qualification fields which the detail enricher may
/// overwrite. Absent upstream fields become empty strings at the adapter
/// boundary; `null` never crosses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    /// Provider-scoped listing identifier.
    pub id: String,
    /// Job title.
    pub title: String,
    /// Posting date, display-ready. Providers ship strings, epoch seconds,
    /// or epoch milliseconds; numeric forms are rendered to RFC 3339 at the
    /// adapter boundary and string forms pass through untouched.
    #[serde(default)]
    pub posted_at: String,
    /// Locations for the listing, in provider order.
    #[serde(default)]
    pub locations: Vec<String>,
    /// Canonical URL of the listing on the provider's own site.
    #[serde(default)]
    pub url: String,
    /// Description. May be the short summary shipped with the listing feed
    /// or the full text merged in by the detail enricher.
    #[serde(default)]
    pub description: String,
    /// Qualifications / requirements text, where the provider exposes one.
    #[serde(default)]
    pub qualifications: String,
}

impl JobSummary {
    /// Locations joined for display.
    pub fn display_location(&self) -> String {
        self.locations.join(", ")
    }

    /// Merge enrichment data into this record.
    ///
    /// A present detail field overwrites whatever partial value the listing
    /// feed shipped; an absent field leaves the existing value as the
    /// fallback.
    pub fn merge_detail(&mut self, detail: JobDetail) {
        if let Some(description) = detail.description {
            self.description = description;
        }
        if let Some(qualifications) = detail.qualifications {
            self.qualifications = qualifications;
        }
        if let Some(posted_at) = detail.posted_at {
            self.posted_at = posted_at;
        }
    }
}

/// Per-record enrichment fetched from a provider's detail endpoint.
///
/// `None` means the provider did not supply the field, keeping the
/// summary's existing value; `Some` overwrites it, even with an empty
/// string where the provider explicitly serves one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDetail {
    pub description: Option<String>,
    pub qualifications: Option<String>,
    /// Some providers only expose the posting date on the detail payload.
    pub posted_at: Option<String>,
}

/// Raw paging signal reported by a provider, in whatever form it exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PagingSignal {
    /// Provider reports a total result count.
    TotalCount(u64),
    /// Provider reports (or the adapter can compute exactly) whether more
    /// records exist past this page.
    HasMore(bool),
    /// Provider exposes neither; pagination falls back to the record-count
    /// heuristic.
    Unknown,
}

/// One fetched page of listings plus the provider's raw paging signal,
/// before pagination normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPage {
    pub records: Vec<JobSummary>,
    pub signal: PagingSignal,
}

/// An inbound page request. Constructed per incoming user request,
/// immutable, not retained beyond the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Provider selector tag, matched against the registry.
    pub provider: String,
    /// Normalized filters.
    pub filters: FilterSet,
    /// 1-based page number.
    pub page: u32,
    /// Requested records per page.
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(provider: impl Into<String>, filters: FilterSet, page: u32) -> Self {
        Self {
            provider: provider.into(),
            filters,
            page,
            page_size: crate::defaults::PAGE_SIZE,
        }
    }
}

/// The normalized page result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPage {
    pub records: Vec<JobSummary>,
    pub pagination: PageMeta,
}

/// Render a Unix epoch in seconds as RFC 3339, or empty when out of range.
pub fn rfc3339_from_epoch_secs(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

/// Render a Unix epoch in milliseconds as RFC 3339, or empty when out of range.
pub fn rfc3339_from_epoch_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> JobSummary {
        JobSummary {
            id: "1234".to_string(),
            title: "Systems Engineer".to_string(),
            posted_at: "2025-11-02".to_string(),
            locations: vec!["Bengaluru".to_string(), "Remote".to_string()],
            url: "https://example.com/jobs/1234".to_string(),
            description: "short blurb".to_string(),
            qualifications: String::new(),
        }
    }

    #[test]
    fn display_location_joins_with_comma() {
        assert_eq!(summary().display_location(), "Bengaluru, Remote");
    }

    #[test]
    fn merge_detail_overwrites_present_fields() {
        let mut record = summary();
        record.merge_detail(JobDetail {
            description: Some("full description".to_string()),
            qualifications: Some("5 years of Rust".to_string()),
            posted_at: None,
        });
        assert_eq!(record.description, "full description");
        assert_eq!(record.qualifications, "5 years of Rust");
        assert_eq!(record.posted_at, "2025-11-02");
    }

    #[test]
    fn merge_detail_keeps_summary_value_for_absent_fields() {
        let mut record = summary();
        record.merge_detail(JobDetail::default());
        assert_eq!(record.description, "short blurb");
    }

    #[test]
    fn merge_detail_overwrites_with_explicit_empty() {
        let mut record = summary();
        record.merge_detail(JobDetail {
            description: Some(String::new()),
            qualifications: None,
            posted_at: None,
        });
        assert_eq!(record.description, "");
    }

    #[test]
    fn merge_detail_fills_posted_date() {
        let mut record = summary();
        record.posted_at.clear();
        record.merge_detail(JobDetail {
            description: None,
            qualifications: None,
            posted_at: Some("2025-12-01".to_string()),
        });
        assert_eq!(record.posted_at, "2025-12-01");
    }

    #[test]
    fn epoch_seconds_render_as_rfc3339() {
        let rendered = rfc3339_from_epoch_secs(1_700_000_000);
        assert!(rendered.starts_with("2023-11-14T"));
    }

    #[test]
    fn epoch_millis_render_as_rfc3339() {
        let rendered = rfc3339_from_epoch_millis(1_700_000_000_000);
        assert!(rendered.starts_with("2023-11-14T"));
    }

    #[test]
    fn out_of_range_epoch_renders_empty() {
        assert_eq!(rfc3339_from_epoch_secs(i64::MAX), "");
    }

    #[test]
    fn paging_signal_serde_roundtrip() {
        let json = serde_json::to_string(&PagingSignal::TotalCount(25)).unwrap();
        let back: PagingSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PagingSignal::TotalCount(25));

        let json = serde_json::to_string(&PagingSignal::Unknown).unwrap();
        let back: PagingSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PagingSignal::Unknown);
    }

    #[test]
    fn summary_deserializes_with_absent_optional_fields() {
        let record: JobSummary =
            serde_json::from_str(r#"{"id":"9","title":"SRE"}"#).unwrap();
        assert_eq!(record.posted_at, "");
        assert!(record.locations.is_empty());
        assert_eq!(record.description, "");
    }

    #[test]
    fn page_request_defaults_page_size() {
        let req = PageRequest::new("microsoft", FilterSet::new(), 1);
        assert_eq!(req.page_size, crate::defaults::PAGE_SIZE);
    }
}
