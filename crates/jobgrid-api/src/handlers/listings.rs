//! Listing endpoints: the paged aggregation surface and the provider list.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use jobgrid_core::{defaults, Error, FilterKey, FilterSet, JobSummary, PageMeta, PageRequest};

use crate::state::AppState;

/// Query parameters for `GET /api/v1/listings`.
#[derive(Debug, Deserialize)]
pub struct ListingsQuery {
    pub provider: String,
    pub page: Option<u32>,
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub seniority: Option<String>,
    pub skills: Option<String>,
    pub discipline: Option<String>,
    pub workplace: Option<String>,
}

impl ListingsQuery {
    /// Normalize the raw query parameters into a [`FilterSet`].
    ///
    /// Rejects un-encodable values before any network call is issued.
    fn filters(&self) -> Result<FilterSet, Error> {
        let mut filters = FilterSet::new();
        let entries: [(FilterKey, &Option<String>); 10] = [
            (FilterKey::Keyword, &self.keyword),
            (FilterKey::Category, &self.category),
            (FilterKey::Location, &self.location),
            (FilterKey::Country, &self.country),
            (FilterKey::JobType, &self.job_type),
            (FilterKey::ExperienceLevel, &self.experience_level),
            (FilterKey::Seniority, &self.seniority),
            (FilterKey::Skills, &self.skills),
            (FilterKey::Discipline, &self.discipline),
            (FilterKey::Workplace, &self.workplace),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                filters.insert_checked(key, value.clone())?;
            }
        }
        Ok(filters)
    }
}

/// Response body for `GET /api/v1/listings`.
///
/// Failures keep the same shape with an empty record set and an
/// explanatory message, so consumers always render something sensible.
#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub records: Vec<JobSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body for `GET /api/v1/providers`.
#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<String>,
}

/// `GET /api/v1/listings?provider=…&page=…&keyword=…`
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingsQuery>,
) -> Response {
    let filters = match query.filters() {
        Ok(filters) => filters,
        Err(err) => return error_response(err),
    };

    let request = PageRequest {
        provider: query.provider.clone(),
        filters,
        page: query.page.unwrap_or(defaults::FIRST_PAGE),
        page_size: defaults::PAGE_SIZE,
    };

    match state.aggregator.fetch_listings(&request).await {
        Ok(page) => (
            StatusCode::OK,
            Json(ListingsResponse {
                records: page.records,
                pagination: Some(page.pagination),
                error: None,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// `GET /api/v1/providers`
pub async fn list_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.aggregator.provider_ids(),
    })
}

fn error_response(err: Error) -> Response {
    let status = match &err {
        Error::UnknownProvider(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) | Error::MalformedFilter(_) => StatusCode::BAD_REQUEST,
        Error::Upstream(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(error = %err, status = %status, "Listings request failed");
    (
        status,
        Json(ListingsResponse {
            records: Vec::new(),
            pagination: None,
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}
