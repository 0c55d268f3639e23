//! Integration tests for the Eightfold tenants against a mock HTTP server.

use jobgrid_core::{Error, FilterKey, FilterSet, JobBoard, PagingSignal};
use jobgrid_providers::EightfoldBoard;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn positions_response() -> serde_json::Value {
    serde_json::json!({
        "positions": [
            {
                "id": 14026,
                "name": "Software Engineer 4",
                "canonicalPositionUrl": "https://jobs.juniper.net/careers/job/14026",
                "locations": ["Sunnyvale, CA", "Remote"],
                "t_create": 1727740800
            },
            {
                "id": 14027,
                "name": "Network Architect",
                "canonicalPositionUrl": "https://jobs.juniper.net/careers/job/14027",
                "locations": ["Bengaluru, India"]
            }
        ],
        "items": [{"TotalJobsCount": 25}]
    })
}

#[tokio::test]
async fn page_fetch_parses_positions_and_total_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs"))
        .and(query_param("domain", "juniper.net"))
        .and(query_param("start", "0"))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(positions_response()))
        .expect(1)
        .mount(&server)
        .await;

    let board = EightfoldBoard::juniper().with_base_url(server.uri());
    let page = board.fetch_page(&FilterSet::new(), 1, 10).await.unwrap();

    assert_eq!(page.records.len(), 2);
    assert_eq!(page.signal, PagingSignal::TotalCount(25));
    assert_eq!(page.records[0].id, "14026");
    assert_eq!(page.records[0].title, "Software Engineer 4");
    assert_eq!(
        page.records[0].url,
        "https://jobs.juniper.net/careers/job/14026"
    );
    // Juniper does not render the feed epoch as a posting date.
    assert_eq!(page.records[0].posted_at, "");
    // Descriptions only arrive via the detail endpoint.
    assert_eq!(page.records[0].description, "");
}

#[tokio::test]
async fn second_page_requests_offset_ten() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs"))
        .and(query_param("start", "10"))
        .and(query_param("num", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"positions": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let board = EightfoldBoard::morgan_stanley().with_base_url(server.uri());
    let page = board.fetch_page(&FilterSet::new(), 2, 10).await.unwrap();

    assert!(page.records.is_empty());
    // No items array in the response: the signal degrades to the heuristic.
    assert_eq!(page.signal, PagingSignal::Unknown);
}

#[tokio::test]
async fn keyword_spaces_are_sent_as_plus() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"positions": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let board = EightfoldBoard::morgan_stanley().with_base_url(server.uri());
    let filters = FilterSet::new().with(FilterKey::Keyword, "rust engineer");
    board.fetch_page(&filters, 1, 10).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(
        query.contains("query=rust+engineer"),
        "raw query was: {}",
        query
    );
    assert!(query.contains("sort_by=relevance&triggerGoButton=false"));
}

#[tokio::test]
async fn ukg_renders_epoch_posting_dates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs"))
        .and(query_param("domain", "ukg.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "positions": [{
                "id": "881",
                "name": "Lead Software Engineer",
                "canonicalPositionUrl": "https://apply.ukg.com/careers/881",
                "locations": ["Weston, FL"],
                "t_create": 1700000000
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let board = EightfoldBoard::ukg().with_base_url(server.uri());
    let page = board.fetch_page(&FilterSet::new(), 1, 10).await.unwrap();
    assert!(page.records[0].posted_at.starts_with("2023-11-14T"));
}

#[tokio::test]
async fn detail_fetch_merges_description_and_posted_date() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs/14026"))
        .and(query_param("domain", "morganstanley.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job_description": "Own the equities trading platform.",
            "custom_JD": {"data_fields": {"posteddate": ["2025-09-18"]}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let board = EightfoldBoard::morgan_stanley().with_base_url(server.uri());
    let mut record = jobgrid_core::JobSummary {
        id: "14026".to_string(),
        title: "VP Engineering".to_string(),
        posted_at: String::new(),
        locations: vec![],
        url: String::new(),
        description: String::new(),
        qualifications: String::new(),
    };

    let detail = board.fetch_detail(&record).await.unwrap();
    record.merge_detail(detail);

    assert_eq!(record.description, "Own the equities trading platform.");
    assert_eq!(record.posted_at, "2025-09-18");
}

#[tokio::test]
async fn ukg_detail_requests_carry_microsite() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs/881"))
        .and(query_param("domain", "ukg.com"))
        .and(query_param("microsite", "microsite_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job_description": "Build the people platform."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let board = EightfoldBoard::ukg().with_base_url(server.uri());
    let record = jobgrid_core::JobSummary {
        id: "881".to_string(),
        title: String::new(),
        posted_at: String::new(),
        locations: vec![],
        url: String::new(),
        description: String::new(),
        qualifications: String::new(),
    };

    let detail = board.fetch_detail(&record).await.unwrap();
    assert_eq!(
        detail.description.as_deref(),
        Some("Build the people platform.")
    );
}

#[tokio::test]
async fn non_success_status_is_an_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let board = EightfoldBoard::juniper().with_base_url(server.uri());
    let err = board
        .fetch_page(&FilterSet::new(), 1, 10)
        .await
        .unwrap_err();
    match err {
        Error::Upstream(msg) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("maintenance"));
        }
        other => panic!("Expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_payload_is_an_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let board = EightfoldBoard::juniper().with_base_url(server.uri());
    let err = board
        .fetch_page(&FilterSet::new(), 1, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Upstream(_)));
}

#[tokio::test]
async fn empty_detail_description_leaves_summary_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/apply/v2/jobs/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"job_description": ""})),
        )
        .mount(&server)
        .await;

    let board = EightfoldBoard::juniper().with_base_url(server.uri());
    let mut record = jobgrid_core::JobSummary {
        id: "1".to_string(),
        title: String::new(),
        posted_at: String::new(),
        locations: vec![],
        url: String::new(),
        description: "short feed blurb".to_string(),
        qualifications: String::new(),
    };

    let detail = board.fetch_detail(&record).await.unwrap();
    record.merge_detail(detail);
    assert_eq!(record.description, "short feed blurb");
}
