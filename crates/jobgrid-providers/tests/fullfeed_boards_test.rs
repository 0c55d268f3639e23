//! Integration tests for the boards that slice pages from a full feed
//! (Lever, Huawei, MakeMyTrip, Thoughtworks) against a mock HTTP server.

use jobgrid_core::{FilterKey, FilterSet, JobBoard, PagingSignal};
use jobgrid_providers::{HuaweiBoard, LeverBoard, MakeMyTripBoard, ThoughtworksBoard};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lever_postings(count: usize) -> serde_json::Value {
    let postings: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("posting-{}", i),
                "text": format!("Engineer {}", i),
                "createdAt": 1700000000000i64 + i as i64,
                "categories": {"allLocations": ["Bangalore"]},
                "descriptionPlain": "Requirements",
                "additionalPlain": "Responsibilities",
                "hostedUrl": format!("https://jobs.lever.co/meesho/posting-{}", i)
            })
        })
        .collect();
    serde_json::Value::Array(postings)
}

#[tokio::test]
async fn lever_slices_pages_from_the_full_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/postings/meesho/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lever_postings(23)))
        .expect(2)
        .mount(&server)
        .await;

    let board = LeverBoard::meesho().with_base_url(server.uri());

    let first = board.fetch_page(&FilterSet::new(), 1, 10).await.unwrap();
    assert_eq!(first.records.len(), 10);
    assert_eq!(first.records[0].id, "posting-0");
    assert_eq!(first.signal, PagingSignal::HasMore(true));

    let last = board.fetch_page(&FilterSet::new(), 3, 10).await.unwrap();
    assert_eq!(last.records.len(), 3);
    assert_eq!(last.records[0].id, "posting-20");
    assert_eq!(last.signal, PagingSignal::HasMore(false));
}

#[tokio::test]
async fn lever_sends_repeated_team_keys() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/postings/meesho/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lever_postings(0)))
        .expect(1)
        .mount(&server)
        .await;

    let board = LeverBoard::meesho().with_base_url(server.uri());
    let filters = FilterSet::new().with(FilterKey::Category, "Engineering,Design");
    board.fetch_page(&filters, 1, 10).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(
        query.contains("team=Engineering&team=Design"),
        "raw query was: {}",
        query
    );
}

#[tokio::test]
async fn lever_page_past_the_end_is_empty_and_final() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v0/postings/meesho/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lever_postings(5)))
        .mount(&server)
        .await;

    let board = LeverBoard::meesho().with_base_url(server.uri());
    let page = board.fetch_page(&FilterSet::new(), 4, 10).await.unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.signal, PagingSignal::HasMore(false));
}

#[tokio::test]
async fn huawei_requests_page_in_path_and_parses_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/reccampportal/services/portal/portalpub/getJob/newHr/page/10/2",
        ))
        .and(query_param("curPage", "2"))
        .and(query_param("pageSize", "10"))
        .and(query_param("language", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [{
                "jobId": 446170,
                "jobname": "AI Algorithm Engineer",
                "releaseDate": "2025-10-11",
                "jobArea": "Shenzhen",
                "mainBusinessEn": "Build training pipelines",
                "jobRequireEn": "MSc or PhD"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let board = HuaweiBoard::with_base_url(server.uri());
    let page = board.fetch_page(&FilterSet::new(), 2, 10).await.unwrap();

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.signal, PagingSignal::Unknown);
    assert_eq!(page.records[0].description, "Build training pipelines");
    assert_eq!(page.records[0].locations, vec!["Shenzhen".to_string()]);
}

fn mmt_feed() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "job_id": 101,
                "job_title": "Senior Backend Engineer",
                "job_updated_timestamp": "2025-10-01 10:00:00",
                "location": ["Gurgaon, India"],
                "business_unit": "Tech",
                "post_on_careers_page": 1
            },
            {
                "job_id": 102,
                "job_title": "Internal Tooling Engineer",
                "job_updated_timestamp": "2025-10-02 10:00:00",
                "location": ["Bengaluru, India"],
                "business_unit": "Tech",
                "post_on_careers_page": 0
            },
            {
                "job_id": 103,
                "job_title": "Growth Marketer",
                "job_updated_timestamp": "2025-10-03 10:00:00",
                "location": ["Dubai, UAE"],
                "business_unit": "Marketing",
                "post_on_careers_page": 1
            }
        ]
    })
}

#[tokio::test]
async fn makemytrip_filters_feed_locally() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .and(query_param("page", "1"))
        .and(query_param("results_per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mmt_feed()))
        .expect(1)
        .mount(&server)
        .await;

    let board = MakeMyTripBoard::with_base_url(server.uri());
    let filters = FilterSet::new().with(FilterKey::Country, "india");
    let page = board.fetch_page(&filters, 1, 10).await.unwrap();

    // Job 102 is gated off the careers page, job 103 fails the country
    // filter: only 101 survives.
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].id, "101");
    assert_eq!(page.signal, PagingSignal::HasMore(false));
}

#[tokio::test]
async fn makemytrip_detail_honors_status_gate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobDetails"))
        .and(query_param("jobId", "101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 1,
            "data": {"job_decription": "Own the booking flow."}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobDetails"))
        .and(query_param("jobId", "999"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": 0, "data": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let board = MakeMyTripBoard::with_base_url(server.uri());
    let record = |id: &str| jobgrid_core::JobSummary {
        id: id.to_string(),
        title: String::new(),
        posted_at: String::new(),
        locations: vec![],
        url: String::new(),
        description: String::new(),
        qualifications: String::new(),
    };

    let good = board.fetch_detail(&record("101")).await.unwrap();
    assert_eq!(good.description.as_deref(), Some("Own the booking flow."));

    let rejected = board.fetch_detail(&record("999")).await.unwrap();
    assert_eq!(rejected.description, None);
}

#[tokio::test]
async fn thoughtworks_filters_and_slices_locally() {
    let server = MockServer::start().await;

    let jobs: Vec<serde_json::Value> = (0..15)
        .map(|i| {
            serde_json::json!({
                "sourceSystemId": i,
                "name": format!("Senior Developer {}", i),
                "role": "Developer",
                "location": "Bengaluru",
                "country": if i % 2 == 0 { "India" } else { "Brazil" },
                "jobFunctions": ["Engineering"],
                "updatedAt": "2025-09-12T08:00:00Z"
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/rest/careers/jobs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"jobs": jobs})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let board = ThoughtworksBoard::with_base_url(server.uri());
    let filters = FilterSet::new().with(FilterKey::Country, "India");
    let page = board.fetch_page(&filters, 1, 5).await.unwrap();

    // 8 of 15 match the country filter; the first page of 5 leaves more.
    assert_eq!(page.records.len(), 5);
    assert_eq!(page.signal, PagingSignal::HasMore(true));
    assert!(page.records.iter().all(|r| r.locations.contains(&"India".to_string())));
}
