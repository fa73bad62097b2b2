/// Integration tests for the search client with a mocked provider.
/// Tests the wire behavior without hitting the real search API.
use rust_jobs_api::config::Config;
use rust_jobs_api::errors::AppError;
use rust_jobs_api::search::{SearchProvider, SearchService};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create test config pointing at the mock server
fn create_test_config(search_base_url: String) -> Config {
    Config {
        database_url: "postgresql://test".to_string(),
        port: 8080,
        search_base_url,
        search_api_key: "test_key".to_string(),
        search_engine_id: "test_cx".to_string(),
    }
}

#[tokio::test]
async fn search_returns_links_in_provider_order() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!({
        "items": [
            {"title": "Acme Ltd - Home", "snippet": "Official site", "link": "https://acme.example/1"},
            {"title": "Acme Ltd profile", "snippet": "Registry entry", "link": "https://acme.example/2"},
            {"title": "News", "snippet": "Coverage", "link": "https://acme.example/3"}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("key", "test_key"))
        .and(query_param("cx", "test_cx"))
        .and(query_param("q", "Acme Ltd Kenya"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = SearchService::new(&config);

    let items = service.search("Acme Ltd", "Kenya").await.unwrap();
    let links: Vec<&str> = items.iter().map(|i| i.link.as_str()).collect();

    assert_eq!(
        links,
        vec![
            "https://acme.example/1",
            "https://acme.example/2",
            "https://acme.example/3"
        ]
    );
}

#[tokio::test]
async fn search_with_no_items_field_is_empty_result() {
    let mock_server = MockServer::start().await;

    // The provider omits "items" entirely when there are no hits.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"searchInformation": {"totalResults": "0"}})),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = SearchService::new(&config);

    let items = service.search("Ghost Corp", "Nowhere").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn search_non_success_status_is_terminal_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"error": {"message": "quota exceeded"}})),
        )
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = SearchService::new(&config);

    let err = service.search("Acme Ltd", "Kenya").await.unwrap_err();
    assert!(matches!(err, AppError::Search(_)));
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn search_malformed_body_is_terminal_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = SearchService::new(&config);

    let err = service.search("Acme Ltd", "Kenya").await.unwrap_err();
    assert!(matches!(err, AppError::Search(_)));
}

#[tokio::test]
async fn query_concatenates_company_and_country() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", "Umoja Holdings Kenya"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = SearchService::new(&config);

    let items = service.search("Umoja Holdings", "Kenya").await.unwrap();
    assert!(items.is_empty());
}
