//! Request pipeline tests against a mock content API.
//!
//! Covers the error taxonomy, retry exhaustion and the response cache
//! wrapped around real client calls.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xeluxe_api_client::endpoints::blog::BlogFilters;
use xeluxe_api_client::{ApiError, ClientConfig, XeluxeClient};
use xeluxe_core::cache::ResponseCache;
use xeluxe_core::retry::RetryConfig;
use xeluxe_core::storage::{FileStorage, MemoryStorage};

fn client_for(server: &MockServer) -> XeluxeClient {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_retry(RetryConfig::new(2, Duration::from_millis(5)));
    XeluxeClient::with_config(config).unwrap()
}

#[tokio::test]
async fn test_success_payload_is_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/settings.php"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": { "general": { "site_name": "Xeluxe" } }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value: Value = client.get("/public-api/settings.php").await.unwrap();
    assert_eq!(value["settings"]["general"]["site_name"], "Xeluxe");
}

#[tokio::test]
async fn test_non_2xx_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/missing.php"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get::<Value>("/public-api/missing.php")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 404 }));
    assert_eq!(err.to_string(), "HTTP error! status: 404");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/about-us.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).about().get().await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_success_false_is_application_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/service.php"))
        .and(query_param("slug", "unknown"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Service not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .services()
        .by_slug("unknown")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Application { .. }));
    assert_eq!(err.to_string(), "Service not found");
}

#[tokio::test]
async fn test_success_false_without_message_uses_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/clients.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let err = client_for(&server).clients().list().await.unwrap_err();
    assert_eq!(err.to_string(), "API request failed");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
    let client = XeluxeClient::with_config(config).unwrap();

    let err = client.get::<Value>("/public-api/settings.php").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(err.to_string().starts_with("Network error"));
}

#[tokio::test]
async fn test_retry_gives_up_after_three_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/recognitions.php"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let start = Instant::now();
    let err = client_for(&server)
        .get_with_retry::<Value>("/public-api/recognitions.php")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 500 }));
    assert!(start.elapsed() >= Duration::from_millis(15));
}

#[tokio::test]
async fn test_retry_skips_client_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/career.php"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_with_retry::<Value>("/public-api/career.php")
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_blog_filters_reach_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/blogs.php"))
        .and(query_param("type", "news"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 7, "title": "Smoke control update", "slug": "smoke-control" }],
            "pagination": {
                "current_page": 2, "per_page": 9, "total_items": 10,
                "total_pages": 2, "has_next": false, "has_prev": true
            }
        })))
        .mount(&server)
        .await;

    let filters = BlogFilters {
        blog_type: Some("news".to_string()),
        page: Some(2),
        ..BlogFilters::default()
    };
    let list = client_for(&server).blog().list(&filters).await.unwrap();

    assert_eq!(list.data.len(), 1);
    assert_eq!(list.data[0].slug, "smoke-control");
    assert!(list.pagination.has_prev);
    assert!(!list.pagination.has_next);
}

#[tokio::test]
async fn test_cached_call_hits_server_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/addresses.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 1, "location": "Dubai", "address": "Business Bay", "display_order": 1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cache = ResponseCache::new(MemoryStorage::new());
    let calls = Arc::new(AtomicU32::new(0));

    for _ in 0..2 {
        let contact = client.contact();
        let calls = Arc::clone(&calls);
        let addresses = cache
            .cached("addresses", Duration::from_secs(60), || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                contact.addresses().await
            })
            .await
            .unwrap();
        assert_eq!(addresses[0].location, "Dubai");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_call_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/departments.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cache = ResponseCache::new(MemoryStorage::new());

    let careers = client.careers();
    let result = cache
        .cached("departments", Duration::from_secs(60), || async move {
            careers.departments().await
        })
        .await;

    assert!(result.is_err());
    assert_eq!(cache.stats().total_entries, 0);
}

#[tokio::test]
async fn test_file_cache_survives_new_cache_instance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public-api/settings.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": { "contact": { "phone": "+971 4 000 0000" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp = tempfile::TempDir::new().unwrap();
    let client = client_for(&server);

    let first = ResponseCache::new(FileStorage::open(temp.path()).unwrap());
    let settings = client.settings();
    let bundle = first
        .cached("settings", Duration::from_secs(60), || async move {
            settings.get().await
        })
        .await
        .unwrap();
    assert_eq!(bundle.value("phone"), Some("+971 4 000 0000"));

    let second = ResponseCache::new(FileStorage::open(temp.path()).unwrap());
    let settings = client.settings();
    let cached = second
        .cached("settings", Duration::from_secs(60), || async move {
            settings.get().await
        })
        .await
        .unwrap();
    assert_eq!(cached, bundle);
}

#[tokio::test]
async fn test_admin_api_lookups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/services.php"))
        .and(query_param("action", "get"))
        .and(query_param("id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "service": { "id": 7, "service_title": "Smoke Control", "slug": "smoke-control" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/blog.php"))
        .and(query_param("action", "get_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": { "page_title": "Insights", "posts_per_page": 9 }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/blog.php"))
        .and(query_param("action", "list_featured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "posts": [{ "id": 1, "title": "Atrium study", "slug": "atrium-study", "is_featured": 1 }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/careers.php"))
        .and(query_param("action", "get_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Settings unavailable"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let service = client.services().by_id(7).await.unwrap();
    assert_eq!(service.service_title, "Smoke Control");

    let settings = client.blog().page_settings().await.unwrap();
    assert_eq!(settings.page_title, "Insights");
    assert_eq!(settings.posts_per_page, 9);

    let featured = client.blog().featured().await.unwrap();
    assert_eq!(featured.len(), 1);
    assert!(featured[0].is_featured);

    let err = client.careers().page_settings().await.unwrap_err();
    assert_eq!(err.to_string(), "Settings unavailable");
}
