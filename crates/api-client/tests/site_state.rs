//! State holder and site-services scenarios against a mock content API.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xeluxe_api_client::endpoints::contact::ContactForm;
use xeluxe_api_client::menu;
use xeluxe_api_client::prelude::*;

fn client_for(server: &MockServer) -> XeluxeClient {
    XeluxeClient::with_config(ClientConfig::default().with_base_url(server.uri())).unwrap()
}

async fn mount_site_data(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/public-api/settings.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": {
                "general": { "site_name": "Xeluxe" },
                "contact": { "phone": "+971" }
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/public-api/service-categories.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {
                    "id": 1, "category_name": "Fire Modelling", "slug": "fire-modelling",
                    "services": [{ "id": 10, "category_id": 1, "title": "CFD", "slug": "cfd" }]
                },
                {
                    "id": 2, "category_name": "Fire Engineering", "slug": "fire-engineering",
                    "services": [
                        { "id": 20, "category_id": 2, "title": "Fire Strategy", "slug": "fire-strategy" },
                        { "id": 21, "category_id": 2, "title": "Egress", "slug": "egress" }
                    ]
                }
            ],
            "count": 2
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/public-api/project-categories.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {
                    "id": 1, "category_name": "Healthcare", "slug": "healthcare",
                    "projects": [{ "id": 5, "category_id": 1, "title": "Hospital", "slug": "hospital" }]
                },
                { "id": 2, "category_name": "Aviation", "slug": "aviation", "projects": [] }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_settings_query_flattens_groups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public-api/settings.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": { "general": { "site_name": "X" }, "contact": { "phone": "1" } }
        })))
        .mount(&server)
        .await;

    let settings = client_for(&server).settings();
    let query = Query::new(move |()| {
        let settings = settings.clone();
        async move { settings.get().await }
    });

    assert!(query.state().is_idle());
    assert!(query.mount(()).await);

    let state = query.state();
    assert!(!state.loading);
    assert!(state.error.is_none());

    let bundle = state.data.unwrap();
    assert_eq!(bundle.parsed.get("site_name").map(String::as_str), Some("X"));
    assert_eq!(bundle.parsed.get("phone").map(String::as_str), Some("1"));
    assert_eq!(bundle.parsed.len(), 2);
    assert_eq!(bundle.groups["general"]["site_name"], "X");
}

#[tokio::test]
async fn test_contact_mutation_reports_server_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/public-api/contact-form.php"))
        .and(body_partial_json(json!({ "email": "jane@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Invalid email"
        })))
        .mount(&server)
        .await;

    let contact = client_for(&server).contact();
    let mutation = Mutation::new(move |form: ContactForm| {
        let contact = contact.clone();
        async move { contact.submit(&form).await }
    });

    let form = ContactForm {
        name: "Jane".to_string(),
        email: "jane@example.com".to_string(),
        message: "Please call me back".to_string(),
        ..ContactForm::default()
    };

    let state = mutation.submit(form).await;
    assert!(!state.loading);
    assert!(!state.success);
    assert!(state.data.is_none());
    assert!(state.error_message().unwrap().contains("Invalid email"));

    mutation.reset();
    mutation.reset();
    let state = mutation.state();
    assert!(!state.loading && !state.success);
    assert!(state.error.is_none() && state.data.is_none());
}

#[tokio::test]
async fn test_contact_validation_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/public-api/contact-form.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let contact = client_for(&server).contact();
    let form = ContactForm {
        name: "Jane".to_string(),
        email: "not-an-email".to_string(),
        message: "Hello".to_string(),
        ..ContactForm::default()
    };

    let err = contact.submit(&form).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_query_failure_keeps_previous_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public-api/recognitions.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "recognitions": [{ "id": 1, "recognition_title": "ISO 9001" }],
            "count": 1
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public-api/recognitions.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let recognitions = client_for(&server).recognitions();
    let query = Query::new(move |()| {
        let recognitions = recognitions.clone();
        async move { recognitions.list().await }
    });

    query.mount(()).await;
    assert!(query.state().data.is_some());

    let state = query.refetch().await;
    assert!(state.data.is_some());
    assert!(matches!(
        state.error.as_deref(),
        Some(ApiError::Http { status: 500 })
    ));
}

#[tokio::test]
async fn test_lazy_query_waits_for_execute() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public-api/blog.php"))
        .and(query_param("slug", "smoke-control"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "success": true,
                    "data": {
                        "blog": { "id": 3, "title": "Smoke control", "slug": "smoke-control" },
                        "other_blogs": []
                    }
                }))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let blog = client_for(&server).blog();
    let lazy = LazyQuery::new(move |slug: String| {
        let blog = blog.clone();
        async move { blog.by_slug(&slug).await }
    });

    assert!(lazy.state().is_idle());

    let mut rx = lazy.subscribe();
    let handle = lazy.spawn_execute("smoke-control".to_string());
    rx.wait_for(|state| state.loading).await.unwrap();

    let state = handle.await.unwrap();
    assert!(!state.loading);
    assert_eq!(state.data.unwrap().blog.title, "Smoke control");
}

#[tokio::test]
async fn test_site_services_build_navigation() {
    let server = MockServer::start().await;
    mount_site_data(&server).await;

    let site = SiteServices::new(&client_for(&server));
    assert!(site.navigation().iter().all(|item| !item.has_dropdown()));

    site.load_all().await;

    assert_eq!(site.setting("site_name").as_deref(), Some("Xeluxe"));
    assert_eq!(site.setting("phone").as_deref(), Some("+971"));

    let nav = site.navigation();
    let services = nav.iter().find(|item| item.name == "Services").unwrap();
    assert_eq!(services.dropdown[0].href, "/service/cfd");
    assert_eq!(services.dropdown[1].href, menu::NESTED_PLACEHOLDER_HREF);
    assert_eq!(services.dropdown[1].nested.len(), 2);

    let sectors = nav.iter().find(|item| item.name == "Sectors").unwrap();
    assert_eq!(sectors.dropdown.len(), 1);
    assert_eq!(sectors.dropdown[0].href, "/sector/healthcare");
    assert!(menu::is_active(sectors, "/sectors"));
}

#[tokio::test]
async fn test_site_services_load_only_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/public-api/settings.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": {}
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public-api/service-categories.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public-api/project-categories.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let site = SiteServices::new(&client_for(&server));
    site.load_all().await;
    site.load_all().await;
    site.refresh().await;

    assert!(site.settings().state().data.is_some());
    assert!(site.service_menu().state().error.is_some());
    assert!(site.project_menu().state().error.is_some());
    assert_eq!(site.navigation().len(), 8);
}
