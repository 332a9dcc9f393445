//! HTTP contract tests against a mock API.

use std::sync::Arc;

use kino_client::{ApiClient, browse};
use kino_core::query::{QuerySpec, QuerySpecBuilder};
use kino_core::{
    KinoError, PlaybackProgressReporter, PlayerEvent, ReporterConfig,
    SessionHandle,
};
use kino_model::{
    ContentType, MediaId, MediaTitle, ProgressReport, SubscriptionStatus,
    ViewerId,
};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_partial_json, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn media_json(id: &str, title: &str, genres: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "thumbnail": format!("https://cdn.example.com/{id}.jpg"),
        "genres": genres,
        "contentType": "movie",
        "addedAt": "2024-03-01T00:00:00Z"
    })
}

fn viewer() -> ViewerId {
    ViewerId::new("viewer-1").unwrap()
}

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri()).unwrap()
}

#[tokio::test]
async fn fetch_catalog_validates_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            media_json("1", "Apple", &["Drama"]),
            media_json("2", "Banana", &["Comedy"]),
            media_json("3", "Cherry", &["Drama"]),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let items = client.fetch_catalog().await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].content_type, ContentType::Movie);
    assert_eq!(items[2].genres, vec!["Drama"]);
}

#[tokio::test]
async fn browse_queries_the_remote_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            media_json("1", "Cherry", &["Drama"]),
            media_json("2", "Banana", &["Comedy"]),
            media_json("3", "Apple", &["Drama"]),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let spec = QuerySpecBuilder::new().genre("Drama").page_size(10).build();
    let page = browse(&client, &spec).await.unwrap();
    assert_eq!(page.titles(), vec!["Apple", "Cherry"]);
    assert_eq!(page.pagination.total_pages, 1);
}

#[tokio::test]
async fn missing_catalog_browses_as_an_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.fetch_catalog().await.unwrap().is_empty());

    let page = browse(&client, &QuerySpec::default()).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.pagination.total_results, 0);
    assert_eq!(page.pagination.total_pages, 0);
    assert!(!page.pagination.has_next_page);
}

#[tokio::test]
async fn malformed_catalog_is_remote_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            media_json("1", "Apple", &["Drama"]),
            { "id": "2", "title": "No thumbnail" },
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.fetch_catalog().await.unwrap_err();
    assert!(matches!(err, KinoError::RemoteUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn non_json_body_is_remote_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.fetch_catalog().await.unwrap_err();
    assert!(matches!(err, KinoError::RemoteUnavailable(_)));
}

#[tokio::test]
async fn server_error_is_remote_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/catalog"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.fetch_catalog().await.unwrap_err();
    assert!(err.is_retryable());
    assert!(err.to_string().contains("503"), "{err}");
}

#[tokio::test]
async fn favorites_and_history_are_scoped_to_the_viewer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/favorites"))
        .and(query_param("viewerId", "viewer-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([media_json("7", "Heat", &["Crime"])])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/history"))
        .and(query_param("viewerId", "viewer-1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let favorites = client.fetch_favorites(&viewer()).await.unwrap();
    assert_eq!(favorites[0].title.as_str(), "Heat");
    assert!(client.fetch_history(&viewer()).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_and_remove_favorite_send_viewer_and_title() {
    let server = MockServer::start().await;
    let body = json!({ "viewerId": "viewer-1", "title": "Heat" });
    Mock::given(method("POST"))
        .and(path("/api/favorites"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/favorites"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let title = MediaTitle::new("Heat").unwrap();
    client.add_favorite(&viewer(), &title).await.unwrap();
    client.remove_favorite(&viewer(), &title).await.unwrap();
}

#[tokio::test]
async fn subscription_plan_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/subscription"))
        .and(query_param("viewerId", "viewer-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "planId": "premium-monthly",
            "name": "Premium",
            "status": "past_due",
            "renewsAt": "2024-07-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let plan = client_for(&server)
        .await
        .fetch_subscription(&viewer())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(plan.name, "Premium");
    assert_eq!(plan.status, SubscriptionStatus::PastDue);
    assert!(!plan.status.grants_access());
    assert!(plan.renews_at.is_some());
}

#[tokio::test]
async fn missing_subscription_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/subscription"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let plan = client_for(&server)
        .await
        .fetch_subscription(&viewer())
        .await
        .unwrap();
    assert!(plan.is_none());
}

#[tokio::test]
async fn progress_report_is_posted_with_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .and(body_partial_json(json!({
            "viewerId": "viewer-1",
            "mediaId": "m-9",
            "currentPosition": 42
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let report =
        ProgressReport::new(viewer(), MediaId::new("m-9").unwrap(), 42);
    client.update_progress(&report).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = requests[0].body_json().unwrap();
    assert!(sent["reportedAt"].is_string());
}

#[tokio::test]
async fn session_close_delivers_final_position_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .and(body_partial_json(json!({
            "mediaId": "m-9",
            "currentPosition": 95
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server).await);
    let reporter = PlaybackProgressReporter::new(
        client,
        viewer(),
        MediaId::new("m-9").unwrap(),
        ReporterConfig::default(),
    );
    let session = SessionHandle::attach(reporter, 8);
    session.send(PlayerEvent::Seeked(95.7)).await.unwrap();

    let reporter = session.close().await.unwrap();
    assert_eq!(reporter.position(), 95);
}

#[tokio::test]
async fn failed_progress_post_does_not_fail_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server).await);
    let mut reporter = PlaybackProgressReporter::new(
        client,
        viewer(),
        MediaId::new("m-9").unwrap(),
        ReporterConfig::default(),
    );
    reporter.on_time_update(12.0);
    reporter.terminate().await;
    assert_eq!(reporter.position(), 12);
}

#[tokio::test]
async fn unreachable_api_is_remote_unavailable() {
    // Port 9 (discard) is closed on test hosts.
    let client = ApiClient::new("127.0.0.1:9").unwrap();
    let err = client.fetch_catalog().await.unwrap_err();
    assert!(matches!(err, KinoError::RemoteUnavailable(_)));
}
