mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::Utc;

use snaplink::api::handlers::stats_handler;
use snaplink::domain::entities::NewClick;
use snaplink::domain::repositories::ClickRepository;

fn test_server(state: snaplink::AppState) -> TestServer {
    let app = Router::new()
        .route("/api/v1/links/{code}/stats", get(stats_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_stats_counts_clicks() {
    let app = common::test_app();
    let link = app.links.insert("counted1", "https://example.com/");

    for _ in 0..3 {
        app.clicks
            .create(NewClick {
                link_id: link.id,
                clicked_at: Utc::now(),
                user_agent: None,
                ip: None,
            })
            .await
            .unwrap();
    }

    let server = test_server(app.state);

    let response = server.get("/api/v1/links/counted1/stats").await;

    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["short_code"].as_str().unwrap(), "counted1");
    assert_eq!(body["long_url"].as_str().unwrap(), "https://example.com/");
    assert_eq!(body["total_clicks"].as_i64().unwrap(), 3);
}

#[tokio::test]
async fn test_stats_zero_clicks() {
    let app = common::test_app();
    app.links.insert("lonely12", "https://example.com/");

    let server = test_server(app.state);

    let response = server.get("/api/v1/links/lonely12/stats").await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["total_clicks"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn test_stats_unknown_code() {
    let app = common::test_app();
    let server = test_server(app.state);

    let response = server.get("/api/v1/links/missing/stats").await;

    response.assert_status_not_found();
}
