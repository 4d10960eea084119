mod common;

use atlas_links::api::handlers::redirect_handler;
use atlas_links::domain::entities::LinkRecord;
use atlas_links::domain::repositories::LinkRepository;
use atlas_links::infrastructure::cache::CacheProvider;
use axum::{Router, routing::get};
use axum_test::TestServer;

fn make_server(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .route("/{path}", get(redirect_handler))
        .with_state(ctx.state.clone());
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_from_store() {
    let ctx = common::create_test_state();
    ctx.store
        .create_link(LinkRecord::new(
            "docs",
            "Documentation",
            "https://example.com/docs",
            true,
            "alice",
        ))
        .await
        .unwrap();

    let server = make_server(&ctx);
    let response = server.get("/docs").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/docs");
}

#[tokio::test]
async fn test_redirect_prefers_cache() {
    let ctx = common::create_test_state();
    ctx.cache
        .upsert_link("docs", "https://cached.example.com")
        .await
        .unwrap();

    let server = make_server(&ctx);
    let response = server.get("/docs").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://cached.example.com");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);

    server.get("/missing").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_disabled_link() {
    let ctx = common::create_test_state();
    ctx.store
        .create_link(LinkRecord::new(
            "off",
            "Disabled",
            "https://example.com",
            false,
            "alice",
        ))
        .await
        .unwrap();

    let server = make_server(&ctx);

    server.get("/off").await.assert_status_not_found();
}
