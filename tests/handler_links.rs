mod common;

use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use snaplink::api;
use sqlx::PgPool;

fn test_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .nest("/api", api::routes::routes())
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_create_link_generated_code(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = json["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(json["url"], "https://example.com");
    assert_eq!(json["shortUrl"], format!("https://sho.rt/{code}"));
    assert_eq!(json["clicks"], 0);
    assert!(json["lastClicked"].is_null());
    assert!(json["createdAt"].is_string());
}

#[sqlx::test]
async fn test_create_link_custom_code(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://github.com", "customCode": "github" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["code"], "github");
    assert_eq!(json["shortUrl"], "https://sho.rt/github");
}

#[sqlx::test]
async fn test_create_link_custom_code_taken(pool: PgPool) {
    common::create_test_link(&pool, "taken12", "https://first.com").await;
    let server = test_server(pool);

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://second.com", "customCode": "taken12" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "code_taken");
}

#[sqlx::test]
async fn test_create_link_invalid_url(pool: PgPool) {
    let server = test_server(pool.clone());

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_create_link_missing_url(pool: PgPool) {
    let server = test_server(pool);

    let response = server.post("/api/links").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
}

#[sqlx::test]
async fn test_create_link_invalid_custom_code(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "customCode": "a-b" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "invalid_code_format");
}

#[sqlx::test]
async fn test_list_links(pool: PgPool) {
    common::create_test_link(&pool, "older12", "https://one.com").await;
    common::create_test_link(&pool, "newer12", "https://two.com").await;
    let server = test_server(pool);

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["code"], "newer12");
    assert_eq!(items[1]["code"], "older12");
}

#[sqlx::test]
async fn test_get_link(pool: PgPool) {
    common::create_test_link(&pool, "show123", "https://example.com").await;
    let server = test_server(pool.clone());

    let response = server.get("/api/links/show123").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["code"], "show123");
    assert_eq!(json["url"], "https://example.com");
    assert_eq!(common::get_clicks(&pool, "show123").await, 0);
}

#[sqlx::test]
async fn test_get_link_not_found(pool: PgPool) {
    let server = test_server(pool);

    let response = server.get("/api/links/missing").await;

    response.assert_status_not_found();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[sqlx::test]
async fn test_delete_link(pool: PgPool) {
    common::create_test_link(&pool, "remove1", "https://example.com").await;
    let server = test_server(pool.clone());

    let response = server.delete("/api/links/remove1").await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(common::count_links(&pool).await, 0);

    let response = server.delete("/api/links/remove1").await;
    response.assert_status_not_found();
}
