//! End-to-end tests of the composed gateway router.

use std::fs;
use std::path::Path;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use apidex_core::SettingsStore;
use apidex_gateway::units::{self, media::PIXEL_PNG};
use apidex_gateway::{
    create_router, ApiError, GatewayConfig, GatewayState, RouteUnit, UnitError, UnitRouter,
};

const SETTINGS: &str = r#"{
    "name": "Test Catalog",
    "apiSettings": { "creator": "test-team", "apikey": "secret-key" },
    "categories": [{
        "name": "Tools",
        "items": [{ "name": "Echo", "desc": "Repeats text", "path": "/tools/echo?text=" }]
    }]
}"#;

async fn explode() -> &'static str {
    panic!("kaboom: secret stack detail")
}

async fn fail_internally() -> Result<&'static str, ApiError> {
    Err(ApiError::Internal("database unreachable".to_string()))
}

async fn list_payload() -> Json<Vec<u32>> {
    Json(vec![1, 2, 3])
}

fn register_test_routes(router: UnitRouter) -> Result<UnitRouter, UnitError> {
    Ok(router
        .route("/test/panic", get(explode))
        .route("/test/internal", get(fail_internally))
        .route("/test/list", get(list_payload)))
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A server over a temporary site directory, plus the directory guard.
fn server() -> (TestServer, TempDir) {
    let site = tempfile::tempdir().unwrap();
    write(site.path(), "src/settings.json", SETTINGS);
    write(site.path(), "api-page/index.html", "<h1>catalog ui</h1>");
    write(site.path(), "api-page/404.html", "<h1>custom not found</h1>");
    write(site.path(), "api-page/500.html", "<h1>custom server error</h1>");
    write(site.path(), "api-page/style.css", "body {}");

    let config = GatewayConfig {
        settings_path: site.path().join("src/settings.json"),
        ui_dir: site.path().join("api-page"),
        assets_dir: site.path().join("src"),
        routes_dir: site.path().join("routes"),
        ..GatewayConfig::default()
    };

    let settings = SettingsStore::load(&config.settings_path).unwrap();
    let state = GatewayState::new(settings, config);

    let all: Vec<RouteUnit> = units::builtin()
        .iter()
        .copied()
        .chain([RouteUnit::new("test", "routes", register_test_routes)])
        .collect();

    let app = create_router(state, &all).unwrap();
    (TestServer::new(app).unwrap(), site)
}

fn parse(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

fn keys(value: &Value) -> Vec<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

#[tokio::test]
async fn unit_json_is_enveloped() {
    let (server, _site) = server();

    let response = server
        .get("/tools/echo")
        .add_query_param("text", "hello")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = parse(&response.text());
    assert_eq!(keys(&body), ["status", "creator", "result", "length"]);
    assert_eq!(body["status"], true);
    assert_eq!(body["creator"], "test-team");
    assert_eq!(body["result"], "hello");
}

#[tokio::test]
async fn enveloped_json_is_indented() {
    let (server, _site) = server();

    let response = server.get("/tools/echo").add_query_param("text", "x").await;
    assert!(response.text().starts_with("{\n  \"status\": true,\n  \"creator\""));
}

#[tokio::test]
async fn handler_errors_are_enveloped_too() {
    let (server, _site) = server();

    let response = server.get("/tools/echo").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = parse(&response.text());
    assert_eq!(keys(&body), ["status", "creator", "error"]);
    assert_eq!(body["status"], false);
    assert_eq!(body["error"], "parameter 'text' is required");
}

#[tokio::test]
async fn non_object_json_is_indented_but_not_wrapped() {
    let (server, _site) = server();

    let response = server.get("/test/list").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "[\n  1,\n  2,\n  3\n]");
    assert_eq!(parse(&response.text()), serde_json::json!([1, 2, 3]));
}

#[tokio::test]
async fn settings_document_is_served_raw() {
    let (server, _site) = server();

    let response = server.get("/src/settings.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = parse(&response.text());
    assert_eq!(body, parse(SETTINGS));
    assert!(body.get("creator").is_none());
}

#[tokio::test]
async fn root_serves_catalog_ui() {
    let (server, _site) = server();

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "<h1>catalog ui</h1>");

    let response = server.get("/style.css").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "body {}");
}

#[tokio::test]
async fn unmatched_paths_get_the_404_page() {
    let (server, _site) = server();

    for path in ["/nope", "/src/missing.json", "/tools/echo/extra"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.text(), "<h1>custom not found</h1>", "{path}");
    }
}

#[tokio::test]
async fn wrong_method_gets_the_404_page() {
    let (server, _site) = server();

    for path in ["/tools/echo", "/", "/nope"] {
        let response = server.post(path).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.text(), "<h1>custom not found</h1>", "{path}");
    }
}

#[tokio::test]
async fn panics_become_the_500_page() {
    let (server, _site) = server();

    let response = server.get("/test/panic").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "<h1>custom server error</h1>");
    assert!(!response.text().contains("kaboom"));
}

#[tokio::test]
async fn internal_errors_become_the_500_page() {
    let (server, _site) = server();

    let response = server.get("/test/internal").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "<h1>custom server error</h1>");
}

#[tokio::test]
async fn images_bypass_the_envelope() {
    let (server, _site) = server();

    let response = server.get("/media/pixel").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().as_ref(), PIXEL_PNG);
}

#[tokio::test]
async fn requests_are_counted() {
    let (server, _site) = server();

    server.get("/nope").await;
    server.get("/").await;
    let response = server.get("/api/status").await;

    let body = parse(&response.text());
    assert_eq!(body["result"]["total_requests"], 3);
    assert_eq!(body["creator"], "test-team");
}

#[tokio::test]
async fn shared_key_is_checked() {
    let (server, _site) = server();

    let response = server
        .get("/tools/check-key")
        .add_query_param("apikey", "secret-key")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(parse(&response.text())["result"], "valid");

    let response = server
        .get("/tools/check-key")
        .add_query_param("apikey", "wrong")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(parse(&response.text())["error"], "invalid api key");
}
