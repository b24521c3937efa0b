#![allow(clippy::unwrap_used)]

use axum_test::TestServer;
use moodnotes_core::{open_in_memory, NoteStore};
use std::path::Path;

use crate::router::setup_router;


const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../ui/static");

pub fn memory_store() -> NoteStore {
    NoteStore::new(open_in_memory().unwrap())
}

pub fn setup_server(store: NoteStore) -> TestServer {
    let app = setup_router(store, Path::new(STATIC_DIR));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn health_ping_ok() {
    let server = setup_server(memory_store());

    server.get("/health/ping").await.assert_status_ok();
}

#[tokio::test]
async fn unknown_route_not_found() {
    let server = setup_server(memory_store());

    let response = server.get("/nope").await;

    response.assert_status_not_found();
    assert!(response.text().contains("404 Not Found"));
}

#[tokio::test]
async fn static_file_served() {
    let server = setup_server(memory_store());

    server.get("/static/css/main.css").await.assert_status_ok();
}

#[tokio::test]
async fn static_directory_not_listed() {
    let server = setup_server(memory_store());

    server.get("/static/css/").await.assert_status_not_found();
}

#[tokio::test]
async fn api_docs_served() {
    let server = setup_server(memory_store());

    let response = server.get("/api.json").await;

    response.assert_status_ok();
    let doc = response.json::<serde_json::Value>();
    assert!(doc["paths"].get("/note/new").is_some());
    assert!(doc["paths"].get("/health/ping").is_some());
}
