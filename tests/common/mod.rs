#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

use link_manager::config::{Config, CorsOrigins};
use link_manager::domain::repositories::LinkRepository;
use link_manager::infrastructure::persistence::Database;
use link_manager::routes::app_router;
use link_manager::state::AppState;

pub const TEST_BASE_URL: &str = "https://test-short.io";

/// Fresh, migrated in-memory SQLite database.
pub async fn create_test_database() -> Database {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        ..Config::default()
    };

    let database = Database::connect(&config).await.unwrap();
    database.migrate().await.unwrap();
    database
}

pub async fn create_test_repository() -> Arc<dyn LinkRepository> {
    create_test_database().await.link_repository()
}

pub async fn create_test_state(base_url: &str) -> AppState {
    AppState::new(create_test_database().await, base_url)
}

/// Full application router over an empty database, `BASE_URL` set to [`TEST_BASE_URL`].
pub async fn make_server() -> TestServer {
    make_server_with_base_url(TEST_BASE_URL).await
}

pub async fn make_server_with_base_url(base_url: &str) -> TestServer {
    let state = create_test_state(base_url).await;
    TestServer::new(app_router(state, &CorsOrigins::Any)).unwrap()
}

/// Creates a link through the API and returns the response body.
pub async fn create_link(server: &TestServer, original_url: &str, short_name: &str) -> Value {
    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": original_url, "short_name": short_name }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Creates `count` links named `test0`, `test1`, ... pointing at `https://example.com/{i}`.
pub async fn seed_links(server: &TestServer, count: usize) {
    for i in 0..count {
        create_link(
            server,
            &format!("https://example.com/{i}"),
            &format!("test{i}"),
        )
        .await;
    }
}
