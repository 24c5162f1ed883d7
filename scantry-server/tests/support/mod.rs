#![allow(dead_code)]

use axum_test::TestServer;
use scantry_core::Database;
use scantry_server::{AppState, create_app};

/// In-memory database with schema and the two seeded sample products.
pub async fn test_state() -> AppState {
    let db = Database::in_memory().await.expect("in-memory database");
    db.initialize_schema().await.expect("schema");
    db.seed_sample_products().await.expect("seed");
    AppState::new(db, std::env::temp_dir())
}

pub async fn test_server() -> (TestServer, AppState) {
    let state = test_state().await;
    let server = TestServer::new(create_app(state.clone())).expect("test server");
    (server, state)
}
