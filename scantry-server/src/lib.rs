//! # Scantry Server
//!
//! Barcode-scanning inventory API.
//!
//! ## Overview
//!
//! Scantry turns scans from barcode-reader clients into persisted,
//! product-enriched records:
//!
//! - **Product catalog**: CRUD over products keyed by barcode
//! - **Folders**: named groupings of scanned items
//! - **Scan ingestion**: lookup-then-persist with a placeholder fallback
//!   for unknown barcodes
//! - **Live notifications**: an SSE stream plus a read-once polling slot
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - SQLite (via sqlx) for persistent storage
//! - A tokio broadcast channel for scan fan-out
//! - tower-http for request tracing, CORS and static assets

pub mod app_state;
pub mod errors;
pub mod handlers;
pub mod routes;

pub use app_state::AppState;
pub use routes::create_app;
