//! Scan submission, polling and the live scan stream.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        IntoResponse, Json, Sse,
        sse::{Event, KeepAlive},
    },
};
use futures_util::{Stream, stream};
use scantry_core::CoreError;
use scantry_model::{ScanAck, ScanSubmission};
use serde_json::json;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use crate::AppState;
use crate::errors::{AppError, AppResult};

/// POST /scan
///
/// Strict lookup: an unknown barcode is a 404 that leaves the slot and
/// the stream untouched. On a hit the response races the persistence
/// write by design.
pub async fn submit_scan_handler(
    State(state): State<AppState>,
    Json(submission): Json<ScanSubmission>,
) -> AppResult<Json<ScanAck>> {
    let barcode = submission.barcode.clone();
    match state.pipeline.ingest_free_scan(submission).await {
        Ok(ack) => {
            info!(%barcode, "scan accepted");
            Ok(Json(ack))
        }
        Err(CoreError::NotFound(_)) => Err(unknown_barcode(&barcode)),
        Err(e) => Err(AppError::from_core(e, "Failed to process scan")),
    }
}

/// GET /scan/last — read-once: the first poll after a scan gets the
/// barcode, the next gets a 404.
pub async fn poll_last_scan_handler(
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    match state.last_scan.take() {
        Some(barcode) => Ok(Json(json!({ "barcode": barcode }))),
        None => Err(AppError::not_found("No scan data available")),
    }
}

/// GET /scan/{barcode} — catalog lookup without persisting anything.
pub async fn lookup_barcode_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<ScanAck>> {
    match state.pipeline.lookup(&barcode).await {
        Ok(product) => Ok(Json(ScanAck {
            message: "Product found".to_string(),
            product,
        })),
        Err(CoreError::NotFound(_)) => Err(unknown_barcode(&barcode)),
        Err(e) => Err(AppError::from_core(e, "Failed to retrieve product")),
    }
}

/// GET /scan-stream — long-lived SSE connection delivering one
/// `{"barcode": ...}` event per accepted scan.
///
/// The connection is held open until the client disconnects; dropping
/// the receiver is the unsubscribe. A subscriber that lags past the
/// channel capacity skips the missed events and continues.
pub async fn scan_stream_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, anyhow::Error>>> {
    info!("scan stream subscriber connected");
    let receiver = state.scan_events.subscribe();

    let stream = stream::unfold(receiver, move |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let sse_event = Event::default().json_data(&event).map_err(Into::into);
                    return Some((sse_event, receiver));
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    });

    // Keepalive prevents idle connection timeouts.
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("keepalive"),
    )
}

/// The scan 404 carries the barcode back so scanning clients can show
/// what failed without tracking request state.
fn unknown_barcode(barcode: &str) -> AppError {
    AppError::not_found("Product not found").with_body(json!({
        "error": "Product not found",
        "barcode": barcode,
    }))
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
