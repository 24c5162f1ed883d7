//! Router assembly.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::AppState;
use crate::handlers::{
    folder_handlers::{
        create_folder_handler, create_folder_item_handler, delete_folder_handler,
        get_folder_handler, list_folder_items_handler, list_folders_handler,
        rename_folder_handler,
    },
    product_handlers::{
        create_product_handler, delete_product_handler, get_product_handler,
        list_products_handler, update_product_handler,
    },
    scan_handlers::{
        health_handler, lookup_barcode_handler, poll_last_scan_handler,
        scan_stream_handler, submit_scan_handler,
    },
};

/// Build the application router: the JSON API, the SSE stream and the
/// static fallback, behind permissive CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    let public_dir = state.public_dir.clone();

    Router::new()
        .route("/health", get(health_handler))
        // Product catalog
        .route(
            "/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/products/{barcode}",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        // Folders
        .route(
            "/folders",
            get(list_folders_handler).post(create_folder_handler),
        )
        .route(
            "/folders/{id}",
            get(get_folder_handler)
                .put(rename_folder_handler)
                .delete(delete_folder_handler),
        )
        .route(
            "/folders/{id}/items",
            get(list_folder_items_handler).post(create_folder_item_handler),
        )
        // Scanning; the literal /scan/last segment wins over the capture
        .route("/scan", post(submit_scan_handler))
        .route("/scan/last", get(poll_last_scan_handler))
        .route("/scan/{barcode}", get(lookup_barcode_handler))
        .route("/scan-stream", get(scan_stream_handler))
        // Static assets for the scanning client
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
