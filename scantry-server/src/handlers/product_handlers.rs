//! Product catalog CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use scantry_model::{Product, ProductDraft, ProductPatch};
use tracing::info;

use crate::AppState;
use crate::errors::{AppError, AppResult};

pub async fn list_products_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state
        .db
        .list_products()
        .await
        .map_err(|e| AppError::from_core(e, "Failed to retrieve products"))?;
    Ok(Json(products))
}

pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .db
        .get_product(&barcode)
        .await
        .map_err(|e| AppError::from_core(e, "Failed to retrieve product"))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(product))
}

pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> AppResult<impl IntoResponse> {
    let new = draft
        .validate()
        .ok_or_else(|| AppError::bad_request("Barcode, name, and brand are required"))?;

    info!(barcode = %new.barcode, "creating product");
    let product = state
        .db
        .insert_product(new)
        .await
        .map_err(|e| AppError::from_core(e, "Failed to create product"))?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> AppResult<Json<Product>> {
    let product = state
        .db
        .update_product(&barcode, patch)
        .await
        .map_err(|e| AppError::from_core(e, "Failed to update product"))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(product))
}

pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = state
        .db
        .delete_product(&barcode)
        .await
        .map_err(|e| AppError::from_core(e, "Failed to delete product"))?;
    if !deleted {
        return Err(AppError::not_found("Product not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
