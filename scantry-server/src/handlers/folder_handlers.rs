//! Folder CRUD and folder-scoped scan ingestion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use scantry_model::{Folder, FolderId, FolderName, NewFolderItem, ScannedItem};
use tracing::info;

use crate::AppState;
use crate::errors::{AppError, AppResult};

pub async fn list_folders_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Folder>>> {
    let folders = state
        .db
        .list_folders()
        .await
        .map_err(|e| AppError::from_core(e, "Failed to retrieve folders"))?;
    Ok(Json(folders))
}

pub async fn get_folder_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Folder>> {
    let folder = state
        .db
        .get_folder(&FolderId::from(id))
        .await
        .map_err(|e| AppError::from_core(e, "Failed to retrieve folder"))?
        .ok_or_else(|| AppError::not_found("Folder not found"))?;
    Ok(Json(folder))
}

pub async fn create_folder_handler(
    State(state): State<AppState>,
    Json(body): Json<FolderName>,
) -> AppResult<impl IntoResponse> {
    let name = body
        .validate()
        .ok_or_else(|| AppError::bad_request("Folder name is required"))?;

    let folder = state
        .db
        .insert_folder(&name)
        .await
        .map_err(|e| AppError::from_core(e, "Failed to create folder"))?;
    info!(folder_id = %folder.id, "folder created");
    Ok((StatusCode::CREATED, Json(folder)))
}

pub async fn rename_folder_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FolderName>,
) -> AppResult<Json<Folder>> {
    let name = body
        .validate()
        .ok_or_else(|| AppError::bad_request("Folder name is required"))?;

    let folder = state
        .db
        .rename_folder(&FolderId::from(id), &name)
        .await
        .map_err(|e| AppError::from_core(e, "Failed to update folder"))?
        .ok_or_else(|| AppError::not_found("Folder not found"))?;
    Ok(Json(folder))
}

/// Always 204: deleting an already-absent folder is a no-op. Items filed
/// under the folder are not cascaded.
pub async fn delete_folder_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state
        .db
        .delete_folder(&FolderId::from(id))
        .await
        .map_err(|e| AppError::from_core(e, "Failed to delete folder"))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_folder_items_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ScannedItem>>> {
    let items = state
        .db
        .list_folder_items(&FolderId::from(id))
        .await
        .map_err(|e| AppError::from_core(e, "Failed to retrieve folder items"))?;
    Ok(Json(items))
}

/// Folder-scoped scan ingestion: the enriched item comes back with the
/// server-assigned timestamp (and generated id when the client sent none).
pub async fn create_folder_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NewFolderItem>,
) -> AppResult<impl IntoResponse> {
    let folder_id = FolderId::from(id);
    let item = state
        .pipeline
        .ingest_folder_item(&folder_id, request)
        .await
        .map_err(|e| AppError::from_core(e, "Failed to save scanned item"))?;
    info!(item_id = %item.id, folder_id = %folder_id, barcode = %item.barcode, "item scanned into folder");
    Ok((StatusCode::CREATED, Json(item)))
}
