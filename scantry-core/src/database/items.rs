//! Scanned-item accessors.
//!
//! Items are insert-only. Each row carries the denormalized product
//! snapshot taken at scan time; there is no update path.

use chrono::{DateTime, Utc};
use scantry_model::{FolderId, ItemId, ProductSnapshot, ScannedItem};

use super::Database;
use crate::error::Result;

/// Flat row shape; [`ScannedItem`] nests the snapshot, so it is mapped by
/// hand rather than derived.
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    barcode: String,
    folder_id: Option<String>,
    name: Option<String>,
    brand: Option<String>,
    calories: Option<i64>,
    protein: Option<String>,
    carbs: Option<String>,
    fats: Option<String>,
    quantity: Option<String>,
    image: Option<String>,
    scanned_at: DateTime<Utc>,
}

impl From<ItemRow> for ScannedItem {
    fn from(row: ItemRow) -> Self {
        ScannedItem {
            id: ItemId::from(row.id),
            barcode: row.barcode,
            folder_id: row.folder_id.map(FolderId::from),
            product: ProductSnapshot {
                name: row.name.unwrap_or_default(),
                brand: row.brand.unwrap_or_default(),
                calories: row.calories,
                protein: row.protein,
                carbs: row.carbs,
                fats: row.fats,
                quantity: row.quantity,
                image: row.image,
            },
            scanned_at: row.scanned_at,
        }
    }
}

const ITEM_COLUMNS: &str = "id, barcode, folder_id, name, brand, calories, \
                            protein, carbs, fats, quantity, image, scanned_at";

impl Database {
    /// Insert one scanned item. A duplicate id surfaces as
    /// [`CoreError::Conflict`](crate::CoreError::Conflict); rows are never
    /// merged.
    pub async fn insert_item(&self, item: &ScannedItem) -> Result<()> {
        sqlx::query(
            "INSERT INTO scanned_items
             (id, barcode, folder_id, name, brand, calories, protein, carbs, fats, quantity, image, scanned_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(item.id.as_str())
        .bind(&item.barcode)
        .bind(item.folder_id.as_ref().map(FolderId::as_str))
        .bind(&item.product.name)
        .bind(&item.product.brand)
        .bind(item.product.calories)
        .bind(&item.product.protein)
        .bind(&item.product.carbs)
        .bind(&item.product.fats)
        .bind(&item.product.quantity)
        .bind(&item.product.image)
        .bind(item.scanned_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Items filed under `folder_id`, newest first. The rowid tie-break
    /// keeps ordering stable for scans landing in the same instant.
    pub async fn list_folder_items(&self, folder_id: &FolderId) -> Result<Vec<ScannedItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS}
             FROM scanned_items
             WHERE folder_id = ?
             ORDER BY scanned_at DESC, rowid DESC"
        ))
        .bind(folder_id.as_str())
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(ScannedItem::from).collect())
    }

    pub async fn get_item(&self, id: &ItemId) -> Result<Option<ScannedItem>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS}
             FROM scanned_items
             WHERE id = ?"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(ScannedItem::from))
    }
}
