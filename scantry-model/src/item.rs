use chrono::{DateTime, Utc};

use crate::ids::{FolderId, ItemId};
use crate::product::ProductSnapshot;

/// A persisted record of one scan event.
///
/// Carries a denormalized snapshot of the product at scan time. The row is
/// written once and never mutated; later catalog edits do not touch it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScannedItem {
    pub id: ItemId,
    pub barcode: String,
    /// Folder the item was filed into, if any. May dangle after the folder
    /// is deleted; folder deletion does not cascade.
    pub folder_id: Option<FolderId>,
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub scanned_at: DateTime<Utc>,
}
