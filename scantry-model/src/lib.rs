//! Core data model definitions shared across Scantry crates.

pub mod api;
pub mod folder;
pub mod ids;
pub mod item;
pub mod product;
pub mod scan;

// Intentionally curated re-exports for downstream consumers.
pub use api::{
    FolderName, NewFolderItem, NewProduct, ProductDraft, ProductPatch,
    ScanAck, ScanSubmission,
};
pub use folder::Folder;
pub use ids::{FolderId, ItemId};
pub use item::ScannedItem;
pub use product::{Product, ProductSnapshot};
pub use scan::ScanEvent;
