//! The single authoritative sequence for turning a raw barcode into a
//! persisted, product-enriched record.
//!
//! Two entry surfaces share it: folder-scoped item creation (folder must
//! exist, unknown barcodes fall back to a placeholder snapshot) and
//! free-standing scan submission (strict catalog lookup, notification
//! before the persistence write completes).

use std::sync::Arc;

use chrono::Utc;
use scantry_model::{
    FolderId, ItemId, NewFolderItem, Product, ScanAck, ScanEvent, ScanSubmission, ScannedItem,
};
use tokio::task::JoinHandle;

use crate::database::Database;
use crate::error::{CoreError, Result};
use crate::events::{LastScanSlot, ScanEventBus};
use crate::scan::sink::FailureSink;

#[derive(Debug, Clone)]
pub struct ScanPipeline {
    db: Database,
    bus: Arc<ScanEventBus>,
    slot: Arc<LastScanSlot>,
    failure_sink: Arc<dyn FailureSink>,
}

impl ScanPipeline {
    pub fn new(
        db: Database,
        bus: Arc<ScanEventBus>,
        slot: Arc<LastScanSlot>,
        failure_sink: Arc<dyn FailureSink>,
    ) -> Self {
        ScanPipeline {
            db,
            bus,
            slot,
            failure_sink,
        }
    }

    /// Folder-scoped ingestion: validate, check the folder, resolve the
    /// barcode (placeholder snapshot when unknown), persist, then notify.
    ///
    /// Notification is unconditional — fallback items broadcast too.
    pub async fn ingest_folder_item(
        &self,
        folder_id: &FolderId,
        request: NewFolderItem,
    ) -> Result<ScannedItem> {
        let barcode = validate_barcode(&request.barcode)?;

        if !self.db.folder_exists(folder_id).await? {
            return Err(CoreError::NotFound("folder"));
        }

        let product = self.resolve(&barcode).await?;
        let item = ScannedItem {
            id: request.id.unwrap_or_else(ItemId::generate),
            barcode: barcode.clone(),
            folder_id: Some(folder_id.clone()),
            product: product.into(),
            scanned_at: Utc::now(),
        };

        // Duplicate client-supplied ids are a conflict, never a merge.
        self.db.insert_item(&item).await?;

        self.notify(&barcode);
        Ok(item)
    }

    /// Free-standing scan: strict catalog lookup, then notify *before* the
    /// persistence write is awaited.
    ///
    /// An unknown barcode fails without touching the slot or the bus. On a
    /// hit, the caller and all subscribers see the scan immediately while
    /// the item insert completes in the background; an insert failure is
    /// reported through the failure sink, not to the caller.
    pub async fn ingest_free_scan(&self, submission: ScanSubmission) -> Result<ScanAck> {
        let barcode = validate_barcode(&submission.barcode)?;

        let product = self
            .db
            .get_product(&barcode)
            .await?
            .ok_or(CoreError::NotFound("product"))?;

        self.notify(&barcode);

        let item = ScannedItem {
            id: ItemId::generate(),
            barcode,
            folder_id: None,
            product: product.clone().into(),
            scanned_at: Utc::now(),
        };
        drop(self.persist_in_background(item));

        Ok(ScanAck {
            message: "Product scanned successfully".to_string(),
            product,
        })
    }

    /// Catalog lookup with no persistence and no notification.
    pub async fn lookup(&self, barcode: &str) -> Result<Product> {
        let barcode = validate_barcode(barcode)?;
        self.db
            .get_product(&barcode)
            .await?
            .ok_or(CoreError::NotFound("product"))
    }

    /// Barcode resolution with the availability-over-validation fallback:
    /// unknown barcodes yield the placeholder snapshot instead of failing.
    async fn resolve(&self, barcode: &str) -> Result<Product> {
        Ok(self
            .db
            .get_product(barcode)
            .await?
            .unwrap_or_else(|| Product::unknown(barcode)))
    }

    /// Push to the bus and the slot. Mutations here never suspend, so
    /// interleaved pipelines cannot observe a half-applied notification.
    fn notify(&self, barcode: &str) {
        self.bus.publish(ScanEvent::new(barcode));
        self.slot.set(barcode);
    }

    fn persist_in_background(&self, item: ScannedItem) -> JoinHandle<()> {
        let db = self.db.clone();
        let sink = Arc::clone(&self.failure_sink);
        tokio::spawn(async move {
            if let Err(err) = db.insert_item(&item).await {
                sink.report("free-scan item persistence", &err);
            }
        })
    }
}

fn validate_barcode(raw: &str) -> Result<String> {
    let barcode = raw.trim();
    if barcode.is_empty() {
        return Err(CoreError::validation("Barcode is required"));
    }
    Ok(barcode.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use scantry_model::{
        FolderId, ItemId, NewFolderItem, NewProduct, ScanSubmission,
    };

    use super::ScanPipeline;
    use crate::database::{Database, test_database};
    use crate::error::CoreError;
    use crate::events::{LastScanSlot, ScanEventBus};
    use crate::scan::sink::FailureSink;

    #[derive(Debug, Default)]
    struct RecordingSink {
        reports: Mutex<Vec<String>>,
    }

    impl FailureSink for RecordingSink {
        fn report(&self, context: &str, error: &CoreError) {
            self.reports
                .lock()
                .unwrap()
                .push(format!("{context}: {error}"));
        }
    }

    struct Harness {
        db: Database,
        bus: Arc<ScanEventBus>,
        slot: Arc<LastScanSlot>,
        sink: Arc<RecordingSink>,
        pipeline: ScanPipeline,
    }

    async fn harness() -> Harness {
        let db = test_database().await;
        let bus = Arc::new(ScanEventBus::new(16));
        let slot = Arc::new(LastScanSlot::new());
        let sink = Arc::new(RecordingSink::default());
        let pipeline = ScanPipeline::new(
            db.clone(),
            Arc::clone(&bus),
            Arc::clone(&slot),
            sink.clone() as Arc<dyn FailureSink>,
        );
        Harness {
            db,
            bus,
            slot,
            sink,
            pipeline,
        }
    }

    fn yogurt() -> NewProduct {
        NewProduct {
            barcode: "8901234567890".to_string(),
            name: "Organic Greek Yogurt".to_string(),
            brand: "Nature Valley".to_string(),
            calories: Some(120),
            protein: Some("15g".to_string()),
            carbs: Some("9g".to_string()),
            fats: Some("2g".to_string()),
            quantity: Some("170g".to_string()),
            image: None,
        }
    }

    #[tokio::test]
    async fn folder_item_snapshots_the_catalog_product() {
        let h = harness().await;
        let product = h.db.insert_product(yogurt()).await.unwrap();
        let folder = h.db.insert_folder("Groceries").await.unwrap();

        let item = h
            .pipeline
            .ingest_folder_item(
                &folder.id,
                NewFolderItem {
                    id: Some(ItemId::from("x1".to_string())),
                    barcode: "8901234567890".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(item.id.as_str(), "x1");
        assert_eq!(item.product.name, product.name);
        assert_eq!(item.product.brand, product.brand);
        assert_eq!(item.product.calories, product.calories);
        assert_eq!(item.folder_id.as_ref(), Some(&folder.id));

        let listed = h.db.list_folder_items(&folder.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, item.id);
        assert_eq!(listed[0].product, item.product);
    }

    #[tokio::test]
    async fn folder_item_falls_back_for_unknown_barcodes() {
        let h = harness().await;
        let folder = h.db.insert_folder("Groceries").await.unwrap();

        let item = h
            .pipeline
            .ingest_folder_item(
                &folder.id,
                NewFolderItem {
                    id: None,
                    barcode: "0000000000000".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(item.product.name, "Unknown Product");
        assert_eq!(item.product.brand, "Unknown");
        assert_eq!(item.product.calories, Some(0));
        assert_eq!(item.product.protein.as_deref(), Some("0g"));
        assert_eq!(item.product.carbs.as_deref(), Some("0g"));
        assert_eq!(item.product.fats.as_deref(), Some("0g"));
        assert_eq!(item.product.quantity.as_deref(), Some("Unknown"));
        assert_eq!(item.product.image.as_deref(), Some("/api/placeholder/80/80"));
        assert!(!item.id.as_str().is_empty());
    }

    #[tokio::test]
    async fn folder_item_notifies_even_on_fallback() {
        let h = harness().await;
        let folder = h.db.insert_folder("Groceries").await.unwrap();
        let mut rx = h.bus.subscribe();

        h.pipeline
            .ingest_folder_item(
                &folder.id,
                NewFolderItem {
                    id: None,
                    barcode: "0000000000000".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(rx.recv().await.unwrap().barcode, "0000000000000");
        assert_eq!(h.slot.take().as_deref(), Some("0000000000000"));
    }

    #[tokio::test]
    async fn missing_folder_is_not_found() {
        let h = harness().await;
        let err = h
            .pipeline
            .ingest_folder_item(
                &FolderId::from("missing".to_string()),
                NewFolderItem {
                    id: None,
                    barcode: "8901234567890".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound("folder")));
    }

    #[tokio::test]
    async fn empty_barcode_is_a_validation_error() {
        let h = harness().await;
        let folder = h.db.insert_folder("Groceries").await.unwrap();
        let err = h
            .pipeline
            .ingest_folder_item(
                &folder.id,
                NewFolderItem {
                    id: None,
                    barcode: "   ".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_item_id_surfaces_as_conflict() {
        let h = harness().await;
        let folder = h.db.insert_folder("Groceries").await.unwrap();
        let request = NewFolderItem {
            id: Some(ItemId::from("x1".to_string())),
            barcode: "0000000000000".to_string(),
        };

        h.pipeline
            .ingest_folder_item(&folder.id, request.clone())
            .await
            .unwrap();
        let err = h
            .pipeline
            .ingest_folder_item(&folder.id, request)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn free_scan_unknown_barcode_touches_nothing() {
        let h = harness().await;
        let mut rx = h.bus.subscribe();

        let err = h
            .pipeline
            .ingest_free_scan(ScanSubmission {
                barcode: "0000000000000".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound("product")));
        assert_eq!(h.slot.take(), None);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn free_scan_notifies_and_persists() {
        let h = harness().await;
        h.db.insert_product(yogurt()).await.unwrap();
        let mut rx = h.bus.subscribe();

        let ack = h
            .pipeline
            .ingest_free_scan(ScanSubmission {
                barcode: "8901234567890".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(ack.product.barcode, "8901234567890");
        assert_eq!(rx.recv().await.unwrap().barcode, "8901234567890");
        assert!(rx.try_recv().is_err(), "exactly one event per scan");
        assert_eq!(h.slot.take().as_deref(), Some("8901234567890"));

        // The insert is detached; poll briefly for it to land.
        let mut found = false;
        for _ in 0..50 {
            let rows: Vec<(String,)> = sqlx::query_as(
                "SELECT barcode FROM scanned_items WHERE folder_id IS NULL",
            )
            .fetch_all(h.db.pool())
            .await
            .unwrap();
            if !rows.is_empty() {
                assert_eq!(rows[0].0, "8901234567890");
                found = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(found, "background persist never landed");
        assert!(h.sink.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn background_persist_failure_reaches_the_sink() {
        let h = harness().await;
        let item = scantry_model::ScannedItem {
            id: ItemId::generate(),
            barcode: "8901234567890".to_string(),
            folder_id: None,
            product: scantry_model::Product::unknown("8901234567890").into(),
            scanned_at: chrono::Utc::now(),
        };

        h.db.pool().close().await;
        h.pipeline.persist_in_background(item).await.unwrap();

        let reports = h.sink.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("free-scan item persistence"));
    }

    #[tokio::test]
    async fn lookup_never_persists_or_notifies() {
        let h = harness().await;
        h.db.insert_product(yogurt()).await.unwrap();
        let mut rx = h.bus.subscribe();

        let product = h.pipeline.lookup("8901234567890").await.unwrap();
        assert_eq!(product.name, "Organic Greek Yogurt");
        assert!(rx.try_recv().is_err());
        assert_eq!(h.slot.take(), None);

        let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM scanned_items")
            .fetch_all(h.db.pool())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
