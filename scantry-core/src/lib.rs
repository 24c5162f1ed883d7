//! Storage, event fan-out and the scan ingestion pipeline for Scantry.
//!
//! The crate is organized around three collaborators the server wires
//! together at startup:
//!
//! - [`database::Database`]: the SQLite-backed catalog, folder and
//!   scanned-item stores.
//! - [`events::ScanEventBus`] and [`events::LastScanSlot`]: the push and
//!   pull notification channels for scan events.
//! - [`scan::ScanPipeline`]: the single authoritative sequence that turns
//!   a raw barcode into a persisted, product-enriched record.

pub mod database;
pub mod error;
pub mod events;
pub mod scan;

pub use database::Database;
pub use error::{CoreError, Result};
pub use events::{LastScanSlot, ScanEventBus};
pub use scan::{FailureSink, ScanPipeline, TracingFailureSink};
