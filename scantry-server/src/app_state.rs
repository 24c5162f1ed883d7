use std::{fmt, path::PathBuf, sync::Arc};

use scantry_core::{
    Database, LastScanSlot, ScanEventBus, ScanPipeline, TracingFailureSink,
};

/// Shared application state: the storage handle, the scan pipeline and
/// the two process-scoped notification channels it fans out to.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub pipeline: ScanPipeline,
    pub scan_events: Arc<ScanEventBus>,
    pub last_scan: Arc<LastScanSlot>,
    /// Directory served for non-API paths.
    pub public_dir: PathBuf,
}

impl AppState {
    /// Wire the singleton collaborators around an opened database. The
    /// bus and slot start empty and live until process exit.
    pub fn new(db: Database, public_dir: PathBuf) -> Self {
        let scan_events = Arc::new(ScanEventBus::default());
        let last_scan = Arc::new(LastScanSlot::new());
        let pipeline = ScanPipeline::new(
            db.clone(),
            Arc::clone(&scan_events),
            Arc::clone(&last_scan),
            Arc::new(TracingFailureSink),
        );
        AppState {
            db,
            pipeline,
            scan_events,
            last_scan,
            public_dir,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
