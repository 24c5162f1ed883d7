use std::sync::Mutex;

/// Single-value, read-once mailbox holding the most recently scanned
/// barcode for polling clients.
///
/// Writes are last-write-wins: a second scan before the first poll
/// discards the earlier value. This is intentional — the slot is a lossy
/// convenience for clients that cannot hold a stream open, and the
/// [`ScanEventBus`](crate::ScanEventBus) remains the lossless channel.
/// The assumption of a single active scanning client is documented rather
/// than fixed.
#[derive(Debug, Default)]
pub struct LastScanSlot {
    value: Mutex<Option<String>>,
}

impl LastScanSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite any pending value.
    pub fn set(&self, barcode: impl Into<String>) {
        let mut guard = self.value.lock().expect("last-scan slot mutex poisoned");
        *guard = Some(barcode.into());
    }

    /// Return the pending value and clear it in one step.
    pub fn take(&self) -> Option<String> {
        let mut guard = self.value.lock().expect("last-scan slot mutex poisoned");
        guard.take()
    }
}
