/// Payload fanned out to every live scan-stream subscriber.
///
/// Deliberately minimal: subscribers that want product detail fetch it
/// through the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanEvent {
    pub barcode: String,
}

impl ScanEvent {
    pub fn new(barcode: impl Into<String>) -> Self {
        ScanEvent {
            barcode: barcode.into(),
        }
    }
}
