//! Scan ingestion.

pub mod pipeline;
pub mod sink;

pub use pipeline::ScanPipeline;
pub use sink::{FailureSink, TracingFailureSink};
