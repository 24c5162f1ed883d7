use tracing::error;

use crate::error::CoreError;

/// Reporting target for failures that cannot be surfaced to a caller,
/// such as the free-scan path's background persistence write.
///
/// Injected into the pipeline so tests can observe swallowed failures
/// instead of scraping log output.
pub trait FailureSink: Send + Sync + std::fmt::Debug {
    fn report(&self, context: &str, error: &CoreError);
}

/// Production sink: log at error level and move on. No retries anywhere;
/// all writes are single-attempt.
#[derive(Debug, Default)]
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn report(&self, context: &str, error: &CoreError) {
        error!(context, %error, "background operation failed");
    }
}
