//! Progress-callback trait for request lifecycle events.
//!
//! Inject an [`Arc<dyn RequestProgressCallback>`] via
//! [`crate::config::ClientConfigBuilder::progress_callback`] to receive
//! events as a request moves through its lifecycle.
//!
//! The surface is deliberately small: the backend reports nothing while
//! it works, so the only honest events are start, completion, and
//! failure. There is no percentage to report and none is fabricated —
//! a caller that wants a spinner drives it from `on_request_start`.

use std::sync::Arc;

/// Called by the client as a request starts and reaches a terminal
/// state.
///
/// All methods have default no-op implementations so callers override
/// only what they care about. Implementations must be `Send + Sync`.
pub trait RequestProgressCallback: Send + Sync {
    /// Called just before the request is sent.
    ///
    /// # Arguments
    /// * `operation`   — the backend identifier, e.g. `pdf-to-docx`
    /// * `files`       — number of files in the payload
    /// * `total_bytes` — combined payload size
    fn on_request_start(&self, operation: &str, files: usize, total_bytes: usize) {
        let _ = (operation, files, total_bytes);
    }

    /// Called when the backend answered and the response was
    /// successfully interpreted.
    ///
    /// # Arguments
    /// * `operation`    — the backend identifier
    /// * `result_bytes` — artifact size, or extracted-text length
    fn on_request_complete(&self, operation: &str, result_bytes: usize) {
        let _ = (operation, result_bytes);
    }

    /// Called when the request failed (validation never reaches here —
    /// only transport, status, and interpretation failures).
    fn on_request_error(&self, operation: &str, error: &str) {
        let _ = (operation, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl RequestProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in
/// [`crate::config::ClientConfig`].
pub type ProgressCallback = Arc<dyn RequestProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
    }

    impl RequestProgressCallback for TrackingCallback {
        fn on_request_start(&self, _operation: &str, _files: usize, _total_bytes: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_request_complete(&self, _operation: &str, _result_bytes: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_request_error(&self, _operation: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_request_start("pdf-to-docx", 1, 1024);
        cb.on_request_complete("pdf-to-docx", 2048);
        cb.on_request_error("pdf-to-docx", "HTTP 500");
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        };

        tracker.on_request_start("merge-pdfs", 3, 4096);
        tracker.on_request_complete("merge-pdfs", 9000);
        tracker.on_request_start("pdf-ocr", 1, 512);
        tracker.on_request_error("pdf-ocr", "timeout");

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn RequestProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_request_start("image-compress", 1, 100);
        cb.on_request_complete("image-compress", 60);
    }
}
