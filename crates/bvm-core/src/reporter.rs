//! Reporter trait for dependency injection
//!
//! Core logic reports stage changes and download progress through this trait
//! without being coupled to a terminal. The CLI renders it; tests record it.

pub trait Reporter: Send + Sync {
    /// A pipeline stage has started (e.g. "Validating checksum...").
    fn stage(&self, msg: &str);

    /// Cumulative download progress. `total` is `None` when the server sent no
    /// content length.
    fn downloading(&self, current: u64, total: Option<u64>);

    /// A download has finished writing.
    fn download_finished(&self);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn stage(&self, msg: &str) {
        (**self).stage(msg);
    }
    fn downloading(&self, current: u64, total: Option<u64>) {
        (**self).downloading(current, total);
    }
    fn download_finished(&self) {
        (**self).download_finished();
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn success(&self, msg: &str) {
        (**self).success(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn stage(&self, _: &str) {}
    fn downloading(&self, _: u64, _: Option<u64>) {}
    fn download_finished(&self) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}
