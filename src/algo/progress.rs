//! Progress reporting for long-running partitions.
//!
//! Meshes with many material slots are partitioned one sub-mesh at a time
//! (possibly on several threads); a [`Progress`] callback lets the caller
//! follow along.
//!
//! # Example
//!
//! ```
//! use splinter::algo::Progress;
//!
//! let progress = Progress::new(|current, total, message| {
//!     eprintln!("[{}/{}] {}", current, total, message);
//! });
//! progress.report(1, 4, "Partitioning submeshes");
//! ```

/// A progress callback that receives updates during partitioning.
///
/// The callback receives:
/// - `current`: Number of completed steps
/// - `total`: Total number of steps
/// - `message`: Description of the current operation
///
/// Updates may arrive from worker threads and out of order, so the callback
/// must be `Send + Sync`.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_report_forwards_to_callback() {
        let last = Arc::new(AtomicUsize::new(0));
        let sink = last.clone();
        let progress = Progress::new(move |current, total, _| {
            sink.store(current * 100 / total, Ordering::Relaxed);
        });

        progress.report(3, 4, "step");
        assert_eq!(last.load(Ordering::Relaxed), 75);
    }

    #[test]
    fn test_none_is_silent() {
        let progress = Progress::default();
        progress.report(1, 1, "ignored");
        assert_eq!(format!("{:?}", progress), "Progress { .. }");
    }
}
