//! Busy/idle tracking for externally triggered export jobs.

use std::sync::atomic::{AtomicBool, Ordering};

/// Single-flight flag around export preparation. Exports run outside the
/// store's mutation path, so the only coordination needed is "one at a time";
/// cancellation is not supported.
#[derive(Debug, Default)]
pub struct ExportTask {
    busy: AtomicBool,
}

impl ExportTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Runs `job` if no export is in flight, returning `None` when one is.
    pub fn run<T>(&self, job: impl FnOnce() -> T) -> Option<T> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("export already in progress; skipping trigger");
            return None;
        }
        let result = job();
        self.busy.store(false, Ordering::SeqCst);
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_runs_are_skipped() {
        let task = ExportTask::new();
        let outer = task.run(|| {
            assert!(task.is_busy());
            task.run(|| 1)
        });
        assert_eq!(outer, Some(None));
        assert!(!task.is_busy());
    }

    #[test]
    fn flag_clears_after_run() {
        let task = ExportTask::new();
        assert_eq!(task.run(|| 7), Some(7));
        assert!(!task.is_busy());
        assert_eq!(task.run(|| 8), Some(8));
    }
}
