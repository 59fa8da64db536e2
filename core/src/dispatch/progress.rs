use std::sync::atomic::{AtomicUsize, Ordering};

/// Thread-safe completed/total counters for one dispatch run.
///
/// `total` is fixed when the task matrix is built; `completed` moves up by
/// exactly one when a task reaches its terminal outcome.
#[derive(Debug)]
pub struct ProgressTracker {
    completed: AtomicUsize,
    total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Note one terminal outcome; returns the new completed count.
    pub fn mark_complete(&self) -> usize {
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Rounded percentage in [0, 100]; 0 when there are no tasks at all.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.completed() as f64 / self.total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_completion() {
        let tracker = ProgressTracker::new(3);
        assert_eq!(tracker.completed(), 0);
        assert!(!tracker.is_complete());

        assert_eq!(tracker.mark_complete(), 1);
        assert_eq!(tracker.mark_complete(), 2);
        assert_eq!(tracker.mark_complete(), 3);

        assert!(tracker.is_complete());
        assert_eq!(tracker.completed(), 3);
    }

    #[test]
    fn test_percent_rounds() {
        let tracker = ProgressTracker::new(3);
        assert_eq!(tracker.percent(), 0);
        tracker.mark_complete();
        assert_eq!(tracker.percent(), 33);
        tracker.mark_complete();
        assert_eq!(tracker.percent(), 67);
        tracker.mark_complete();
        assert_eq!(tracker.percent(), 100);
    }

    #[test]
    fn test_percent_zero_total() {
        let tracker = ProgressTracker::new(0);
        assert_eq!(tracker.percent(), 0);
        assert!(tracker.is_complete());
    }
}
