use indicatif::{ProgressBar, ProgressStyle};

/// Visual progress bar for a dispatch run.
///
/// Mirrors the `ProgressTracker` counters into an indicatif bar; disabled
/// when output is not a terminal (or the caller asked for quiet).
pub struct ProgressMonitor {
    bar: ProgressBar,
    enabled: bool,
}

impl ProgressMonitor {
    pub fn new(total_tasks: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
                enabled: false,
            };
        }

        let bar = ProgressBar::new(total_tasks as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tasks ({percent}%) {msg}",
                )
                .unwrap()
                .progress_chars("█▓▒░  "),
        );
        bar.set_message("Starting...");

        Self { bar, enabled: true }
    }

    /// Move the bar to an absolute completed count.
    pub fn set_completed(&self, completed: usize) {
        if self.enabled {
            self.bar.set_position(completed as u64);
        }
    }

    pub fn set_message(&self, msg: &str) {
        if self.enabled {
            self.bar.set_message(msg.to_string());
        }
    }

    /// Print a line above the bar without tearing it.
    pub fn println(&self, line: &str) {
        if self.enabled {
            self.bar.println(line);
        } else {
            eprintln!("{line}");
        }
    }

    pub fn finish(&self, success: bool) {
        if !self.enabled {
            return;
        }

        let msg = if success {
            "✅ All tasks completed"
        } else {
            "❌ Some tasks failed"
        };
        self.bar.finish_with_message(msg.to_string());
    }

    pub fn clear(&self) {
        if self.enabled {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_disabled() {
        let monitor = ProgressMonitor::new(3, false);

        // Should not panic when disabled
        monitor.set_completed(1);
        monitor.set_message("test");
        monitor.finish(true);
        monitor.clear();
    }

    #[test]
    fn test_monitor_enabled() {
        let monitor = ProgressMonitor::new(3, true);

        monitor.set_completed(2);
        monitor.set_message("running");
        monitor.finish(true);
    }
}
