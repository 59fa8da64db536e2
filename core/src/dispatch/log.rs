use std::sync::Mutex;

/// Append-only, time-ordered event feed for a dispatch run.
///
/// Entries are whole human-readable lines; concurrent tasks may interleave
/// lines but never corrupt one. Consumers poll `snapshot`/`len` while the
/// run is still in flight.
#[derive(Debug, Default)]
pub struct LogSink {
    entries: Mutex<Vec<String>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, line: String) {
        self.entries.lock().unwrap().push(line);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of all entries appended so far, in append order.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Entries appended at or after `from`, for incremental consumers.
    pub fn since(&self, from: usize) -> Vec<String> {
        let entries = self.entries.lock().unwrap();
        entries.get(from..).map(<[String]>::to_vec).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let sink = LogSink::new();
        sink.append("first".to_string());
        sink.append("second".to_string());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.snapshot(), vec!["first", "second"]);
    }

    #[test]
    fn test_since_returns_tail() {
        let sink = LogSink::new();
        sink.append("a".to_string());
        sink.append("b".to_string());
        sink.append("c".to_string());

        assert_eq!(sink.since(1), vec!["b", "c"]);
        assert!(sink.since(3).is_empty());
        assert!(sink.since(9).is_empty());
    }
}
