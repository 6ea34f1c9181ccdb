use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};

/// Bounded per-metric sliding windows of the most recent readings.
///
/// The tick loop is the only writer; renderers and other readers take
/// copies through [`WindowBuffer::snapshot`] instead of holding a live
/// view, so a concurrent redraw never observes a half-applied push.
#[derive(Debug)]
pub struct WindowBuffer {
    capacity: usize,
    series: RwLock<HashMap<String, VecDeque<f64>>>,
}

impl WindowBuffer {
    /// Capacity is fixed at construction and must be validated by the
    /// caller (config validation rejects zero).
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            capacity,
            series: RwLock::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a reading, evicting the oldest once the window is full.
    /// Accepts any finite value; range checks belong to the classifier.
    pub fn push(&self, metric: &str, value: f64) {
        let mut series = self.series.write();
        let window = series
            .entry(metric.to_string())
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        if window.len() == self.capacity {
            window.pop_front();
        }
        window.push_back(value);
    }

    /// Copy of the window for one metric, oldest first. Unknown metrics
    /// yield an empty vec.
    pub fn snapshot(&self, metric: &str) -> Vec<f64> {
        self.series
            .read()
            .get(metric)
            .map(|w| w.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, metric: &str) -> usize {
        self.series.read().get(metric).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, metric: &str) -> bool {
        self.len(metric) == 0
    }

    /// Names of all tracked metrics, sorted for stable display order.
    pub fn metric_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.series.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_below_capacity_keeps_everything() {
        let buffer = WindowBuffer::new(5);
        for v in [1.0, 2.0, 3.0] {
            buffer.push("hr", v);
        }
        assert_eq!(buffer.snapshot("hr"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let buffer = WindowBuffer::new(3);
        buffer.push("hr", 1.0);
        let mut snap = buffer.snapshot("hr");
        snap.push(99.0);
        assert_eq!(buffer.snapshot("hr"), vec![1.0]);
    }

    #[test]
    fn unknown_metric_is_empty() {
        let buffer = WindowBuffer::new(3);
        assert!(buffer.snapshot("missing").is_empty());
        assert!(buffer.is_empty("missing"));
    }

    #[test]
    fn metric_names_are_sorted() {
        let buffer = WindowBuffer::new(3);
        buffer.push("chol", 200.0);
        buffer.push("bp", 120.0);
        assert_eq!(buffer.metric_names(), vec!["bp", "chol"]);
    }
}
