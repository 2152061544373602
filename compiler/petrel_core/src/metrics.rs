//! Observability hooks for tree construction.
//!
//! Node construction reports category counters and size histograms through
//! an injected [`MetricsSink`] rather than global mutable state, so tests
//! construct trees without side effects leaking across cases.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// Capability for recording construction counters and size histograms.
pub trait MetricsSink {
    /// Increment a counter within a category, e.g. `("trees", "send")`.
    fn counter_inc(&self, category: &'static str, counter: &'static str);

    /// Record one observation of `value` in a histogram, e.g.
    /// `("trees.send.args", 3)`.
    fn histogram_inc(&self, histogram: &'static str, value: usize);
}

/// Sink that drops every observation.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl MetricsSink for NullSink {
    fn counter_inc(&self, _category: &'static str, _counter: &'static str) {}

    fn histogram_inc(&self, _histogram: &'static str, _value: usize) {}
}

/// Recording sink backed by hash maps.
pub struct Counters {
    counters: Mutex<FxHashMap<(&'static str, &'static str), u64>>,
    histograms: Mutex<FxHashMap<(&'static str, usize), u64>>,
}

impl Counters {
    pub fn new() -> Self {
        Counters {
            counters: Mutex::new(FxHashMap::default()),
            histograms: Mutex::new(FxHashMap::default()),
        }
    }

    /// Current value of a counter, zero if never incremented.
    pub fn counter_value(&self, category: &'static str, counter: &'static str) -> u64 {
        *self
            .counters
            .lock()
            .get(&(category, counter))
            .unwrap_or(&0)
    }

    /// How many times `value` was observed in `histogram`.
    pub fn histogram_count(&self, histogram: &'static str, value: usize) -> u64 {
        *self
            .histograms
            .lock()
            .get(&(histogram, value))
            .unwrap_or(&0)
    }
}

impl Default for Counters {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for Counters {
    fn counter_inc(&self, category: &'static str, counter: &'static str) {
        *self.counters.lock().entry((category, counter)).or_insert(0) += 1;
    }

    fn histogram_inc(&self, histogram: &'static str, value: usize) {
        *self
            .histograms
            .lock()
            .entry((histogram, value))
            .or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_record() {
        let sink = Counters::new();
        sink.counter_inc("trees", "send");
        sink.counter_inc("trees", "send");
        sink.counter_inc("trees", "if");
        assert_eq!(sink.counter_value("trees", "send"), 2);
        assert_eq!(sink.counter_value("trees", "if"), 1);
        assert_eq!(sink.counter_value("trees", "while"), 0);
    }

    #[test]
    fn test_histograms_record_per_value() {
        let sink = Counters::new();
        sink.histogram_inc("trees.send.args", 2);
        sink.histogram_inc("trees.send.args", 2);
        sink.histogram_inc("trees.send.args", 0);
        assert_eq!(sink.histogram_count("trees.send.args", 2), 2);
        assert_eq!(sink.histogram_count("trees.send.args", 0), 1);
        assert_eq!(sink.histogram_count("trees.send.args", 7), 0);
    }
}
