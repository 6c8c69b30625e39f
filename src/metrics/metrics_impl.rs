use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::CallCacheMetricsSnapshot;
use crate::metrics::traits::{CallMetricsReadRecorder, CallMetricsRecorder};

#[derive(Debug, Default)]
pub struct CallCacheMetrics {
    pub calls: u64,
    pub hits: u64,
    pub misses: u64,
    pub passthrough_calls: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub clears: u64,
    pub function_errors: u64,
    pub unhashable_calls: u64,
    pub get_cached_calls: MetricsCell,
    pub get_cached_found: MetricsCell,
}

impl CallCacheMetrics {
    /// Copies the counters, adding the store gauges.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CallCacheMetricsSnapshot {
        CallCacheMetricsSnapshot {
            calls: self.calls,
            hits: self.hits,
            misses: self.misses,
            passthrough_calls: self.passthrough_calls,
            inserts: self.inserts,
            evictions: self.evictions,
            clears: self.clears,
            function_errors: self.function_errors,
            unhashable_calls: self.unhashable_calls,
            get_cached_calls: self.get_cached_calls.get(),
            get_cached_found: self.get_cached_found.get(),
            cache_len,
            capacity,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CallMetricsRecorder for CallCacheMetrics {
    fn record_call(&mut self) {
        self.calls += 1;
    }

    fn record_hit(&mut self) {
        self.hits += 1;
    }

    fn record_miss(&mut self) {
        self.misses += 1;
    }

    fn record_passthrough(&mut self) {
        self.passthrough_calls += 1;
    }

    fn record_insert(&mut self) {
        self.inserts += 1;
    }

    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }

    fn record_function_error(&mut self) {
        self.function_errors += 1;
    }

    fn record_unhashable(&mut self) {
        self.unhashable_calls += 1;
    }
}

impl CallMetricsReadRecorder for CallCacheMetrics {
    fn record_get_cached_call(&self) {
        self.get_cached_calls.incr();
    }

    fn record_get_cached_found(&self) {
        self.get_cached_found.incr();
    }
}
