/// Point-in-time copy of a call cache's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCacheMetricsSnapshot {
    pub calls: u64,
    pub hits: u64,
    pub misses: u64,
    pub passthrough_calls: u64,

    pub inserts: u64,
    pub evictions: u64,
    pub clears: u64,

    pub function_errors: u64,
    pub unhashable_calls: u64, // rejected before the function ran

    pub get_cached_calls: u64,
    pub get_cached_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl CallCacheMetricsSnapshot {
    /// Fraction of keyed calls served from the store, `0.0` when none ran.
    pub fn hit_ratio(&self) -> f64 {
        let keyed = self.hits + self.misses;
        if keyed == 0 {
            0.0
        } else {
            self.hits as f64 / keyed as f64
        }
    }
}
