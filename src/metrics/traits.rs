//! # Metrics Trait Hierarchy
//!
//! Recording is split from consumption so cache logic only ever writes
//! counters:
//!
//! ```text
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │    CallMetricsRecorder      │   │  CallMetricsReadRecorder    │
//!   │  call/hit/miss/passthrough  │   │  get_cached (from &self)    │
//!   │  insert/evict/clear/error   │   │                             │
//!   └──────────────┬──────────────┘   └──────────────┬──────────────┘
//!                  └───────────────┬─────────────────┘
//!                                  ▼
//!                         ┌─────────────────┐
//!                         │ CallCacheMetrics│
//!                         └────────┬────────┘
//!                                  │ snapshot
//!          ┌───────────────────────┴───────────────────────┐
//!          ▼                                               ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by `&mut self` cache operations.
pub trait CallMetricsRecorder {
    fn record_call(&mut self);
    fn record_hit(&mut self);
    fn record_miss(&mut self);
    fn record_passthrough(&mut self);
    fn record_insert(&mut self);
    fn record_eviction(&mut self);
    fn record_clear(&mut self);
    fn record_function_error(&mut self);
    fn record_unhashable(&mut self);
}

/// Counters written by `&self` cache operations (uses interior mutability).
pub trait CallMetricsReadRecorder {
    fn record_get_cached_call(&self);
    fn record_get_cached_found(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
