//! Call cache metrics (cargo feature `metrics`).
//!
//! Recording, snapshotting and export are separate concerns:
//! [`CallCacheMetrics`](metrics_impl::CallCacheMetrics) records counters,
//! [`CallCacheMetricsSnapshot`](snapshot::CallCacheMetricsSnapshot) is a
//! point-in-time copy, and [`PrometheusTextExporter`](exporter::PrometheusTextExporter)
//! publishes snapshots.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
