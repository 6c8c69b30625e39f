use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::CallCacheMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for call cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// or forwarded to an OpenTelemetry collector. Write errors are dropped;
/// metrics are observational.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {name} {kind}");
        let _ = writeln!(writer, "{name} {value}");
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<CallCacheMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &CallCacheMetricsSnapshot) {
        self.write_counter("calls_total", snapshot.calls);
        self.write_counter("hits_total", snapshot.hits);
        self.write_counter("misses_total", snapshot.misses);
        self.write_counter("passthrough_calls_total", snapshot.passthrough_calls);
        self.write_counter("inserts_total", snapshot.inserts);
        self.write_counter("evictions_total", snapshot.evictions);
        self.write_counter("clears_total", snapshot.clears);
        self.write_counter("function_errors_total", snapshot.function_errors);
        self.write_counter("unhashable_calls_total", snapshot.unhashable_calls);
        self.write_counter("get_cached_calls_total", snapshot.get_cached_calls);
        self.write_counter("get_cached_found_total", snapshot.get_cached_found);
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("square_cache", Vec::new());
        let snapshot = CallCacheMetricsSnapshot {
            hits: 3,
            cache_len: 2,
            capacity: 8,
            ..Default::default()
        };

        exporter.export(&snapshot);
        let text = String::from_utf8(exporter.into_inner()).unwrap();

        assert!(text.contains("# TYPE square_cache_hits_total counter\nsquare_cache_hits_total 3\n"));
        assert!(text.contains("# TYPE square_cache_capacity gauge\nsquare_cache_capacity 8\n"));
        assert!(text.contains("square_cache_cache_len 2"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&CallCacheMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\nmisses_total 0\n"));
    }
}
