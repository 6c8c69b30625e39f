pub use crate::args::CallArgs;
pub use crate::builder::CallCacheBuilder;
pub use crate::cache::{CallCache, wrap};
pub use crate::config::CacheOptions;
pub use crate::error::{CallCacheError, CallError, InvariantError};
pub use crate::key::{CallKey, KeyValue};
pub use crate::store::CallStore;
pub use crate::traits::{MemoizedCall, ReadOnlyCallCache};
pub use crate::value::ArgValue;

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CallCacheMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
