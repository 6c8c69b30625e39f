//! callcache: bounded memoization of function calls with insertion-order
//! eviction.
//!
//! A [`CallCache`] owns one wrapped function and one bounded store. Calls are
//! keyed by their literal arguments ([`CallKey`]); when the store is full the
//! oldest-inserted entry is evicted, regardless of how often it was hit.

pub mod args;
pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod store;
pub mod traits;
pub mod value;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use args::CallArgs;
pub use cache::{CallCache, wrap};
pub use error::{CallCacheError, CallError};
pub use key::CallKey;
pub use value::ArgValue;
