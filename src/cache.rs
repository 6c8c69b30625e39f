//! Memoizing wrapper around a pure function.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CallCache<F, R>                                │
//! │                                                                         │
//! │   function: F ─────────── FnMut(&CallArgs) -> R                         │
//! │   store: CallStore<R> ─── CallKey → R, insertion ordered, ≤ max_size    │
//! │   name: Option<String>                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! Call Flow
//! ─────────
//!
//!   call(args):
//!     1. max_size == 0 → invoke function, return (no key is built)
//!     2. build CallKey (unhashable argument → error, nothing invoked)
//!     3. hit  → return clone of stored result (no reordering)
//!     4. miss → invoke function with args
//!     5. store full → evict oldest inserted entry
//!     6. insert key → result as newest, return result
//! ```
//!
//! Eviction is strictly by insertion order. A hit never refreshes an entry,
//! so this is FIFO, not LRU.
//!
//! ## Failure Behavior
//!
//! - A panic in the wrapped function unwinds before the store is touched.
//! - [`CallCache::try_call`] returns the function's `Err` unchanged and never
//!   caches it.
//! - Every operation either completes or leaves the store unchanged.
//!
//! ## Example Usage
//!
//! ```
//! use callcache::{CallArgs, CallCache, CallCacheError};
//!
//! let mut square = CallCache::with_max_size(
//!     |args: &CallArgs| -> i64 { args.positional_int(0).unwrap_or(0).pow(2) },
//!     2,
//! );
//!
//! assert_eq!(square.call_positional([2]), Ok(4)); // miss, store: [2]
//! assert_eq!(square.call_positional([3]), Ok(9)); // miss, store: [2, 3]
//! assert_eq!(square.call_positional([2]), Ok(4)); // hit,  store: [2, 3]
//! assert_eq!(square.call_positional([4]), Ok(16)); // miss, evicts 2
//!
//! assert_eq!(
//!     square.get_cached(&CallArgs::new().arg(2)),
//!     Err(CallCacheError::NotCached)
//! );
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe. `call` and `clear` take `&mut self`; share a cache across
//! threads only behind external synchronization.

use std::fmt;

use tracing::{debug, trace};

use crate::args::CallArgs;
use crate::builder::CallCacheBuilder;
use crate::config::CacheOptions;
use crate::error::{CallCacheError, CallError, InvariantError};
use crate::key::CallKey;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CallCacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CallCacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CallMetricsReadRecorder, CallMetricsRecorder, MetricsReset, MetricsSnapshotProvider,
};
use crate::store::CallStore;
use crate::traits::{MemoizedCall, ReadOnlyCallCache};
use crate::value::ArgValue;

const ANONYMOUS: &str = "<anonymous>";

/// Wraps `function` in a cache retaining at most `max_size` calls.
///
/// # Errors
///
/// [`CallCacheError::InvalidConfiguration`] if `max_size` is negative.
///
/// # Example
///
/// ```
/// use callcache::CallArgs;
///
/// let mut double = callcache::wrap(|args: &CallArgs| args.positional_int(0).unwrap_or(0) * 2, 16)
///     .unwrap();
/// assert_eq!(double.call_positional([21]), Ok(42));
///
/// assert!(callcache::wrap(|_: &CallArgs| (), -1).is_err());
/// ```
pub fn wrap<F, R>(function: F, max_size: i64) -> Result<CallCache<F, R>, CallCacheError>
where
    F: FnMut(&CallArgs) -> R,
{
    CallCacheBuilder::new().max_size(max_size).try_build(function)
}

/// Memoizing wrapper owning one function and one bounded result store.
///
/// # Type Parameters
///
/// - `F`: the wrapped function, `FnMut(&CallArgs) -> R` for [`call`](Self::call)
///   or `FnMut(&CallArgs) -> Result<R, E>` for [`try_call`](Self::try_call)
/// - `R`: the memoized result type
pub struct CallCache<F, R> {
    function: F,
    store: CallStore<R>,
    name: Option<String>,
    #[cfg(feature = "metrics")]
    metrics: CallCacheMetrics,
}

impl<F, R> CallCache<F, R> {
    /// Creates a pass-through cache: every call invokes `function`.
    ///
    /// # Example
    ///
    /// ```
    /// use callcache::{CallArgs, CallCache};
    ///
    /// let mut runs = 0;
    /// let mut cache = CallCache::new(|_: &CallArgs| {
    ///     runs += 1;
    /// });
    /// cache.call(&CallArgs::new()).unwrap();
    /// cache.call(&CallArgs::new()).unwrap();
    /// drop(cache);
    /// assert_eq!(runs, 2);
    /// ```
    #[inline]
    pub fn new(function: F) -> Self {
        Self::with_max_size(function, 0)
    }

    /// Creates a cache retaining at most `max_size` distinct calls.
    ///
    /// `max_size == 0` disables caching.
    pub fn with_max_size(function: F, max_size: usize) -> Self {
        Self::from_parts(function, max_size, None)
    }

    /// Creates a cache from serializable options.
    ///
    /// # Errors
    ///
    /// [`CallCacheError::InvalidConfiguration`] if `options.max_size` is negative.
    pub fn from_options(function: F, options: &CacheOptions) -> Result<Self, CallCacheError> {
        let max_size = options.validate()?;
        Ok(Self::from_parts(function, max_size, options.name.clone()))
    }

    pub(crate) fn from_parts(function: F, max_size: usize, name: Option<String>) -> Self {
        debug!(
            cache = name.as_deref().unwrap_or(ANONYMOUS),
            max_size,
            enabled = max_size > 0,
            "created call cache"
        );
        Self {
            function,
            store: CallStore::new(max_size),
            name,
            #[cfg(feature = "metrics")]
            metrics: CallCacheMetrics::default(),
        }
    }

    /// Sets the name reported in logs and `Debug` output.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS)
    }

    /// Returns `false` in pass-through mode (`max_size == 0`).
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.store.capacity() > 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Configured `max_size`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Keys of memoized calls, oldest first (next to be evicted first).
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &CallKey> + '_ {
        self.store.keys()
    }

    /// Returns the stored result for `args` without invoking the function.
    ///
    /// # Errors
    ///
    /// - [`CallCacheError::NotCached`] if no entry exists, or in pass-through mode.
    /// - [`CallCacheError::UnhashableArgument`] if caching is enabled and an
    ///   argument cannot be part of a key.
    pub fn get_cached(&self, args: &CallArgs) -> Result<&R, CallCacheError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_get_cached_call();

        if !self.is_enabled() {
            return Err(CallCacheError::NotCached);
        }
        let key = CallKey::try_new(args)?;
        let result = self.store.get(&key).ok_or(CallCacheError::NotCached)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_get_cached_found();

        Ok(result)
    }

    /// Returns `true` if a call with exactly these arguments is stored.
    ///
    /// Unhashable arguments are never cached, so they report `false`.
    pub fn is_cached(&self, args: &CallArgs) -> bool {
        self.is_enabled()
            && CallKey::try_new(args)
                .map(|key| self.store.contains(&key))
                .unwrap_or(false)
    }

    /// Removes every memoized call. Capacity and enabled state are unchanged.
    pub fn clear(&mut self) {
        let dropped = self.store.len();
        self.store.clear();
        debug!(cache = self.label(), dropped, "cleared call cache");

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Borrows the wrapped function.
    #[inline]
    pub fn function(&self) -> &F {
        &self.function
    }

    /// Discards the store and returns the wrapped function.
    pub fn into_inner(self) -> F {
        self.function
    }

    /// Checks the store's internal invariants.
    ///
    /// # Errors
    ///
    /// [`InvariantError`] describing the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.store.check_invariants()
    }

    /// Builds the key for a call on the caching path.
    fn key_for(&mut self, args: &CallArgs) -> Result<CallKey, CallCacheError> {
        match CallKey::try_new(args) {
            Ok(key) => Ok(key),
            Err(err) => {
                debug!(cache = self.label(), error = %err, "call rejected before invocation");
                #[cfg(feature = "metrics")]
                self.metrics.record_unhashable();
                Err(err)
            },
        }
    }

    /// Stores `result` under `key` as the newest entry, evicting the oldest
    /// entry if the store is full.
    fn remember(&mut self, key: CallKey, result: R) {
        if let Some((evicted, _)) = self.store.insert(key, result) {
            debug!(
                cache = self.label(),
                evicted = %evicted,
                capacity = self.store.capacity(),
                "evicted oldest cached call"
            );
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert();
    }
}

impl<F, R> CallCache<F, R>
where
    F: FnMut(&CallArgs) -> R,
    R: Clone,
{
    /// Returns the memoized result for `args`, invoking the function on a miss.
    ///
    /// # Errors
    ///
    /// [`CallCacheError::UnhashableArgument`] if caching is enabled and an
    /// argument cannot be part of a key. The function is not invoked and the
    /// store is unchanged. Pass-through caches never build a key, so they
    /// accept any argument.
    pub fn call(&mut self, args: &CallArgs) -> Result<R, CallCacheError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_call();

        if !self.is_enabled() {
            #[cfg(feature = "metrics")]
            self.metrics.record_passthrough();
            return Ok((self.function)(args));
        }

        let key = self.key_for(args)?;
        if let Some(hit) = self.store.get(&key) {
            trace!(cache = self.label(), key = %key, "call cache hit");
            #[cfg(feature = "metrics")]
            self.metrics.record_hit();
            return Ok(hit.clone());
        }

        trace!(cache = self.label(), key = %key, "call cache miss");
        #[cfg(feature = "metrics")]
        self.metrics.record_miss();

        let result = (self.function)(args);
        self.remember(key, result.clone());
        Ok(result)
    }

    /// [`call`](Self::call) with positional arguments only.
    pub fn call_positional<I, T>(&mut self, values: I) -> Result<R, CallCacheError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ArgValue>,
    {
        self.call(&CallArgs::positional_only(values))
    }
}

impl<F, T, E> CallCache<F, T>
where
    F: FnMut(&CallArgs) -> Result<T, E>,
    T: Clone,
{
    /// Fallible counterpart of [`call`](Self::call) for functions returning
    /// `Result`.
    ///
    /// Only `Ok` values are memoized. An `Err` from the function is returned
    /// as [`CallError::Function`] and the next identical call runs the
    /// function again.
    ///
    /// # Errors
    ///
    /// - [`CallError::Cache`] for cache failures (unhashable argument).
    /// - [`CallError::Function`] for the function's own error.
    ///
    /// # Example
    ///
    /// ```
    /// use callcache::{CallArgs, CallCache, CallError};
    ///
    /// let mut parse = CallCache::with_max_size(
    ///     |args: &CallArgs| -> Result<i64, String> {
    ///         let text = args.get(0).and_then(|v| v.as_str()).unwrap_or_default();
    ///         text.parse::<i64>().map_err(|e| e.to_string())
    ///     },
    ///     4,
    /// );
    ///
    /// assert_eq!(parse.try_call(&CallArgs::new().arg("12")), Ok(12));
    /// assert!(matches!(
    ///     parse.try_call(&CallArgs::new().arg("x")),
    ///     Err(CallError::Function(_))
    /// ));
    /// assert_eq!(parse.len(), 1);
    /// ```
    pub fn try_call(&mut self, args: &CallArgs) -> Result<T, CallError<E>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_call();

        if !self.is_enabled() {
            #[cfg(feature = "metrics")]
            self.metrics.record_passthrough();
            return (self.function)(args).map_err(|err| self.function_failed(err));
        }

        let key = self.key_for(args)?;
        if let Some(hit) = self.store.get(&key) {
            trace!(cache = self.label(), key = %key, "call cache hit");
            #[cfg(feature = "metrics")]
            self.metrics.record_hit();
            return Ok(hit.clone());
        }

        trace!(cache = self.label(), key = %key, "call cache miss");
        #[cfg(feature = "metrics")]
        self.metrics.record_miss();

        match (self.function)(args) {
            Ok(result) => {
                self.remember(key, result.clone());
                Ok(result)
            },
            Err(err) => Err(self.function_failed(err)),
        }
    }

    fn function_failed(&mut self, err: E) -> CallError<E> {
        debug!(cache = self.label(), "wrapped function failed; result not cached");
        #[cfg(feature = "metrics")]
        self.metrics.record_function_error();
        CallError::Function(err)
    }
}

#[cfg(feature = "metrics")]
impl<F, R> CallCache<F, R> {
    pub fn metrics_snapshot(&self) -> CallCacheMetricsSnapshot {
        self.metrics
            .snapshot(self.store.len(), self.store.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<F, R> MetricsSnapshotProvider<CallCacheMetricsSnapshot> for CallCache<F, R> {
    fn snapshot(&self) -> CallCacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<F, R> MetricsReset for CallCache<F, R> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<F, R> fmt::Debug for CallCache<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallCache")
            .field("name", &self.label())
            .field("capacity", &self.store.capacity())
            .field("len", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl<F, R> ReadOnlyCallCache for CallCache<F, R> {
    #[inline]
    fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.store.capacity()
    }

    #[inline]
    fn is_cached(&self, args: &CallArgs) -> bool {
        CallCache::is_cached(self, args)
    }
}

/// Implementation of the [`MemoizedCall`] trait.
///
/// Allows a `CallCache` to be used through the generic memoization interface.
impl<F, R> MemoizedCall<R> for CallCache<F, R>
where
    F: FnMut(&CallArgs) -> R,
    R: Clone,
{
    #[inline]
    fn call(&mut self, args: &CallArgs) -> Result<R, CallCacheError> {
        CallCache::call(self, args)
    }

    #[inline]
    fn get_cached(&self, args: &CallArgs) -> Result<&R, CallCacheError> {
        CallCache::get_cached(self, args)
    }

    fn clear(&mut self) {
        CallCache::clear(self);
    }
}
