//! # Call Cache Traits
//!
//! Capability set of a memoized function, split the same way read and write
//! access are split elsewhere in the crate:
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │          ReadOnlyCallCache              │
//!   │                                         │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  is_cached(&, &CallArgs) → bool         │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MemoizedCall<R>               │
//!   │                                         │
//!   │  call(&mut, &CallArgs) → Result<R>      │
//!   │  get_cached(&, &CallArgs) → Result<&R>  │
//!   │  clear(&mut)                            │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! Implementations are single-threaded. Serialize access externally, e.g.
//! one cache per thread or a cache behind a mutex.
//!
//! ## Example Usage
//!
//! ```
//! use callcache::traits::{MemoizedCall, ReadOnlyCallCache};
//! use callcache::{CallArgs, CallCache};
//!
//! // Works with any memoized function producing i64
//! fn warm<C: MemoizedCall<i64>>(cache: &mut C, inputs: &[i64]) {
//!     for &n in inputs {
//!         cache.call(&CallArgs::new().arg(n)).unwrap();
//!     }
//! }
//!
//! let mut cache = CallCache::with_max_size(
//!     |args: &CallArgs| -> i64 { args.positional_int(0).unwrap_or(0) * 2 },
//!     8,
//! );
//! warm(&mut cache, &[1, 2, 3]);
//! assert_eq!(ReadOnlyCallCache::len(&cache), 3);
//! ```

use crate::args::CallArgs;
use crate::error::CallCacheError;

/// Read-only introspection of a call cache.
pub trait ReadOnlyCallCache {
    /// Number of memoized calls currently stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of memoized calls; `0` means pass-through.
    fn capacity(&self) -> usize;

    /// Returns `true` if a call with exactly these arguments is stored.
    fn is_cached(&self, args: &CallArgs) -> bool;
}

/// Invocation surface of a memoized function producing `R`.
pub trait MemoizedCall<R>: ReadOnlyCallCache {
    /// Returns the memoized result, invoking the function on a miss.
    ///
    /// # Errors
    ///
    /// [`CallCacheError::UnhashableArgument`] if caching is enabled and an
    /// argument cannot be part of a key; the function is not invoked.
    fn call(&mut self, args: &CallArgs) -> Result<R, CallCacheError>;

    /// Returns the stored result without invoking the function.
    ///
    /// # Errors
    ///
    /// [`CallCacheError::NotCached`] if no entry exists for these arguments.
    fn get_cached(&self, args: &CallArgs) -> Result<&R, CallCacheError>;

    /// Removes every memoized call.
    fn clear(&mut self);
}
