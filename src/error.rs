//! Error types for the callcache library.
//!
//! ## Key Components
//!
//! - [`CallCacheError`]: Returned by the cache itself: invalid configuration,
//!   a lookup for a call that is not cached, or an argument that cannot be
//!   used as part of a [`CallKey`](crate::key::CallKey).
//! - [`CallError`]: Returned by [`CallCache::try_call`](crate::cache::CallCache::try_call),
//!   separating cache failures from errors produced by the wrapped function.
//! - [`InvariantError`]: Returned when internal store invariants are violated
//!   (`check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use callcache::error::CallCacheError;
//! use callcache::{CallArgs, CallCache};
//!
//! let square = |args: &CallArgs| args.positional_int(0).unwrap_or(0).pow(2);
//!
//! // Negative capacities are rejected without panicking
//! let bad = callcache::wrap(square, -1);
//! assert!(matches!(bad, Err(CallCacheError::InvalidConfiguration { max_size: -1 })));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// CallCacheError
// ---------------------------------------------------------------------------

/// Error returned by call cache construction, lookup and key building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallCacheError {
    /// The configured maximum number of cached calls was negative.
    #[error("maximum number of cached calls can't be negative (got {max_size})")]
    InvalidConfiguration { max_size: i64 },

    /// Options text could not be parsed into [`CacheOptions`](crate::config::CacheOptions).
    #[error("invalid cache options: {0}")]
    InvalidOptions(String),

    /// [`get_cached`](crate::cache::CallCache::get_cached) found no entry for the call.
    #[error("call with such arguments is not cached")]
    NotCached,

    /// An argument cannot take part in a call key.
    #[error("argument {argument} of kind {kind} is unhashable")]
    UnhashableArgument {
        /// Positional index (`#0`) or keyword name (`name=`) of the argument.
        argument: String,
        /// Kind of the offending value, e.g. `list`.
        kind: &'static str,
    },
}

impl CallCacheError {
    /// Returns `true` for [`CallCacheError::NotCached`].
    #[inline]
    pub fn is_not_cached(&self) -> bool {
        matches!(self, Self::NotCached)
    }

    /// Returns `true` for [`CallCacheError::UnhashableArgument`].
    #[inline]
    pub fn is_unhashable(&self) -> bool {
        matches!(self, Self::UnhashableArgument { .. })
    }
}

// ---------------------------------------------------------------------------
// CallError
// ---------------------------------------------------------------------------

/// Error returned by fallible invocations of a cached function.
///
/// The wrapped function's own error passes through untouched in
/// [`CallError::Function`]; it is never cached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError<E> {
    /// The cache rejected the call before the function ran.
    #[error(transparent)]
    Cache(#[from] CallCacheError),

    /// The wrapped function returned an error.
    #[error("wrapped function failed: {0}")]
    Function(E),
}

impl<E> CallError<E> {
    /// Returns the wrapped function's error, if that is what failed.
    pub fn into_function_error(self) -> Option<E> {
        match self {
            Self::Function(err) => Some(err),
            Self::Cache(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal store invariants are violated.
///
/// Produced by [`CallStore::check_invariants`](crate::store::CallStore::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- CallCacheError ---------------------------------------------------

    #[test]
    fn invalid_configuration_display_mentions_value() {
        let err = CallCacheError::InvalidConfiguration { max_size: -3 };
        assert!(err.to_string().contains("negative"));
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn not_cached_display() {
        assert_eq!(
            CallCacheError::NotCached.to_string(),
            "call with such arguments is not cached"
        );
    }

    #[test]
    fn unhashable_display_names_argument_and_kind() {
        let err = CallCacheError::UnhashableArgument {
            argument: "#1".to_string(),
            kind: "list",
        };
        let msg = err.to_string();
        assert!(msg.contains("#1"));
        assert!(msg.contains("list"));
    }

    #[test]
    fn predicates() {
        assert!(CallCacheError::NotCached.is_not_cached());
        assert!(!CallCacheError::NotCached.is_unhashable());
        let err = CallCacheError::UnhashableArgument {
            argument: "xs=".to_string(),
            kind: "map",
        };
        assert!(err.is_unhashable());
    }

    #[test]
    fn call_cache_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<CallCacheError>();
    }

    // -- CallError --------------------------------------------------------

    #[test]
    fn call_error_from_cache_error_is_transparent() {
        let err: CallError<String> = CallCacheError::NotCached.into();
        assert_eq!(err.to_string(), CallCacheError::NotCached.to_string());
        assert_eq!(err.into_function_error(), None);
    }

    #[test]
    fn call_error_function_keeps_inner_error() {
        let err: CallError<String> = CallError::Function("boom".to_string());
        assert!(err.to_string().contains("boom"));
        assert_eq!(err.into_function_error(), Some("boom".to_string()));
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("queue length mismatch");
        assert_eq!(err.to_string(), "queue length mismatch");
        assert_eq!(err.message(), "queue length mismatch");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }
}
