//! Builder for call caches with explicit options.
//!
//! [`CallCache::new`] covers the default configuration (pass-through). The
//! builder covers everything else and validates what it is given, so values
//! that come from user input or a config file never panic.
//!
//! ## Example
//!
//! ```rust
//! use callcache::builder::CallCacheBuilder;
//! use callcache::{CallArgs, CallCache};
//!
//! let mut digits = CallCacheBuilder::new()
//!     .max_size(64)
//!     .name("digits")
//!     .try_build(|args: &CallArgs| -> usize {
//!         args.positional_int(0).unwrap_or(0).to_string().len()
//!     })
//!     .unwrap();
//!
//! assert_eq!(digits.call_positional([12345]), Ok(5));
//! assert_eq!(digits.name(), Some("digits"));
//!
//! let bad: Result<CallCache<_, usize>, _> = CallCacheBuilder::new()
//!     .max_size(-4)
//!     .try_build(|_: &CallArgs| -> usize { 0 });
//! assert!(bad.is_err());
//! ```

use crate::cache::CallCache;
use crate::config::CacheOptions;
use crate::error::CallCacheError;

/// Builder for creating [`CallCache`] instances.
#[derive(Debug, Clone, Default)]
pub struct CallCacheBuilder {
    options: CacheOptions,
}

impl CallCacheBuilder {
    /// Create a builder with default options (pass-through, unnamed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously loaded options.
    pub fn from_options(options: CacheOptions) -> Self {
        Self { options }
    }

    /// Maximum number of distinct calls retained. `0` disables caching;
    /// negative values are rejected by [`try_build`](Self::try_build).
    pub fn max_size(mut self, max_size: i64) -> Self {
        self.options.max_size = max_size;
        self
    }

    /// Name of the wrapped function, reported in logs.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Build a cache around `function`.
    ///
    /// # Type Parameters
    ///
    /// - `F`: the wrapped function
    /// - `R`: memoized result type, inferred from how the cache is called
    ///
    /// # Errors
    ///
    /// [`CallCacheError::InvalidConfiguration`] if `max_size` is negative.
    pub fn try_build<F, R>(self, function: F) -> Result<CallCache<F, R>, CallCacheError> {
        let max_size = self.options.validate()?;
        Ok(CallCache::from_parts(function, max_size, self.options.name))
    }
}
