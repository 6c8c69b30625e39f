//! Serializable call cache options.
//!
//! [`CacheOptions`] is the form a cache configuration takes when it arrives
//! from outside the program (a config file, an environment-driven settings
//! struct). `max_size` is signed there, so a negative value is representable
//! and rejected by [`CacheOptions::validate`].
//!
//! ```
//! use callcache::config::CacheOptions;
//!
//! let opts = CacheOptions::from_toml_str("max_size = 128\nname = \"fib\"").unwrap();
//! assert_eq!(opts.validate(), Ok(128));
//! assert_eq!(opts.name.as_deref(), Some("fib"));
//!
//! // Missing fields fall back to pass-through defaults.
//! let defaults = CacheOptions::from_toml_str("").unwrap();
//! assert_eq!(defaults.max_size, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CallCacheError;

/// Options accepted by [`CallCache::from_options`](crate::cache::CallCache::from_options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheOptions {
    /// Maximum number of distinct calls retained. `0` disables caching.
    pub max_size: i64,
    /// Name of the wrapped function, used in logs and `Debug` output.
    pub name: Option<String>,
}

impl CacheOptions {
    /// Options for a cache retaining at most `max_size` calls.
    pub fn with_max_size(max_size: i64) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    /// Parses options from TOML text.
    ///
    /// # Errors
    ///
    /// [`CallCacheError::InvalidOptions`] if the text is not valid TOML or
    /// does not match the option schema. Values are not range-checked here;
    /// see [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, CallCacheError> {
        toml::from_str(text).map_err(|err| CallCacheError::InvalidOptions(err.to_string()))
    }

    /// Returns the capacity as `usize`.
    ///
    /// # Errors
    ///
    /// [`CallCacheError::InvalidConfiguration`] if `max_size` is negative.
    pub fn validate(&self) -> Result<usize, CallCacheError> {
        usize::try_from(self.max_size).map_err(|_| CallCacheError::InvalidConfiguration {
            max_size: self.max_size,
        })
    }
}
