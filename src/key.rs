//! Frozen, hashable identity of one call.
//!
//! ## Architecture
//!
//! ```text
//!   CallArgs                               CallKey
//!   ────────                               ───────
//!   positional: [1, "a", (2, 3)]   ──▶     positional: [Int 1, Str a, Tuple[2, 3]]
//!   keyword:    y=2, x=1           ──▶     keyword:    {x: Int 1, y: Int 2}   (sorted)
//! ```
//!
//! ## Equality Rules
//!
//! - Positional sequences compare element-wise; different lengths never match.
//! - Keyword arguments compare as a set of `(name, value)` pairs, so
//!   `f(x=1, y=2)` and `f(y=2, x=1)` share a key. Names are unique within a
//!   call, so sorting by name gives a canonical order.
//! - Keys are call-signature literal: `f(1)` and `f(x=1)` are different keys.
//! - Values compare numerically across kinds: `f(1)`, `f(1.0)` and `f(true)`
//!   share a key, as do `f(0)`, `f(-0.0)` and `f(false)`. A bool or an
//!   integral float is frozen as `Int`.
//! - Non-integral floats compare by bit pattern, with every NaN folded into
//!   a single canonical NaN.
//!
//! ```text
//!   ArgValue            KeyValue
//!   ────────            ────────
//!   Bool(true)    ──▶   Int(1)
//!   Float(2.0)    ──▶   Int(2)
//!   Float(-0.0)   ──▶   Int(0)
//!   Float(2.5)    ──▶   Float(bits of 2.5)
//!   Float(NaN)    ──▶   Float(canonical NaN bits)
//! ```
//!
//! Building a key from a `List` or `Map` argument (directly or nested in a
//! tuple) fails with [`CallCacheError::UnhashableArgument`].

use std::fmt;

use crate::args::CallArgs;
use crate::error::CallCacheError;
use crate::value::ArgValue;

/// Hashable image of an [`ArgValue`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    None,
    /// Also the image of bools and integral floats.
    Int(i64),
    /// Canonical IEEE-754 bits of a non-integral float, see
    /// [`KeyValue::float_bits`].
    Float(u64),
    Str(Box<str>),
    Bytes(Box<[u8]>),
    Tuple(Box<[KeyValue]>),
}

impl KeyValue {
    /// Canonical bit pattern used for float keys.
    #[inline]
    pub fn float_bits(x: f64) -> u64 {
        if x.is_nan() {
            f64::NAN.to_bits()
        } else if x == 0.0 {
            0.0f64.to_bits()
        } else {
            x.to_bits()
        }
    }

    /// Key image of a float: integral values inside the `i64` range share
    /// the image of the equal integer.
    fn freeze_float(x: f64) -> Self {
        // 2^63; `i64::MAX as f64` rounds up to this value.
        const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

        if x.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&x) {
            Self::Int(x as i64)
        } else {
            Self::Float(Self::float_bits(x))
        }
    }

    /// Freezes `value`, or returns the kind of the first unhashable part.
    fn freeze(value: &ArgValue) -> Result<Self, &'static str> {
        Ok(match value {
            ArgValue::None => Self::None,
            ArgValue::Bool(b) => Self::Int(i64::from(*b)),
            ArgValue::Int(n) => Self::Int(*n),
            ArgValue::Float(x) => Self::freeze_float(*x),
            ArgValue::Str(s) => Self::Str(s.as_str().into()),
            ArgValue::Bytes(b) => Self::Bytes(b.as_slice().into()),
            ArgValue::Tuple(items) => Self::Tuple(
                items
                    .iter()
                    .map(Self::freeze)
                    .collect::<Result<Box<[_]>, _>>()?,
            ),
            ArgValue::List(_) | ArgValue::Map(_) => return Err(value.kind()),
        })
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            },
        }
    }
}

/// Structural identity of one invocation: positional values in order plus
/// the set of keyword pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallKey {
    positional: Box<[KeyValue]>,
    /// Sorted by name; names are unique.
    keyword: Box<[(Box<str>, KeyValue)]>,
}

impl CallKey {
    /// Builds the key for `args`.
    ///
    /// # Errors
    ///
    /// [`CallCacheError::UnhashableArgument`] naming the first argument
    /// (positional `#i`, or keyword `name=`) that contains a `List` or `Map`.
    pub fn try_new(args: &CallArgs) -> Result<Self, CallCacheError> {
        let positional = args
            .positional()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                KeyValue::freeze(v).map_err(|kind| CallCacheError::UnhashableArgument {
                    argument: format!("#{i}"),
                    kind,
                })
            })
            .collect::<Result<Box<[_]>, _>>()?;

        let mut keyword = args
            .keywords()
            .map(|(name, v)| {
                KeyValue::freeze(v)
                    .map(|kv| (Box::<str>::from(name), kv))
                    .map_err(|kind| CallCacheError::UnhashableArgument {
                        argument: format!("{name}="),
                        kind,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        keyword.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            positional,
            keyword: keyword.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn positional(&self) -> &[KeyValue] {
        &self.positional
    }

    /// Keyword pairs sorted by name.
    pub fn keywords(&self) -> impl ExactSizeIterator<Item = (&str, &KeyValue)> + '_ {
        self.keyword.iter().map(|(n, v)| (&**n, v))
    }
}

impl TryFrom<&CallArgs> for CallKey {
    type Error = CallCacheError;

    fn try_from(args: &CallArgs) -> Result<Self, Self::Error> {
        Self::try_new(args)
    }
}

impl fmt::Display for CallKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let mut first = true;
        for value in self.positional.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{value}")?;
        }
        for (name, value) in self.keyword.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}
