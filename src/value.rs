//! Dynamic argument values passed to a cached function.
//!
//! A wrapped function receives its arguments as [`ArgValue`]s so that one
//! cache type can front functions of any arity. Values fall into two groups:
//!
//! ```text
//!   hashable                         unhashable
//!   ─────────                        ──────────
//!   None, Bool, Int, Float,          List, Map
//!   Str, Bytes,                      (mutable containers)
//!   Tuple(all elements hashable)
//! ```
//!
//! Only hashable values can be part of a [`CallKey`](crate::key::CallKey).

use std::fmt;

/// One positional or keyword argument value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ArgValue {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// Immutable sequence; hashable when every element is.
    Tuple(Vec<ArgValue>),
    /// Mutable sequence; never hashable.
    List(Vec<ArgValue>),
    /// Mutable string-keyed mapping; never hashable.
    Map(Vec<(String, ArgValue)>),
}

impl ArgValue {
    /// Builds a tuple from anything convertible into argument values.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ArgValue>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a list from anything convertible into argument values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ArgValue>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a map from `(name, value)` pairs.
    pub fn map<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<ArgValue>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short lowercase name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Returns `true` if this value may be part of a call key.
    pub fn is_hashable(&self) -> bool {
        self.first_unhashable().is_none()
    }

    /// Returns the first value, in depth-first order, that is unhashable.
    pub(crate) fn first_unhashable(&self) -> Option<&ArgValue> {
        match self {
            Self::List(_) | Self::Map(_) => Some(self),
            Self::Tuple(items) => items.iter().find_map(ArgValue::first_unhashable),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn seq(f: &mut fmt::Formatter<'_>, items: &[ArgValue]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
            Self::Tuple(items) => {
                f.write_str("(")?;
                seq(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            },
            Self::List(items) => {
                f.write_str("[")?;
                seq(f, items)?;
                f.write_str("]")
            },
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                f.write_str("}")
            },
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ArgValue {
                #[inline]
                fn from(n: $t) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for ArgValue {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f32> for ArgValue {
    #[inline]
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<f64> for ArgValue {
    #[inline]
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for ArgValue {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for ArgValue {
    #[inline]
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&[u8]> for ArgValue {
    #[inline]
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    #[inline]
    fn from(items: Vec<ArgValue>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    #[inline]
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod hashability {
        use super::*;

        #[test]
        fn scalars_are_hashable() {
            for v in [
                ArgValue::None,
                ArgValue::from(true),
                ArgValue::from(7),
                ArgValue::from(1.5),
                ArgValue::from("s"),
                ArgValue::from(&b"raw"[..]),
            ] {
                assert!(v.is_hashable(), "{} should be hashable", v.kind());
            }
        }

        #[test]
        fn containers_are_unhashable() {
            assert!(!ArgValue::list([1, 2]).is_hashable());
            assert!(!ArgValue::map([("a", 1)]).is_hashable());
            assert!(!ArgValue::list(Vec::<i32>::new()).is_hashable());
        }

        #[test]
        fn tuple_inherits_hashability_from_elements() {
            assert!(ArgValue::tuple([1, 2, 3]).is_hashable());
            let nested = ArgValue::Tuple(vec![ArgValue::from(1), ArgValue::list([2])]);
            assert!(!nested.is_hashable());
            assert_eq!(nested.first_unhashable().map(ArgValue::kind), Some("list"));
        }
    }

    mod conversions {
        use super::*;

        #[test]
        fn integers_widen_to_int() {
            assert_eq!(ArgValue::from(3u8), ArgValue::Int(3));
            assert_eq!(ArgValue::from(-3i32), ArgValue::Int(-3));
            assert_eq!(ArgValue::from(u32::MAX).as_int(), Some(i64::from(u32::MAX)));
        }

        #[test]
        fn option_maps_none() {
            assert_eq!(ArgValue::from(None::<i32>), ArgValue::None);
            assert_eq!(ArgValue::from(Some("x")), ArgValue::Str("x".into()));
        }

        #[test]
        fn accessors_match_variant_only() {
            assert_eq!(ArgValue::Int(1).as_float(), None);
            assert_eq!(ArgValue::Float(1.0).as_int(), None);
            assert_eq!(ArgValue::Bool(true).as_bool(), Some(true));
            assert_eq!(ArgValue::from("hi").as_str(), Some("hi"));
            assert!(ArgValue::default().is_none());
        }
    }

    #[test]
    fn display_reads_like_a_literal() {
        assert_eq!(ArgValue::tuple([1]).to_string(), "(1,)");
        assert_eq!(ArgValue::tuple([1, 2]).to_string(), "(1, 2)");
        assert_eq!(ArgValue::list(["a"]).to_string(), "[\"a\"]");
        assert_eq!(ArgValue::map([("k", 2.0)]).to_string(), "{\"k\": 2.0}");
        assert_eq!(ArgValue::None.to_string(), "None");
    }
}
