//! Arguments of one call to a cached function.
//!
//! [`CallArgs`] holds positional arguments in order and keyword arguments in
//! the order they were given. The cache forwards it verbatim to the wrapped
//! function on a miss; [`CallKey`](crate::key::CallKey) derives the call's
//! identity from it.
//!
//! ## Example Usage
//!
//! ```
//! use callcache::CallArgs;
//!
//! // f(1, 2, scale=10)
//! let args = CallArgs::new().arg(1).arg(2).kwarg("scale", 10);
//! assert_eq!(args.positional_int(1), Some(2));
//! assert_eq!(args.keyword_int("scale"), Some(10));
//! assert_eq!(args.len(), 3);
//! ```

use std::fmt;

use crate::value::ArgValue;

/// Positional and keyword arguments for a single invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<ArgValue>,
    keyword: Vec<(String, ArgValue)>,
}

impl CallArgs {
    /// Creates an empty argument list, i.e. `f()`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an argument list of positional values only.
    pub fn positional_only<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ArgValue>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keyword: Vec::new(),
        }
    }

    /// Creates an argument list of keyword values only.
    pub fn keywords_only<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<ArgValue>,
    {
        entries
            .into_iter()
            .fold(Self::new(), |args, (name, value)| args.kwarg(name, value))
    }

    /// Appends a positional argument.
    #[inline]
    pub fn arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.push_arg(value);
        self
    }

    /// Sets a keyword argument.
    ///
    /// Setting a name that is already present replaces its value in place.
    #[inline]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.set_kwarg(name, value);
        self
    }

    pub fn push_arg(&mut self, value: impl Into<ArgValue>) {
        self.positional.push(value.into());
    }

    /// Sets a keyword argument, returning the value it replaced.
    pub fn set_kwarg(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ArgValue>,
    ) -> Option<ArgValue> {
        let name = name.into();
        let value = value.into();
        match self.keyword.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.keyword.push((name, value));
                None
            },
        }
    }

    /// Positional arguments in call order.
    #[inline]
    pub fn positional(&self) -> &[ArgValue] {
        &self.positional
    }

    /// Keyword arguments in the order they were given.
    pub fn keywords(&self) -> impl ExactSizeIterator<Item = (&str, &ArgValue)> + '_ {
        self.keyword.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ArgValue> {
        self.positional.get(index)
    }

    pub fn keyword(&self, name: &str) -> Option<&ArgValue> {
        self.keyword
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Integer positional argument at `index`, if present and an `Int`.
    #[inline]
    pub fn positional_int(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(ArgValue::as_int)
    }

    /// Integer keyword argument `name`, if present and an `Int`.
    #[inline]
    pub fn keyword_int(&self, name: &str) -> Option<i64> {
        self.keyword(name).and_then(ArgValue::as_int)
    }

    /// Looks up an argument by keyword first, then by position.
    ///
    /// Convenient for functions that accept a parameter either way, e.g.
    /// `f(1)` and `f(x=1)`.
    pub fn param(&self, name: &str, index: usize) -> Option<&ArgValue> {
        self.keyword(name).or_else(|| self.get(index))
    }

    /// Total number of arguments, positional plus keyword.
    #[inline]
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

impl fmt::Display for CallArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let mut first = true;
        for value in &self.positional {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{value}")?;
        }
        for (name, value) in &self.keyword {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

impl<T: Into<ArgValue>> FromIterator<T> for CallArgs {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::positional_only(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn new_is_empty() {
            let args = CallArgs::new();
            assert!(args.is_empty());
            assert_eq!(args.len(), 0);
            assert_eq!(args.to_string(), "()");
        }

        #[test]
        fn builder_keeps_positional_order() {
            let args = CallArgs::new().arg(3).arg("x").arg(true);
            assert_eq!(
                args.positional(),
                &[ArgValue::Int(3), ArgValue::from("x"), ArgValue::Bool(true)]
            );
        }

        #[test]
        fn collect_builds_positional_args() {
            let args: CallArgs = (1..=3).collect();
            assert_eq!(args.positional().len(), 3);
            assert_eq!(args.keywords().len(), 0);
        }

        #[test]
        fn keywords_only_builds_named_args() {
            let args = CallArgs::keywords_only([("x", 1), ("y", 2)]);
            assert!(args.positional().is_empty());
            assert_eq!(args.keyword_int("y"), Some(2));
        }
    }

    mod keywords {
        use super::*;

        #[test]
        fn duplicate_keyword_replaces_value() {
            let mut args = CallArgs::new().kwarg("x", 1);
            let old = args.set_kwarg("x", 2);

            assert_eq!(old, Some(ArgValue::Int(1)));
            assert_eq!(args.keyword_int("x"), Some(2));
            assert_eq!(args.keywords().len(), 1);
        }

        #[test]
        fn keywords_preserve_given_order() {
            let args = CallArgs::new().kwarg("y", 2).kwarg("x", 1);
            let names: Vec<_> = args.keywords().map(|(n, _)| n).collect();
            assert_eq!(names, vec!["y", "x"]);
        }

        #[test]
        fn param_prefers_keyword_then_position() {
            let by_pos = CallArgs::new().arg(5);
            let by_name = CallArgs::new().kwarg("n", 6);
            assert_eq!(by_pos.param("n", 0), Some(&ArgValue::Int(5)));
            assert_eq!(by_name.param("n", 0), Some(&ArgValue::Int(6)));
            assert_eq!(CallArgs::new().param("n", 0), None);
        }
    }

    #[test]
    fn display_lists_positional_then_keyword() {
        let args = CallArgs::new().arg(1).kwarg("y", "two");
        assert_eq!(args.to_string(), "(1, y=\"two\")");
    }

    #[test]
    fn typed_accessors_reject_other_kinds() {
        let args = CallArgs::new().arg("not an int");
        assert_eq!(args.positional_int(0), None);
        assert_eq!(args.positional_int(9), None);
    }
}
