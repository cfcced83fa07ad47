//! Immutable, ordered bundles of bound values
//!
//! A [`Context`] collects the values a multi-argument check is run against.
//! Contexts only ever grow by [`Context::append`], which returns a new
//! context and leaves the receiver untouched.
//!
//! # Example
//!
//! ```rust
//! use plumbline::curry::Context;
//! use plumbline::value::Value;
//!
//! let a = Context::of("hello");
//! let b = a.append(3);
//!
//! assert_eq!(a.size(), 1);
//! assert_eq!(b.size(), 2);
//! assert_eq!(b.value_at(1), Some(&Value::from(3)));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::value::{write_seq, Value};

/// An immutable, ordered sequence of values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Context {
    values: Arc<Vec<Value>>,
}

impl Context {
    /// An empty context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A context holding a single value.
    pub fn of(value: impl Into<Value>) -> Self {
        Self {
            values: Arc::new(vec![value.into()]),
        }
    }

    /// A new context with `value` added at the end.
    ///
    /// The receiver is not modified.
    pub fn append(&self, value: impl Into<Value>) -> Self {
        let mut values = Vec::with_capacity(self.values.len() + 1);
        values.extend(self.values.iter().cloned());
        values.push(value.into());
        Self {
            values: Arc::new(values),
        }
    }

    /// Number of bound values.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at position `index`.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// All bound values in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl From<Value> for Context {
    /// A `Value::Context` is unwrapped; any other value becomes a
    /// one-element context.
    fn from(value: Value) -> Self {
        match value {
            Value::Context(ctx) => ctx,
            other => Context::of(other),
        }
    }
}

impl<T: Into<Value>> FromIterator<T> for Context {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: Arc::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ctx")?;
        write_seq(f, &self.values)
    }
}

/// Cartesian product of `outer` contexts and `inner` values.
///
/// Each outer element is turned into a [`Context`] (see
/// `From<Value> for Context`) and every inner value is appended to it in
/// turn, outer-major.
///
/// # Example
///
/// ```rust
/// use plumbline::curry::{nest, Context};
/// use plumbline::value::Value;
///
/// let inner = [Value::from("x"), Value::from("y")];
/// let all: Vec<Context> = nest(vec![1, 2], &inner).collect();
///
/// assert_eq!(all.len(), 4);
/// assert_eq!(all[1].to_string(), r#"ctx[1,"y"]"#);
/// ```
pub fn nest<'a, O>(outer: O, inner: &'a [Value]) -> impl Iterator<Item = Context> + 'a
where
    O: IntoIterator + 'a,
    O::Item: Into<Value>,
    O::IntoIter: 'a,
{
    outer
        .into_iter()
        .map(|item| Context::from(item.into()))
        .flat_map(move |ctx| inner.iter().map(move |value| ctx.append(value.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_does_not_mutate() {
        let base = Context::of(1).append(2);
        let extended = base.append(3);
        assert_eq!(base.size(), 2);
        assert_eq!(base.value_at(1), Some(&Value::from(2)));
        assert_eq!(base.value_at(2), None);
        assert_eq!(extended.size(), 3);
    }

    #[test]
    fn test_sibling_appends_are_independent() {
        let base = Context::of("a");
        let left = base.append("l");
        let right = base.append("r");
        assert_eq!(left.value_at(1), Some(&Value::from("l")));
        assert_eq!(right.value_at(1), Some(&Value::from("r")));
    }

    #[test]
    fn test_from_value_unwraps_context() {
        let ctx = Context::of(1).append(2);
        assert_eq!(Context::from(Value::from(ctx.clone())), ctx);
        assert_eq!(Context::from(Value::from(5)).size(), 1);
    }

    #[test]
    fn test_nest_with_contexts() {
        let outer = vec![Value::from(Context::of(1).append(2))];
        let inner = [Value::from(3)];
        let result: Vec<Context> = nest(outer, &inner).collect();
        assert_eq!(result, vec![Context::of(1).append(2).append(3)]);
    }

    #[test]
    fn test_nest_empty_inner() {
        let inner: [Value; 0] = [];
        assert_eq!(nest(vec![1, 2, 3], &inner).count(), 0);
    }

    #[test]
    fn test_display() {
        let ctx: Context = vec![1, 2].into_iter().collect();
        assert_eq!(ctx.to_string(), "ctx[1,2]");
        assert!(Context::empty().is_empty());
    }
}
