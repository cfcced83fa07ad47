//! Standard transforms
//!
//! Each function here returns a [`TransformBuilder`]: a named function that
//! still needs the node checking its output. Complete it with
//! [`TransformBuilder::check`].
//!
//! # Example
//!
//! ```rust
//! use plumbline::function::{element_at, size};
//! use plumbline::predicate::{is_equal_to, is_instance_of, is_not_null};
//! use plumbline::value::{Value, ValueKind};
//!
//! let p = is_not_null()
//!     .and(size().check(is_equal_to(1)))
//!     .and(element_at(0).check(is_instance_of(ValueKind::Str)));
//!
//! assert!(p.test(&Value::from(vec!["a"])).unwrap());
//! assert!(!p.test(&Value::from(vec![123])).unwrap());
//! assert_eq!(
//!     p.to_string(),
//!     "and(isNotNull,size->isEqualTo[1],at[0]->isInstanceOf[string])"
//! );
//! ```

use crate::error::{CoercionError, Fault};
use crate::identity::Name;
use crate::node::{Node, TransformBuilder};
use crate::value::{Value, ValueKind};

fn count(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn out_of_range(index: usize, size: usize) -> Fault {
    Fault::raised(format!("index {} out of range for size {}", index, size))
}

/// Number of elements in a list or context.
pub fn size() -> TransformBuilder {
    Node::try_transform("size", |value: &Value| -> Result<Value, Fault> {
        Ok(count(value.elements()?.len()))
    })
}

/// Number of characters in a string.
///
/// # Example
///
/// ```rust
/// use plumbline::function::length;
/// use plumbline::predicate::gt;
/// use plumbline::value::Value;
///
/// let long_enough = length().check(gt(2));
/// assert!(long_enough.test(&Value::from("abc")).unwrap());
/// assert!(!long_enough.test(&Value::from("ab")).unwrap());
/// ```
pub fn length() -> TransformBuilder {
    Node::try_transform("length", |value: &Value| -> Result<Value, Fault> {
        let s = value
            .as_str()
            .ok_or_else(|| CoercionError::new(ValueKind::Str, value))?;
        Ok(count(s.chars().count()))
    })
}

/// The element at `index` of a list or context, labelled `at[index]`.
///
/// An index past the end is a fault.
pub fn element_at(index: usize) -> TransformBuilder {
    Node::try_transform(
        format!("at[{}]", index),
        move |value: &Value| -> Result<Value, Fault> {
            let items = value.elements()?;
            items
                .get(index)
                .cloned()
                .ok_or_else(|| out_of_range(index, items.len()))
        },
    )
}

/// The value at `index` of a context, labelled `valueAt[index]`.
///
/// Unlike [`element_at`], plain lists are rejected.
pub fn value_at(index: usize) -> TransformBuilder {
    Node::try_transform(
        format!("valueAt[{}]", index),
        move |value: &Value| -> Result<Value, Fault> {
            let ctx = value
                .as_context()
                .ok_or_else(|| CoercionError::new(ValueKind::Context, value))?;
            ctx.value_at(index)
                .cloned()
                .ok_or_else(|| out_of_range(index, ctx.size()))
        },
    )
}

/// The display form of the value as a string. Strings pass through unquoted.
pub fn stringify() -> TransformBuilder {
    Node::transform("stringify", |value: &Value| match value {
        Value::Str(_) => value.clone(),
        other => Value::Str(other.to_string()),
    })
}

/// The elements of a list or context, as a list.
///
/// Pairs with the quantifiers when the subject is a context:
/// `stream().check(all_match(..))`.
pub fn stream() -> TransformBuilder {
    Node::try_transform("stream", |value: &Value| -> Result<Value, Fault> {
        Ok(Value::List(value.elements()?.to_vec()))
    })
}

/// Coerce the value to `kind`, labelled `castTo[kind]`.
///
/// # Example
///
/// ```rust
/// use plumbline::function::cast;
/// use plumbline::predicate::is_instance_of;
/// use plumbline::value::{Value, ValueKind};
///
/// let p = cast(ValueKind::Float).check(is_instance_of(ValueKind::Float));
/// assert!(p.test(&Value::from(2)).unwrap());
/// assert!(p.test(&Value::from("2")).is_err());
/// ```
pub fn cast(kind: ValueKind) -> TransformBuilder {
    Node::try_transform(
        format!("castTo[{}]", kind),
        move |value: &Value| -> Result<Value, Fault> { Ok(kind.coerce(value.clone())?) },
    )
}

/// A named, infallible transform.
///
/// Use [`Node::try_transform`] when the function can fail.
pub fn function<N, F>(name: N, func: F) -> TransformBuilder
where
    N: Into<Name>,
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    Node::transform(name, func)
}
