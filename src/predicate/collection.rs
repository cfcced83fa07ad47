//! Collection predicates
//!
//! This module provides common predicates for lists and contexts. Strings
//! count as collections for the emptiness checks.

use crate::error::{CoercionError, Fault};
use crate::node::Node;
use crate::value::{Value, ValueKind};

fn len_of(value: &Value) -> Result<usize, Fault> {
    match value {
        Value::Str(s) => Ok(s.chars().count()),
        other => Ok(other.elements()?.len()),
    }
}

/// Create a predicate that checks if a collection is empty.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// assert!(is_empty().test(&Value::List(vec![])).unwrap());
/// assert!(!is_empty().test(&Value::from(vec![1, 2, 3])).unwrap());
/// ```
pub fn is_empty() -> Node {
    Node::try_leaf("isEmpty", |value: &Value| Ok::<_, Fault>(len_of(value)? == 0))
}

/// Create a predicate that checks if a collection is not empty.
pub fn is_not_empty() -> Node {
    Node::try_leaf("isNotEmpty", |value: &Value| Ok::<_, Fault>(len_of(value)? > 0))
}

/// Create a predicate that checks collection length equals `expected`.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// assert!(has_len(3).test(&Value::from(vec![1, 2, 3])).unwrap());
/// assert!(!has_len(3).test(&Value::from(vec![1, 2])).unwrap());
/// ```
pub fn has_len(expected: usize) -> Node {
    let arg = Value::Int(i64::try_from(expected).unwrap_or(i64::MAX));
    Node::try_parameterized("hasSize", vec![arg], move |value: &Value| {
        Ok(len_of(value)? == expected)
    })
}

/// Create a predicate that checks if a collection contains `element`.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// assert!(contains_element(2).test(&Value::from(vec![1, 2, 3])).unwrap());
/// assert!(!contains_element(5).test(&Value::from(vec![1, 2, 3])).unwrap());
/// ```
pub fn contains_element(element: impl Into<Value>) -> Node {
    let element = element.into();
    let expected = element.clone();
    Node::try_parameterized("contains", vec![element], move |value: &Value| {
        let items = value
            .elements()
            .map_err(|_| CoercionError::new(ValueKind::List, value))?;
        Ok(items.contains(&expected))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curry::Context;

    #[test]
    fn test_empty_checks() {
        assert!(is_empty().test(&Value::from("")).unwrap());
        assert!(is_not_empty().test(&Value::from("a")).unwrap());
        assert!(is_empty().test(&Value::from(Context::empty())).unwrap());
        assert!(!is_not_empty().test(&Value::List(vec![])).unwrap());
    }

    #[test]
    fn test_scalar_faults() {
        assert!(is_empty().test(&Value::from(1)).is_err());
        assert!(contains_element(1).test(&Value::from(1)).is_err());
    }

    #[test]
    fn test_contains_in_context() {
        let ctx = Context::of("a").append("b");
        assert!(contains_element("b").test(&Value::from(ctx)).unwrap());
    }

    #[test]
    fn test_has_len_counts_chars() {
        assert!(has_len(2).test(&Value::from("né")).unwrap());
        assert_eq!(has_len(2).name(), "hasSize[2]");
    }
}
