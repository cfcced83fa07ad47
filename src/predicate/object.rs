//! Object predicates
//!
//! Checks that apply to any value: nullness, booleans, equality and kind.

use crate::error::{CoercionError, Fault};
use crate::node::Node;
use crate::value::{Value, ValueKind};

/// Create a predicate that checks if the value is null.
pub fn is_null() -> Node {
    Node::leaf("isNull", Value::is_null)
}

/// Create a predicate that checks if the value is not null.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// assert!(is_not_null().test(&Value::from("a")).unwrap());
/// assert!(!is_not_null().test(&Value::Null).unwrap());
/// ```
pub fn is_not_null() -> Node {
    Node::leaf("isNotNull", |value: &Value| !value.is_null())
}

fn as_bool(value: &Value) -> Result<bool, Fault> {
    value
        .as_bool()
        .ok_or_else(|| CoercionError::new(ValueKind::Bool, value).into())
}

/// Create a predicate that checks if a boolean value is `true`.
///
/// A non-boolean subject is a fault, not `false`.
pub fn is_true() -> Node {
    Node::try_leaf("isTrue", |value: &Value| as_bool(value))
}

/// Create a predicate that checks if a boolean value is `false`.
pub fn is_false() -> Node {
    Node::try_leaf("isFalse", |value: &Value| as_bool(value).map(|b| !b))
}

/// Create a predicate that checks structural equality with `expected`.
///
/// No numeric widening happens here: `1` is not equal to `1.0`. Use
/// [`eq`](super::eq) for numeric comparison.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// let p = is_equal_to(1);
/// assert!(p.test(&Value::from(1)).unwrap());
/// assert!(!p.test(&Value::from(1.0)).unwrap());
/// assert_eq!(p.name(), "isEqualTo[1]");
/// ```
pub fn is_equal_to(expected: impl Into<Value>) -> Node {
    let expected = expected.into();
    let target = expected.clone();
    Node::parameterized("isEqualTo", vec![expected], move |value: &Value| {
        *value == target
    })
}

/// Create a predicate that checks structural inequality with `unexpected`.
pub fn is_not_equal_to(unexpected: impl Into<Value>) -> Node {
    let unexpected = unexpected.into();
    let target = unexpected.clone();
    Node::parameterized("isNotEqualTo", vec![unexpected], move |value: &Value| {
        *value != target
    })
}

/// Create a predicate that checks the kind of the value.
///
/// `null` is only an instance of [`ValueKind::Null`]; [`ValueKind::Any`]
/// matches every non-null value.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::{Value, ValueKind};
///
/// let p = is_instance_of(ValueKind::Str);
/// assert!(p.test(&Value::from("x")).unwrap());
/// assert!(!p.test(&Value::from(1)).unwrap());
/// assert!(!p.test(&Value::Null).unwrap());
/// assert_eq!(p.name(), "isInstanceOf[string]");
/// ```
pub fn is_instance_of(kind: ValueKind) -> Node {
    Node::parameterized("isInstanceOf", vec![kind], move |value: &Value| {
        match (kind, value) {
            (ValueKind::Any, v) => !v.is_null(),
            (kind, v) => v.kind() == kind,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{IdArg, Identifiable};

    #[test]
    fn test_null_checks() {
        assert!(is_null().test(&Value::Null).unwrap());
        assert!(!is_null().test(&Value::from(0)).unwrap());
        assert!(is_not_null().test(&Value::from(false)).unwrap());
    }

    #[test]
    fn test_booleans() {
        assert!(is_true().test(&Value::from(true)).unwrap());
        assert!(!is_true().test(&Value::from(false)).unwrap());
        assert!(is_false().test(&Value::from(false)).unwrap());
    }

    #[test]
    fn test_non_boolean_is_fault() {
        let fault = is_true().test(&Value::from("true")).unwrap_err();
        assert_eq!(fault.kind(), "coercion");
        assert!(fault.downcast_ref::<CoercionError>().is_some());
    }

    #[test]
    fn test_equality() {
        assert!(is_equal_to("a").test(&Value::from("a")).unwrap());
        assert!(is_not_equal_to("a").test(&Value::from("b")).unwrap());
        assert!(is_equal_to(Value::Null).test(&Value::Null).unwrap());
        assert_eq!(is_equal_to("a").name(), r#"isEqualTo["a"]"#);
    }

    #[test]
    fn test_instance_of() {
        assert!(is_instance_of(ValueKind::Int).test(&Value::from(3)).unwrap());
        assert!(!is_instance_of(ValueKind::Float).test(&Value::from(3)).unwrap());
        assert!(is_instance_of(ValueKind::Null).test(&Value::Null).unwrap());
        assert!(!is_instance_of(ValueKind::Any).test(&Value::Null).unwrap());
        assert!(is_instance_of(ValueKind::Any).test(&Value::from(vec![1])).unwrap());
    }

    #[test]
    fn test_instance_of_identity_tracks_kind() {
        assert_eq!(is_instance_of(ValueKind::Str), is_instance_of(ValueKind::Str));
        assert_ne!(is_instance_of(ValueKind::Str), is_instance_of(ValueKind::Int));
    }

    #[test]
    fn test_instance_of_is_parameterized_by_kind() {
        let node = is_instance_of(ValueKind::Str);
        assert_eq!(node.name(), "isInstanceOf[string]");
        match &node {
            Node::Parameterized(p) => {
                assert_eq!(p.name().to_string(), "isInstanceOf");
                assert_eq!(p.args(), &[IdArg::Text("string".to_owned())]);
            }
            other => panic!("expected a parameterized node, got {:?}", other),
        }
        assert_eq!(node.identity().creator(), "parameterized");
    }
}
