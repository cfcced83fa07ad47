//! Number predicates
//!
//! Integers compare exactly; any comparison involving a float is done in
//! `f64`. A comparison with NaN is false. Non-numeric subjects fault with a
//! coercion error.

use std::cmp::Ordering;

use crate::error::{CoercionError, Fault};
use crate::node::Node;
use crate::value::{Value, ValueKind};

fn numeric_order(value: &Value, bound: &Value) -> Result<Option<Ordering>, Fault> {
    if let (Value::Int(a), Value::Int(b)) = (value, bound) {
        return Ok(Some(a.cmp(b)));
    }
    let a = value
        .as_f64()
        .ok_or_else(|| CoercionError::new(ValueKind::Float, value))?;
    let b = bound
        .as_f64()
        .ok_or_else(|| CoercionError::new(ValueKind::Float, bound))?;
    Ok(a.partial_cmp(&b))
}

fn compare(label: &'static str, bound: Value, accept: fn(Ordering) -> bool) -> Node {
    let expected = bound.clone();
    Node::try_parameterized(label, vec![bound], move |value: &Value| {
        Ok(numeric_order(value, &expected)?.is_some_and(accept))
    })
}

/// Create a predicate that checks for numeric equality.
///
/// Unlike [`is_equal_to`](super::is_equal_to), `1` and `1.0` are equal here.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// assert!(eq(5).test(&Value::from(5.0)).unwrap());
/// assert!(!eq(5).test(&Value::from(4)).unwrap());
/// ```
pub fn eq(bound: impl Into<Value>) -> Node {
    compare("numberEqualTo", bound.into(), Ordering::is_eq)
}

/// Create a predicate that checks if value is greater than threshold.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// assert!(gt(5).test(&Value::from(6)).unwrap());
/// assert!(!gt(5).test(&Value::from(5)).unwrap());
/// assert_eq!(gt(0).name(), "greaterThan[0]");
/// ```
pub fn gt(bound: impl Into<Value>) -> Node {
    compare("greaterThan", bound.into(), Ordering::is_gt)
}

/// Create a predicate that checks if value is greater than or equal to threshold.
pub fn ge(bound: impl Into<Value>) -> Node {
    compare("greaterThanOrEqualTo", bound.into(), Ordering::is_ge)
}

/// Create a predicate that checks if value is less than threshold.
pub fn lt(bound: impl Into<Value>) -> Node {
    compare("lessThan", bound.into(), Ordering::is_lt)
}

/// Create a predicate that checks if value is less than or equal to threshold.
pub fn le(bound: impl Into<Value>) -> Node {
    compare("lessThanOrEqualTo", bound.into(), Ordering::is_le)
}

/// Create a predicate that checks if value is within `[min, max]` inclusive.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// let p = between(1, 10);
/// assert!(p.test(&Value::from(1)).unwrap());
/// assert!(p.test(&Value::from(10)).unwrap());
/// assert!(!p.test(&Value::from(11)).unwrap());
/// assert_eq!(p.name(), "isBetween[1,10]");
/// ```
pub fn between(min: impl Into<Value>, max: impl Into<Value>) -> Node {
    let (min, max) = (min.into(), max.into());
    let bounds = vec![min.clone(), max.clone()];
    Node::try_parameterized("isBetween", bounds, move |value: &Value| {
        let above = numeric_order(value, &min)?.is_some_and(Ordering::is_ge);
        let below = numeric_order(value, &max)?.is_some_and(Ordering::is_le);
        Ok(above && below)
    })
}

/// Create a predicate that checks if value is strictly positive.
pub fn positive() -> Node {
    Node::try_leaf("isPositive", |value: &Value| {
        Ok::<_, Fault>(numeric_order(value, &Value::Int(0))?.is_some_and(Ordering::is_gt))
    })
}

/// Create a predicate that checks if value is strictly negative.
pub fn negative() -> Node {
    Node::try_leaf("isNegative", |value: &Value| {
        Ok::<_, Fault>(numeric_order(value, &Value::Int(0))?.is_some_and(Ordering::is_lt))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_mixed_numbers() {
        assert!(eq(5).test(&Value::from(5)).unwrap());
        assert!(eq(2.5).test(&Value::from(2.5)).unwrap());
        assert!(!eq(5).test(&Value::from(6)).unwrap());
    }

    #[test]
    fn test_ordering() {
        assert!(ge(5).test(&Value::from(5)).unwrap());
        assert!(!ge(5).test(&Value::from(4)).unwrap());
        assert!(lt(5).test(&Value::from(4.5)).unwrap());
        assert!(le(5).test(&Value::from(5)).unwrap());
        assert!(!le(5).test(&Value::from(6)).unwrap());
    }

    #[test]
    fn test_nan_is_never_ordered() {
        assert!(!gt(0).test(&Value::from(f64::NAN)).unwrap());
        assert!(!lt(0).test(&Value::from(f64::NAN)).unwrap());
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let big = i64::MAX;
        assert!(gt(big - 1).test(&Value::from(big)).unwrap());
    }

    #[test]
    fn test_non_numeric_faults() {
        let fault = gt(0).test(&Value::from("1")).unwrap_err();
        assert_eq!(fault.kind(), "coercion");
    }

    #[test]
    fn test_sign_predicates() {
        assert!(positive().test(&Value::from(1)).unwrap());
        assert!(!positive().test(&Value::from(0)).unwrap());
        assert!(negative().test(&Value::from(-0.5)).unwrap());
    }

    #[test]
    fn test_labels() {
        assert_eq!(le(3).name(), "lessThanOrEqualTo[3]");
        assert_eq!(positive().name(), "isPositive");
    }
}
