//! String predicates
//!
//! This module provides common predicates for string validation. Subjects
//! that are not strings fault with a coercion error.

use regex::Regex;

use crate::error::{CoercionError, Fault};
use crate::node::Node;
use crate::value::{Value, ValueKind};

fn as_str(value: &Value) -> Result<&str, Fault> {
    value
        .as_str()
        .ok_or_else(|| CoercionError::new(ValueKind::Str, value).into())
}

fn with_text<F>(label: &'static str, text: String, test: F) -> Node
where
    F: Fn(&str, &str) -> bool + Send + Sync + 'static,
{
    let arg = Value::Str(text.clone());
    Node::try_parameterized(label, vec![arg], move |value: &Value| {
        Ok(test(as_str(value)?, &text))
    })
}

/// Create a predicate that checks if a string is empty.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// assert!(is_empty_string().test(&Value::from("")).unwrap());
/// assert!(!is_empty_string().test(&Value::from("x")).unwrap());
/// ```
pub fn is_empty_string() -> Node {
    Node::try_leaf("isEmptyString", |value: &Value| {
        Ok::<_, Fault>(as_str(value)?.is_empty())
    })
}

/// Create a predicate that checks if a value is null or an empty string.
pub fn is_null_or_empty_string() -> Node {
    Node::try_leaf("isNullOrEmptyString", |value: &Value| match value {
        Value::Null => Ok(true),
        other => Ok::<_, Fault>(as_str(other)?.is_empty()),
    })
}

/// Create a predicate that checks if a string starts with a prefix.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// let p = starts_with("hel");
/// assert!(p.test(&Value::from("hello")).unwrap());
/// assert_eq!(p.name(), r#"startsWith["hel"]"#);
/// ```
pub fn starts_with(prefix: impl Into<String>) -> Node {
    with_text("startsWith", prefix.into(), |s, p| s.starts_with(p))
}

/// Create a predicate that checks if a string ends with a suffix.
pub fn ends_with(suffix: impl Into<String>) -> Node {
    with_text("endsWith", suffix.into(), |s, p| s.ends_with(p))
}

/// Create a predicate that checks if a string contains a substring.
pub fn contains_string(needle: impl Into<String>) -> Node {
    with_text("containsString", needle.into(), |s, n| s.contains(n))
}

/// Create a predicate that checks if the whole string matches `pattern`.
///
/// The pattern is anchored at both ends. An invalid pattern is reported
/// when the predicate is built, not when it runs.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// let p = matches_regex("[a-z]+[0-9]").unwrap();
/// assert!(p.test(&Value::from("abc1")).unwrap());
/// assert!(!p.test(&Value::from("abc1x")).unwrap());
/// assert!(matches_regex("(").is_err());
/// ```
pub fn matches_regex(pattern: &str) -> Result<Node, regex::Error> {
    let regex = Regex::new(&format!("^(?:{})$", pattern))?;
    Ok(Node::try_parameterized(
        "matchesRegex",
        vec![Value::from(pattern)],
        move |value: &Value| Ok(regex.is_match(as_str(value)?)),
    ))
}

/// Create a predicate that checks if `pattern` occurs anywhere in the string.
pub fn finds_regex(pattern: &str) -> Result<Node, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(Node::try_parameterized(
        "findsRegex",
        vec![Value::from(pattern)],
        move |value: &Value| Ok(regex.is_match(as_str(value)?)),
    ))
}
