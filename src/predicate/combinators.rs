//! Logical combinators
//!
//! Free-function forms of the junctions and quantifiers on [`Node`], for
//! building trees in prefix style.

use crate::node::Node;

/// All of `children` must hold, checked left to right.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// let p = and([is_not_null(), gt(0), lt(100)]);
/// assert!(p.test(&Value::from(50)).unwrap());
/// assert!(!p.test(&Value::from(100)).unwrap());
/// ```
pub fn and(children: impl IntoIterator<Item = Node>) -> Node {
    Node::conjunction(children)
}

/// At least one of `children` must hold, checked left to right.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// let p = or([lt(0), gt(100)]);
/// assert!(p.test(&Value::from(-5)).unwrap());
/// assert!(!p.test(&Value::from(50)).unwrap());
/// ```
pub fn or(children: impl IntoIterator<Item = Node>) -> Node {
    Node::disjunction(children)
}

/// Invert `child`.
pub fn not(child: Node) -> Node {
    Node::negation(child)
}

/// Alias of [`and`] for lists of checks.
pub fn all_of(children: impl IntoIterator<Item = Node>) -> Node {
    and(children)
}

/// Alias of [`or`] for lists of checks.
pub fn any_of(children: impl IntoIterator<Item = Node>) -> Node {
    or(children)
}

/// None of `children` may hold.
///
/// Equivalent to `not(or(children))`.
pub fn none_of(children: impl IntoIterator<Item = Node>) -> Node {
    not(or(children))
}

/// Every element of the subject satisfies `element`.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::*;
/// use plumbline::value::Value;
///
/// let p = all_match(is_not_null());
/// assert!(p.test(&Value::from(vec!["a", "b"])).unwrap());
/// assert!(!p.test(&Value::from(vec![Some("a"), None])).unwrap());
/// ```
pub fn all_match(element: Node) -> Node {
    Node::all_match(element)
}

/// Some element of the subject satisfies `element`.
pub fn any_match(element: Node) -> Node {
    Node::any_match(element)
}

/// No element of the subject satisfies `element`.
pub fn none_match(element: Node) -> Node {
    Node::none_match(element)
}
