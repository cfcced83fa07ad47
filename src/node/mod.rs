//! Self-describing combinator nodes
//!
//! A [`Node`] pairs behaviour (a test or transform closure) with a display
//! form, so that a tree of nodes can print itself, compare itself with
//! another tree by structure, and explain a failure node by node.
//!
//! Nodes are immutable once built. Closures are shared through `Arc`, so
//! cloning a tree is cheap and a tree can be evaluated from many threads at
//! once.
//!
//! # Example
//!
//! ```rust
//! use plumbline::node::Node;
//! use plumbline::value::Value;
//!
//! let positive = Node::leaf("isPositive", |v: &Value| v.as_i64().is_some_and(|i| i > 0));
//! let even = Node::leaf("isEven", |v: &Value| v.as_i64().is_some_and(|i| i % 2 == 0));
//! let p = positive.and(even);
//!
//! assert!(p.test(&Value::from(4)).unwrap());
//! assert!(!p.test(&Value::from(3)).unwrap());
//! assert_eq!(p.to_string(), "and(isPositive,isEven)");
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::Fault;
use crate::identity::{IdArg, Identifiable, Identity, Name};
use crate::value::Value;

pub(crate) type TestFn = Arc<dyn Fn(&Value) -> Result<bool, Fault> + Send + Sync>;
pub(crate) type TransformFn = Arc<dyn Fn(&Value) -> Result<Value, Fault> + Send + Sync>;

fn test_fn(f: impl Fn(&Value) -> Result<bool, Fault> + Send + Sync + 'static) -> TestFn {
    Arc::new(f)
}

fn transform_fn(f: impl Fn(&Value) -> Result<Value, Fault> + Send + Sync + 'static) -> TransformFn {
    Arc::new(f)
}

/// Run user code, turning a panic into [`Fault::Panicked`].
pub(crate) fn guarded<R>(f: impl FnOnce() -> Result<R, Fault>) -> Result<R, Fault> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(Fault::panicked(payload)),
    }
}

/// A predicate tree.
#[derive(Clone)]
pub enum Node {
    /// An atomic predicate.
    Leaf(Leaf),
    /// An atomic predicate printed with its arguments, e.g. `isEqualTo[1]`.
    Parameterized(Parameterized),
    /// Negation of the child.
    Not(Box<Node>),
    /// Conjunction, evaluated left to right, stopping at the first `false`.
    And(Vec<Node>),
    /// Disjunction, evaluated left to right, stopping at the first `true`.
    Or(Vec<Node>),
    /// Apply a function, then check its output.
    Transform(Transform),
    /// Quantify a predicate over the elements of a sequence.
    Quantifier(Quantifier),
}

/// An atomic predicate.
#[derive(Clone)]
pub struct Leaf {
    name: Name,
    test: TestFn,
}

impl Leaf {
    /// The display name.
    pub fn name(&self) -> &Name {
        &self.name
    }
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// An atomic predicate whose printed form carries extra arguments.
#[derive(Clone)]
pub struct Parameterized {
    name: Name,
    args: Vec<IdArg>,
    test: TestFn,
}

impl Parameterized {
    /// The display name, without arguments.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The display arguments.
    pub fn args(&self) -> &[IdArg] {
        &self.args
    }
}

impl fmt::Debug for Parameterized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameterized")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// A function applied to the subject, followed by a check of its output.
#[derive(Clone)]
pub struct Transform {
    name: Name,
    func: TransformFn,
    check: Box<Node>,
}

impl Transform {
    /// The name of the function.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The node checked against the function's output.
    pub fn check(&self) -> &Node {
        &self.check
    }

    /// Apply the function alone.
    pub fn apply(&self, value: &Value) -> Result<Value, Fault> {
        guarded(|| (self.func)(value))
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .field("check", &self.check)
            .finish_non_exhaustive()
    }
}

/// Which quantifier a [`Quantifier`] node applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantify {
    /// Every element matches.
    All,
    /// At least one element matches.
    Any,
    /// No element matches.
    None,
}

impl Quantify {
    /// The report label.
    pub fn label(self) -> &'static str {
        match self {
            Quantify::All => "allMatch",
            Quantify::Any => "anyMatch",
            Quantify::None => "noneMatch",
        }
    }

    /// The element verdict that ends the scan early.
    pub fn short_circuits_on(self) -> bool {
        !matches!(self, Quantify::All)
    }

    /// The overall verdict when the scan ends early.
    pub fn verdict_on_short_circuit(self) -> bool {
        matches!(self, Quantify::Any)
    }

    /// The overall verdict when every element was scanned.
    pub fn verdict_when_exhausted(self) -> bool {
        !matches!(self, Quantify::Any)
    }
}

/// A predicate quantified over the elements of the subject.
#[derive(Clone, Debug)]
pub struct Quantifier {
    kind: Quantify,
    element: Box<Node>,
}

impl Quantifier {
    /// The quantifier.
    pub fn kind(&self) -> Quantify {
        self.kind
    }

    /// The predicate applied to each element.
    pub fn element(&self) -> &Node {
        &self.element
    }
}

/// A named function waiting for the node that checks its output.
///
/// # Example
///
/// ```rust
/// use plumbline::node::Node;
/// use plumbline::predicate::is_equal_to;
/// use plumbline::value::Value;
///
/// let doubled = Node::transform("doubled", |v: &Value| {
///     Value::from(v.as_i64().unwrap_or(0) * 2)
/// })
/// .check(is_equal_to(4));
///
/// assert!(doubled.test(&Value::from(2)).unwrap());
/// assert_eq!(doubled.to_string(), "doubled->isEqualTo[4]");
/// ```
#[derive(Clone)]
pub struct TransformBuilder {
    name: Name,
    func: TransformFn,
}

impl TransformBuilder {
    pub(crate) fn from_fn(name: Name, func: TransformFn) -> Self {
        Self { name, func }
    }

    /// The name of the function.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Complete the transform with the node that checks its output.
    pub fn check(self, node: Node) -> Node {
        Node::Transform(Transform {
            name: self.name,
            func: self.func,
            check: Box::new(node),
        })
    }
}

impl fmt::Debug for TransformBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformBuilder")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Node {
    /// A leaf predicate.
    pub fn leaf<N, F>(name: N, test: F) -> Node
    where
        N: Into<Name>,
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Node::Leaf(Leaf {
            name: name.into(),
            test: test_fn(move |v| Ok(test(v))),
        })
    }

    /// A leaf predicate that may fail to produce a verdict.
    ///
    /// An `Err` returned by `test` aborts the evaluation as a [`Fault`]; it
    /// is never treated as `false`.
    pub fn try_leaf<N, F, E>(name: N, test: F) -> Node
    where
        N: Into<Name>,
        F: Fn(&Value) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Node::Leaf(Leaf {
            name: name.into(),
            test: test_fn(move |v| test(v).map_err(Fault::raised)),
        })
    }

    /// A leaf predicate with no display name.
    ///
    /// It prints as `noname:` followed by the closure's type name.
    pub fn anonymous<F>(test: F) -> Node
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Node::leaf(Name::noname::<F>(), test)
    }

    /// A leaf predicate printed as `name[args]`.
    pub fn parameterized<N, A, F>(name: N, args: Vec<A>, test: F) -> Node
    where
        N: Into<Name>,
        A: Into<IdArg>,
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Node::Parameterized(Parameterized {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            test: test_fn(move |v| Ok(test(v))),
        })
    }

    /// A parameterized predicate that may fault.
    pub fn try_parameterized<N, A, F>(name: N, args: Vec<A>, test: F) -> Node
    where
        N: Into<Name>,
        A: Into<IdArg>,
        F: Fn(&Value) -> Result<bool, Fault> + Send + Sync + 'static,
    {
        Node::Parameterized(Parameterized {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            test: test_fn(test),
        })
    }

    /// Negate `child`.
    pub fn negation(child: Node) -> Node {
        Node::Not(Box::new(child))
    }

    /// All of `children`, left to right.
    pub fn conjunction(children: impl IntoIterator<Item = Node>) -> Node {
        Node::And(children.into_iter().collect())
    }

    /// Any of `children`, left to right.
    pub fn disjunction(children: impl IntoIterator<Item = Node>) -> Node {
        Node::Or(children.into_iter().collect())
    }

    /// Start a transform: `Node::transform(name, f).check(node)`.
    pub fn transform<N, F>(name: N, func: F) -> TransformBuilder
    where
        N: Into<Name>,
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        TransformBuilder::from_fn(name.into(), transform_fn(move |v| Ok(func(v))))
    }

    /// Start a transform whose function may fail.
    pub fn try_transform<N, F, E>(name: N, func: F) -> TransformBuilder
    where
        N: Into<Name>,
        F: Fn(&Value) -> Result<Value, E> + Send + Sync + 'static,
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        TransformBuilder::from_fn(
            name.into(),
            transform_fn(move |v| func(v).map_err(Fault::raised)),
        )
    }

    /// Every element of the subject satisfies `element`.
    pub fn all_match(element: Node) -> Node {
        Node::quantify(Quantify::All, element)
    }

    /// Some element of the subject satisfies `element`.
    pub fn any_match(element: Node) -> Node {
        Node::quantify(Quantify::Any, element)
    }

    /// No element of the subject satisfies `element`.
    pub fn none_match(element: Node) -> Node {
        Node::quantify(Quantify::None, element)
    }

    fn quantify(kind: Quantify, element: Node) -> Node {
        Node::Quantifier(Quantifier {
            kind,
            element: Box::new(element),
        })
    }

    /// Conjoin with `other`, extending `self` if it already is an `And`.
    pub fn and(self, other: Node) -> Node {
        match self {
            Node::And(mut children) => {
                children.push(other);
                Node::And(children)
            }
            node => Node::And(vec![node, other]),
        }
    }

    /// Disjoin with `other`, extending `self` if it already is an `Or`.
    pub fn or(self, other: Node) -> Node {
        match self {
            Node::Or(mut children) => {
                children.push(other);
                Node::Or(children)
            }
            node => Node::Or(vec![node, other]),
        }
    }

    /// Negate this node.
    pub fn negate(self) -> Node {
        Node::negation(self)
    }

    /// The label this node prints on its report line.
    pub fn name(&self) -> String {
        match self {
            Node::Leaf(leaf) => leaf.name.resolve().into_owned(),
            Node::Parameterized(p) if p.args.is_empty() => p.name.resolve().into_owned(),
            Node::Parameterized(p) => format!("{}{}", p.name, Args(&p.args)),
            Node::Not(_) => "not".to_owned(),
            Node::And(_) => "and".to_owned(),
            Node::Or(_) => "or".to_owned(),
            Node::Transform(t) => t.name.resolve().into_owned(),
            Node::Quantifier(q) => q.kind.label().to_owned(),
        }
    }

    /// Returns true for `Leaf` and `Parameterized` nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_) | Node::Parameterized(_))
    }

    /// Direct sub-nodes in construction order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Leaf(_) | Node::Parameterized(_) => Vec::new(),
            Node::Not(child) => vec![child.as_ref()],
            Node::And(children) | Node::Or(children) => children.iter().collect(),
            Node::Transform(t) => vec![t.check.as_ref()],
            Node::Quantifier(q) => vec![q.element.as_ref()],
        }
    }

    /// Evaluate against `value`, short-circuiting junctions and quantifiers.
    ///
    /// Returns the verdict, or the first fault raised by a leaf or transform.
    pub fn test(&self, value: &Value) -> Result<bool, Fault> {
        match self {
            Node::Leaf(leaf) => guarded(|| (leaf.test)(value)),
            Node::Parameterized(p) => guarded(|| (p.test)(value)),
            Node::Not(child) => Ok(!child.test(value)?),
            Node::And(children) => {
                for child in children {
                    if !child.test(value)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Node::Or(children) => {
                for child in children {
                    if child.test(value)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Node::Transform(t) => {
                let output = t.apply(value)?;
                t.check.test(&output)
            }
            Node::Quantifier(q) => {
                for element in value.elements()? {
                    if q.element.test(element)? == q.kind.short_circuits_on() {
                        return Ok(q.kind.verdict_on_short_circuit());
                    }
                }
                Ok(q.kind.verdict_when_exhausted())
            }
        }
    }
}

struct Args<'a>(&'a [IdArg]);

impl fmt::Display for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str("]")
    }
}

impl Identifiable for Node {
    fn identity(&self) -> Identity {
        let nested = |n: &Node| IdArg::Nested(n.identity());
        match self {
            Node::Leaf(leaf) => Identity::new("leaf", vec![IdArg::Text(leaf.name.to_string())]),
            Node::Parameterized(p) => {
                let mut args = vec![IdArg::Text(p.name.to_string())];
                args.extend(p.args.iter().cloned());
                Identity::new("parameterized", args)
            }
            Node::Not(child) => Identity::new("not", vec![nested(child.as_ref())]),
            Node::And(children) => Identity::new("and", children.iter().map(nested).collect()),
            Node::Or(children) => Identity::new("or", children.iter().map(nested).collect()),
            Node::Transform(t) => Identity::new(
                "transform",
                vec![IdArg::Text(t.name.to_string()), nested(t.check.as_ref())],
            ),
            Node::Quantifier(q) => Identity::new(q.kind.label(), vec![nested(q.element.as_ref())]),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[Node]) -> fmt::Result {
    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", child)?;
    }
    f.write_str(")")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(_) | Node::Parameterized(_) => f.write_str(&self.name()),
            Node::Not(child) => write!(f, "not({})", child),
            Node::And(children) => {
                f.write_str("and")?;
                write_children(f, children)
            }
            Node::Or(children) => {
                f.write_str("or")?;
                write_children(f, children)
            }
            Node::Transform(t) => write!(f, "{}->{}", t.name, t.check),
            Node::Quantifier(q) => write!(f, "{}({})", q.kind.label(), q.element),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn is_positive() -> Node {
        Node::leaf("isPositive", |v: &Value| v.as_i64().is_some_and(|i| i > 0))
    }

    fn counting(name: &'static str, verdict: bool, calls: Arc<AtomicUsize>) -> Node {
        Node::leaf(name, move |_: &Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            verdict
        })
    }

    #[test]
    fn test_structural_equality() {
        let a = is_positive().and(is_positive().negate());
        let b = is_positive().and(is_positive().negate());
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_shape_differences_are_unequal() {
        assert_ne!(
            is_positive().and(is_positive()),
            is_positive().or(is_positive())
        );
        assert_ne!(
            Node::parameterized("isEqualTo", vec![Value::from(1)], |_: &Value| true),
            Node::parameterized("isEqualTo", vec![Value::from(2)], |_: &Value| true),
        );
    }

    #[test]
    fn test_and_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = counting("no", false, calls.clone()).and(counting("never", true, calls.clone()));
        assert!(!p.test(&Value::Null).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_or_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = counting("yes", true, calls.clone()).or(counting("never", false, calls.clone()));
        assert!(p.test(&Value::Null).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_chaining_flattens() {
        let p = is_positive().and(is_positive()).and(is_positive());
        assert_eq!(p.children().len(), 3);
        assert_eq!(p.name(), "and");
    }

    #[test]
    fn test_empty_junctions() {
        assert!(Node::conjunction(vec![]).test(&Value::Null).unwrap());
        assert!(!Node::disjunction(vec![]).test(&Value::Null).unwrap());
    }

    #[test]
    fn test_try_leaf_error_is_fault() {
        let p = Node::try_leaf("parse", |v: &Value| {
            v.as_str()
                .ok_or("not a string")
                .map(|s| s.parse::<i64>().is_ok())
        });
        assert!(p.test(&Value::from("12")).unwrap());
        let fault = p.test(&Value::from(12)).unwrap_err();
        assert_eq!(fault.to_string(), "not a string");
    }

    #[test]
    fn test_panic_becomes_fault() {
        let p = Node::leaf("explodes", |_: &Value| panic!("kaboom"));
        let fault = p.test(&Value::Null).unwrap_err();
        assert!(fault.is_panic());
        assert!(fault.to_string().contains("kaboom"));
    }

    #[test]
    fn test_transform_feeds_output() {
        let p = Node::transform("negated", |v: &Value| Value::from(-v.as_i64().unwrap_or(0)))
            .check(is_positive());
        assert!(p.test(&Value::from(-3)).unwrap());
        assert!(!p.test(&Value::from(3)).unwrap());
        assert_eq!(p.to_string(), "negated->isPositive");
    }

    #[test]
    fn test_quantifiers_on_empty_sequence() {
        let empty = Value::List(vec![]);
        assert!(Node::all_match(is_positive()).test(&empty).unwrap());
        assert!(Node::none_match(is_positive()).test(&empty).unwrap());
        assert!(!Node::any_match(is_positive()).test(&empty).unwrap());
    }

    #[test]
    fn test_quantifiers() {
        let mixed = Value::from(vec![1, -1, 2]);
        assert!(!Node::all_match(is_positive()).test(&mixed).unwrap());
        assert!(Node::any_match(is_positive()).test(&mixed).unwrap());
        assert!(!Node::none_match(is_positive()).test(&mixed).unwrap());
    }

    #[test]
    fn test_quantifier_on_scalar_faults() {
        let fault = Node::all_match(is_positive())
            .test(&Value::from(1))
            .unwrap_err();
        assert_eq!(fault.kind(), "coercion");
    }

    #[test]
    fn test_names_and_display() {
        let p = Node::parameterized("between", vec![Value::from(1), Value::from(9)], |_: &Value| {
            true
        });
        assert_eq!(p.name(), "between[1,9]");
        let q = Node::all_match(p.clone().negate());
        assert_eq!(q.name(), "allMatch");
        assert_eq!(q.to_string(), "allMatch(not(between[1,9]))");
    }

    #[test]
    fn test_anonymous_name() {
        let p = Node::anonymous(|_: &Value| true);
        assert!(p.name().starts_with("noname:"));
    }

    #[test]
    fn test_nodes_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Node>();
    }
}
