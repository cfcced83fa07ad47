//! Curried functions and contexts
//!
//! A [`CurriedFunction`] wraps an n-ary operation as a chain of one-argument
//! applications. Each slot declares the [`ValueKind`] it accepts, so wrong
//! wiring is caught when an argument is bound, long before the body runs.
//!
//! Curried functions are fed from a [`Context`]: an ordered bundle of values,
//! typically produced by [`nest`] when enumerating parameter combinations for
//! a property check. [`to_context_predicate`] turns the pair into an ordinary
//! [`Node`], so multi-argument checks compose with everything else.
//!
//! # Example
//!
//! ```rust
//! use plumbline::curry::{curry2, Applied, Context};
//! use plumbline::value::Value;
//!
//! let concat = curry2("concat", |a: String, b: String| a + &b);
//!
//! let partial = match concat.apply_next("foo").unwrap() {
//!     Applied::Partial(f) => f,
//!     Applied::Done(_) => unreachable!(),
//! };
//! assert_eq!(partial.remaining(), 1);
//!
//! let ctx = Context::of("bar").append("foo");
//! let out = concat.apply_context(&ctx, &[1, 0]).unwrap();
//! assert_eq!(out, Value::from("foobar"));
//! ```

mod context;

pub use context::{nest, Context};

use std::fmt;
use std::sync::Arc;

use crate::error::{CurryError, Fault};
use crate::identity::Name;
use crate::node::{guarded, Node};
use crate::value::{FromValue, Value, ValueKind};

type Body = Arc<dyn Fn(&[Value]) -> Result<Value, Fault> + Send + Sync>;

/// An n-ary function applied one argument at a time.
#[derive(Clone)]
pub struct CurriedFunction {
    name: Name,
    params: Arc<[ValueKind]>,
    bound: Vec<Value>,
    body: Body,
}

/// The result of binding one more argument.
#[derive(Debug, Clone)]
pub enum Applied {
    /// Slots remain open.
    Partial(CurriedFunction),
    /// The last slot was filled and the body ran.
    Done(Value),
}

impl Applied {
    /// The final value, if the function is complete.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Applied::Done(v) => Some(v),
            Applied::Partial(_) => None,
        }
    }
}

impl CurriedFunction {
    /// The function name.
    pub fn name(&self) -> String {
        self.name.to_string()
    }

    /// Total number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Number of parameters still open.
    pub fn remaining(&self) -> usize {
        self.params.len() - self.bound.len()
    }

    /// Declared kind of parameter `position`.
    pub fn parameter_kind(&self, position: usize) -> Option<ValueKind> {
        self.params.get(position).copied()
    }

    /// Bind the next open parameter.
    ///
    /// The value is coerced to the declared kind of its slot. When the last
    /// slot is filled the body runs and its result is returned.
    pub fn apply_next(&self, value: impl Into<Value>) -> Result<Applied, Fault> {
        let position = self.bound.len();
        let kind = self.params.get(position).copied().ok_or_else(|| CurryError::Arity {
            function: self.name(),
            expected: self.arity(),
            actual: position + 1,
        })?;
        let value = kind
            .coerce(value.into())
            .map_err(|source| CurryError::TypeMismatch {
                function: self.name(),
                position,
                source,
            })?;

        let mut next = self.clone();
        next.bound.push(value);
        if next.remaining() == 0 {
            next.invoke().map(Applied::Done)
        } else {
            Ok(Applied::Partial(next))
        }
    }

    /// Fill every open slot from `ctx` and return the result.
    ///
    /// Slot `i` receives `ctx.value_at(order[i])`. An empty `order` fills the
    /// slots positionally. Arity and index checks all happen before any slot
    /// is bound.
    pub fn apply_context(&self, ctx: &Context, order: &[usize]) -> Result<Value, Fault> {
        let needed = self.remaining();
        let indices: Vec<usize> = if order.is_empty() {
            if ctx.size() < needed {
                return Err(self.arity_error(needed, ctx.size()));
            }
            (0..needed).collect()
        } else {
            if order.len() != needed {
                return Err(self.arity_error(needed, order.len()));
            }
            order.to_vec()
        };
        if let Some(&index) = indices.iter().find(|&&i| i >= ctx.size()) {
            return Err(CurryError::IndexOutOfRange {
                function: self.name(),
                index,
                size: ctx.size(),
            }
            .into());
        }

        let mut current = self.clone();
        for index in indices {
            let value = ctx.values()[index].clone();
            match current.apply_next(value)? {
                Applied::Partial(next) => current = next,
                Applied::Done(result) => return Ok(result),
            }
        }
        current.invoke()
    }

    fn arity_error(&self, expected: usize, actual: usize) -> Fault {
        CurryError::Arity {
            function: self.name(),
            expected,
            actual,
        }
        .into()
    }

    fn invoke(&self) -> Result<Value, Fault> {
        guarded(|| (self.body)(&self.bound))
    }
}

impl fmt::Debug for CurriedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurriedFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CurriedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, kind) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match self.bound.get(i) {
                Some(v) => write!(f, "{}", v)?,
                None => write!(f, "{}", kind)?,
            }
        }
        f.write_str(")")
    }
}

/// Bind `body` as a curried function with the given parameter kinds.
///
/// The body receives the bound arguments in parameter order.
pub fn curry<N, F>(name: N, params: impl Into<Vec<ValueKind>>, body: F) -> CurriedFunction
where
    N: Into<Name>,
    F: Fn(&[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
{
    let params: Vec<ValueKind> = params.into();
    CurriedFunction {
        name: name.into(),
        params: params.into(),
        bound: Vec::new(),
        body: Arc::new(body),
    }
}

/// Bind a typed two-argument closure, deriving parameter kinds from
/// [`FromValue`].
pub fn curry2<N, A, B, R, F>(name: N, f: F) -> CurriedFunction
where
    N: Into<Name>,
    A: FromValue,
    B: FromValue,
    R: Into<Value>,
    F: Fn(A, B) -> R + Send + Sync + 'static,
{
    curry(name, vec![A::KIND, B::KIND], move |args: &[Value]| {
        let a = A::from_value(&args[0])?;
        let b = B::from_value(&args[1])?;
        Ok(f(a, b).into())
    })
}

/// A reusable application of `func` to contexts, with a fixed argument order.
pub fn apply_curried_function(
    func: &CurriedFunction,
    order: &[usize],
) -> impl Fn(&Context) -> Result<Value, Fault> {
    let func = func.clone();
    let order = order.to_vec();
    move |ctx: &Context| func.apply_context(ctx, &order)
}

/// A predicate over contexts: apply `func` and check the result with `check`.
///
/// The node is parameterized by `order` and prints as
/// `<function>-><check>[order...]`. Subjects that are not contexts become
/// one-element contexts.
///
/// # Example
///
/// ```rust
/// use plumbline::curry::{curry2, to_context_predicate, Context};
/// use plumbline::predicate::is_true;
/// use plumbline::value::Value;
///
/// let starts_with = curry2("startsWith", |s: String, p: String| s.starts_with(&p));
/// let node = to_context_predicate(starts_with, is_true(), vec![0, 1]);
///
/// let ctx = Context::of("hello").append("he");
/// assert!(node.test(&Value::from(ctx)).unwrap());
/// assert_eq!(node.name(), "startsWith->isTrue[0,1]");
/// ```
pub fn to_context_predicate(func: CurriedFunction, check: Node, order: Vec<usize>) -> Node {
    let name = format!("{}->{}", func.name(), check);
    let args: Vec<Value> = order
        .iter()
        .map(|&i| Value::Int(i64::try_from(i).unwrap_or(i64::MAX)))
        .collect();
    Node::try_parameterized(name, args, move |value: &Value| {
        let ctx = Context::from(value.clone());
        let result = func.apply_context(&ctx, &order)?;
        check.test(&result)
    })
}
