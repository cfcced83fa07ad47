//! Dynamic values checked by predicates
//!
//! Predicate trees are built once and applied to values whose shape is only
//! known at run time: a transform may turn a list into its size, a context
//! into one of its slots, and so on. [`Value`] is the closed set of shapes the
//! engine understands, and [`ValueKind`] names them.
//!
//! Converting a value back into a Rust type is always an explicit, fallible
//! step through [`FromValue`] or [`ValueKind::coerce`].
//!
//! # Example
//!
//! ```rust
//! use plumbline::value::{FromValue, Value, ValueKind};
//!
//! let v = Value::from(vec![1, 2, 3]);
//! assert_eq!(v.kind(), ValueKind::List);
//! assert_eq!(v.to_string(), "[1,2,3]");
//!
//! let n = i64::from_value(&Value::from(7)).unwrap();
//! assert_eq!(n, 7);
//! assert!(String::from_value(&Value::from(7)).is_err());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::curry::Context;
use crate::error::CoercionError;

/// A value under test.
#[derive(Clone, Debug)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// A bundle of bound values, see [`Context`].
    Context(Context),
}

/// The type of a [`Value`], used for instance checks and coercion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Float`]
    Float,
    /// [`Value::Str`]
    Str,
    /// [`Value::List`]
    List,
    /// [`Value::Context`]
    Context,
    /// Any value at all.
    Any,
}

impl ValueKind {
    /// Whether `value` can be bound to a slot of this kind.
    ///
    /// `Any` accepts everything and `Float` also accepts integers.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ValueKind::Any => true,
            ValueKind::Float => matches!(value, Value::Float(_) | Value::Int(_)),
            kind => value.kind() == kind,
        }
    }

    /// Coerce `value` into this kind.
    ///
    /// Integers are widened when a float is expected. Everything else must
    /// already be of the right kind.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plumbline::value::{Value, ValueKind};
    ///
    /// assert_eq!(ValueKind::Float.coerce(Value::Int(2)).unwrap(), Value::Float(2.0));
    /// assert!(ValueKind::Str.coerce(Value::Int(2)).is_err());
    /// ```
    pub fn coerce(self, value: Value) -> Result<Value, CoercionError> {
        match (self, value) {
            (ValueKind::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
            (kind, value) if kind.accepts(&value) => Ok(value),
            (kind, value) => Err(CoercionError::new(kind, &value)),
        }
    }

    /// The lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::List => "list",
            ValueKind::Context => "context",
            ValueKind::Any => "any",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// The kind of this value. Never returns [`ValueKind::Any`].
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Context(_) => ValueKind::Context,
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The number as a float, if this is an `Int` or a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The string slice, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The context, if this is a `Context`.
    pub fn as_context(&self) -> Option<&Context> {
        match self {
            Value::Context(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// The elements of a sequence-like value.
    ///
    /// Lists yield their items and contexts their bound values. Anything else
    /// is a coercion error.
    pub fn elements(&self) -> Result<&[Value], CoercionError> {
        match self {
            Value::List(items) => Ok(items),
            Value::Context(ctx) => Ok(ctx.values()),
            other => Err(CoercionError::new(ValueKind::List, other)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Context(a), Value::Context(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(x) => x.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::List(items) => items.hash(state),
            Value::Context(ctx) => ctx.hash(state),
        }
    }
}

pub(crate) fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => write_seq(f, items),
            Value::Context(ctx) => write!(f, "{}", ctx),
        }
    }
}

/// Conversion from a [`Value`] into a Rust type.
pub trait FromValue: Sized {
    /// The slot kind this type binds to.
    const KIND: ValueKind;

    /// Convert, failing with a [`CoercionError`] on a type mismatch.
    fn from_value(value: &Value) -> Result<Self, CoercionError>;
}

impl FromValue for Value {
    const KIND: ValueKind = ValueKind::Any;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value
            .as_bool()
            .ok_or_else(|| CoercionError::new(Self::KIND, value))
    }
}

impl FromValue for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value
            .as_i64()
            .ok_or_else(|| CoercionError::new(Self::KIND, value))
    }
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value
            .as_f64()
            .ok_or_else(|| CoercionError::new(Self::KIND, value))
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| CoercionError::new(Self::KIND, value))
    }
}

impl FromValue for Vec<Value> {
    const KIND: ValueKind = ValueKind::List;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value
            .as_list()
            .map(<[Value]>::to_vec)
            .ok_or_else(|| CoercionError::new(Self::KIND, value))
    }
}

impl FromValue for Context {
    const KIND: ValueKind = ValueKind::Context;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        value
            .as_context()
            .cloned()
            .ok_or_else(|| CoercionError::new(Self::KIND, value))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Context> for Value {
    fn from(ctx: Context) -> Self {
        Value::Context(ctx)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::SerializeSeq;
    use serde::{Serialize, Serializer};

    use super::Value;
    use crate::curry::Context;

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Bool(b) => serializer.serialize_bool(*b),
                Value::Int(i) => serializer.serialize_i64(*i),
                Value::Float(x) => serializer.serialize_f64(*x),
                Value::Str(s) => serializer.serialize_str(s),
                Value::List(items) => serialize_seq(items, serializer),
                Value::Context(ctx) => ctx.serialize(serializer),
            }
        }
    }

    impl Serialize for Context {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize_seq(self.values(), serializer)
        }
    }

    fn serialize_seq<S: Serializer>(items: &[Value], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }

}
