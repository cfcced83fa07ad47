//! Structural identity for self-describing objects
//!
//! A predicate tree is compared by *what it was built from*, never by where
//! it lives in memory. Each node reports an [`Identity`]: the token of the
//! constructor that created it plus the ordered list of arguments it was
//! given, nested identities included. Equality and hashing of nodes are
//! defined on that identity alone.
//!
//! # Example
//!
//! ```rust
//! use plumbline::identity::{IdArg, Identity};
//!
//! let a = Identity::new("isEqualTo", vec![IdArg::from(1)]);
//! let b = Identity::new("isEqualTo", vec![IdArg::from(1)]);
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "isEqualTo(1)");
//! ```

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::value::{Value, ValueKind};

/// The constructor token and arguments that define an object.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    creator: Cow<'static, str>,
    args: Vec<IdArg>,
}

/// One argument of an [`Identity`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdArg {
    /// A display name or other textual argument.
    Text(String),
    /// A bound value.
    Value(Value),
    /// A nested object, compared recursively.
    Nested(Identity),
}

impl Identity {
    /// Create an identity from a creator token and its ordered arguments.
    pub fn new(creator: impl Into<Cow<'static, str>>, args: Vec<IdArg>) -> Self {
        Self {
            creator: creator.into(),
            args,
        }
    }

    /// The creator token.
    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// The ordered arguments.
    pub fn args(&self) -> &[IdArg] {
        &self.args
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.creator)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for IdArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdArg::Text(s) => f.write_str(s),
            IdArg::Value(v) => write!(f, "{}", v),
            IdArg::Nested(id) => write!(f, "{}", id),
        }
    }
}

impl From<Identity> for IdArg {
    fn from(id: Identity) -> Self {
        IdArg::Nested(id)
    }
}

impl From<Value> for IdArg {
    fn from(v: Value) -> Self {
        IdArg::Value(v)
    }
}

impl From<i32> for IdArg {
    fn from(i: i32) -> Self {
        IdArg::Value(Value::from(i))
    }
}

impl From<&str> for IdArg {
    fn from(s: &str) -> Self {
        IdArg::Text(s.to_owned())
    }
}

impl From<String> for IdArg {
    fn from(s: String) -> Self {
        IdArg::Text(s)
    }
}

impl From<ValueKind> for IdArg {
    fn from(kind: ValueKind) -> Self {
        IdArg::Text(kind.as_str().to_owned())
    }
}

/// Anything that can report its structural identity.
pub trait Identifiable {
    /// The identity this object compares and hashes by.
    fn identity(&self) -> Identity;
}

impl Identifiable for Identity {
    fn identity(&self) -> Identity {
        self.clone()
    }
}

/// A display name, fixed or computed on demand.
///
/// Lazy names are only formatted when a report is actually rendered, so
/// expensive descriptions cost nothing while checks keep passing.
///
/// # Example
///
/// ```rust
/// use plumbline::identity::Name;
///
/// let fixed = Name::from("isNotNull");
/// let lazy = Name::lazy(|| format!("isEqualTo[{}]", 1 + 1));
/// assert_eq!(fixed.resolve(), "isNotNull");
/// assert_eq!(lazy.resolve(), "isEqualTo[2]");
/// ```
#[derive(Clone)]
pub enum Name {
    /// A name known up front.
    Fixed(Cow<'static, str>),
    /// A name produced by a supplier when first needed.
    Lazy(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Name {
    /// A name computed by `supplier` whenever it is displayed.
    pub fn lazy<F>(supplier: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Name::Lazy(Arc::new(supplier))
    }

    /// The fallback name for an object that was given none:
    /// `noname:` followed by the type name of `F`.
    pub fn noname<F: ?Sized>() -> Self {
        Name::Fixed(Cow::Owned(format!("noname:{}", type_name::<F>())))
    }

    /// Produce the name text.
    pub fn resolve(&self) -> Cow<'_, str> {
        match self {
            Name::Fixed(s) => Cow::Borrowed(s.as_ref()),
            Name::Lazy(supplier) => Cow::Owned(supplier()),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Fixed(s) => f.debug_tuple("Fixed").field(s).finish(),
            Name::Lazy(_) => f.debug_tuple("Lazy").field(&"<supplier>").finish(),
        }
    }
}

impl From<&'static str> for Name {
    fn from(s: &'static str) -> Self {
        Name::Fixed(Cow::Borrowed(s))
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::Fixed(Cow::Owned(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn hash_of<T: Hash>(t: &T) -> u64 {
        let mut h = DefaultHasher::new();
        t.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_equal_identities_hash_alike() {
        let a = Identity::new("and", vec![Identity::new("isNotNull", vec![]).into()]);
        let b = Identity::new("and", vec![Identity::new("isNotNull", vec![]).into()]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_argument_order_matters() {
        let a = Identity::new("between", vec![1.into(), 2.into()]);
        let b = Identity::new("between", vec![2.into(), 1.into()]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_creator_matters() {
        let a = Identity::new("gt", vec![0.into()]);
        let b = Identity::new("lt", vec![0.into()]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_nested() {
        let id = Identity::new(
            "transform",
            vec!["size".into(), Identity::new("isEqualTo", vec![1.into()]).into()],
        );
        assert_eq!(id.to_string(), "transform(size,isEqualTo(1))");
    }

    #[test]
    fn test_noname_fallback() {
        let name = Name::noname::<u8>();
        assert_eq!(name.resolve(), "noname:u8");
    }

    #[test]
    fn test_lazy_name_is_not_evaluated_until_resolved() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let name = Name::lazy(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            "expensive".to_string()
        });
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
        assert_eq!(name.to_string(), "expensive");
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }
}
