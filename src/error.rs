//! Error types for evaluation, currying and validation.
//!
//! Three things can go wrong, and they are kept apart:
//!
//! - a predicate says "no": not an error here, it becomes a [`Rejection`]
//!   carrying the rendered report;
//! - a predicate or transform crashes: a [`Fault`];
//! - a curried function is wired wrongly: a [`CurryError`], surfaced as
//!   [`Fault::Curry`] the moment it is detected.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::value::{Value, ValueKind};

/// A value could not be coerced into the expected kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    expected: ValueKind,
    actual: ValueKind,
    rendered: String,
}

impl CoercionError {
    /// Create a coercion error for `value`, which is not of kind `expected`.
    pub fn new(expected: ValueKind, value: &Value) -> Self {
        Self {
            expected,
            actual: value.kind(),
            rendered: value.to_string(),
        }
    }

    /// The kind that was required.
    pub fn expected(&self) -> ValueKind {
        self.expected
    }

    /// The kind that was found.
    pub fn actual(&self) -> ValueKind {
        self.actual
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot coerce {} {} to {}",
            self.actual, self.rendered, self.expected
        )
    }
}

impl StdError for CoercionError {}

/// A curried function was applied to the wrong number or kind of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurryError {
    /// Fewer (or more) arguments than open slots.
    Arity {
        /// Name of the curried function.
        function: String,
        /// Number of slots that needed a value.
        expected: usize,
        /// Number of values that were available.
        actual: usize,
    },
    /// An argument order referred past the end of the context.
    IndexOutOfRange {
        /// Name of the curried function.
        function: String,
        /// The offending context index.
        index: usize,
        /// Size of the context.
        size: usize,
    },
    /// A bound value did not match the declared parameter kind.
    TypeMismatch {
        /// Name of the curried function.
        function: String,
        /// Zero-based parameter position.
        position: usize,
        /// Underlying coercion failure.
        source: CoercionError,
    },
}

impl fmt::Display for CurryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity {
                function,
                expected,
                actual,
            } => write!(
                f,
                "{} expects {} argument(s) but {} were supplied",
                function, expected, actual
            ),
            Self::IndexOutOfRange {
                function,
                index,
                size,
            } => write!(
                f,
                "{}: argument index {} is out of range for a context of size {}",
                function, index, size
            ),
            Self::TypeMismatch {
                function,
                position,
                source,
            } => write!(f, "{}: parameter {}: {}", function, position, source),
        }
    }
}

impl StdError for CurryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::TypeMismatch { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A predicate, transform or curried function failed to produce a result.
///
/// A fault is never a plain "false": it aborts the evaluation it occurs in
/// and is reported in place of a verdict.
///
/// # Example
///
/// ```rust
/// use plumbline::error::Fault;
///
/// #[derive(Debug)]
/// struct Boom;
/// impl std::fmt::Display for Boom {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("boom")
///     }
/// }
/// impl std::error::Error for Boom {}
///
/// let fault = Fault::raised(Boom);
/// assert!(fault.downcast_ref::<Boom>().is_some());
/// assert_eq!(fault.to_string(), "boom");
/// ```
#[derive(Debug, Clone)]
pub enum Fault {
    /// An error returned by user code, with its original type preserved.
    Raised(Arc<dyn StdError + Send + Sync>),
    /// A value had the wrong kind for the operation applied to it.
    Coercion(CoercionError),
    /// A curried function was applied wrongly.
    Curry(CurryError),
    /// User code panicked.
    Panicked(String),
}

impl Fault {
    /// Wrap an error returned by user code.
    ///
    /// An error that already is a `Fault` is returned as is.
    pub fn raised<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        match error.into().downcast::<Fault>() {
            Ok(fault) => *fault,
            Err(other) => Fault::Raised(Arc::from(other)),
        }
    }

    pub(crate) fn panicked(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(s) => *s,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(s) => (*s).to_owned(),
                Err(_) => "non-string panic payload".to_owned(),
            },
        };
        Fault::Panicked(message)
    }

    /// Short tag used on report lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::Raised(_) => "raised",
            Fault::Coercion(_) => "coercion",
            Fault::Curry(_) => "curry",
            Fault::Panicked(_) => "panic",
        }
    }

    /// Returns true if this fault came from a panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Fault::Panicked(_))
    }

    /// Recover the original error type, if it is `E`.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Fault::Raised(e) => e.downcast_ref::<E>(),
            Fault::Coercion(e) => (e as &(dyn StdError + 'static)).downcast_ref::<E>(),
            Fault::Curry(e) => (e as &(dyn StdError + 'static)).downcast_ref::<E>(),
            Fault::Panicked(_) => None,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Raised(e) => write!(f, "{}", e),
            Fault::Coercion(e) => write!(f, "{}", e),
            Fault::Curry(e) => write!(f, "{}", e),
            Fault::Panicked(msg) => write!(f, "panicked: {}", msg),
        }
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Fault::Raised(e) => Some(e.as_ref()),
            Fault::Coercion(e) => Some(e),
            Fault::Curry(e) => Some(e),
            Fault::Panicked(_) => None,
        }
    }
}

impl From<CoercionError> for Fault {
    fn from(e: CoercionError) -> Self {
        Fault::Coercion(e)
    }
}

impl From<CurryError> for Fault {
    fn from(e: CurryError) -> Self {
        Fault::Curry(e)
    }
}

/// A value was rejected by a validator.
///
/// `Display` prints exactly the rendered report.
#[derive(Debug, Clone)]
pub struct Rejection {
    report: String,
    fault: Option<Fault>,
}

impl Rejection {
    pub(crate) fn new(report: String, fault: Option<Fault>) -> Self {
        Self { report, fault }
    }

    /// The rendered report.
    pub fn report(&self) -> &str {
        &self.report
    }

    /// Consume and return the rendered report.
    pub fn into_report(self) -> String {
        self.report
    }

    /// The fault that aborted evaluation, if the rejection was not a plain
    /// "false".
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Returns true if evaluation was aborted by a fault.
    pub fn is_fault(&self) -> bool {
        self.fault.is_some()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report)
    }
}

impl StdError for Rejection {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.fault.as_ref().map(|f| f as &(dyn StdError + 'static))
    }
}

impl From<Rejection> for String {
    fn from(r: Rejection) -> Self {
        r.report
    }
}

/// The standard violation families a caller can raise from a report.
///
/// Each constructor has the shape `fn(String) -> Violation`, so it can be
/// passed straight to [`validate`](crate::validator::validate).
///
/// # Example
///
/// ```rust
/// use plumbline::error::Violation;
/// use plumbline::predicate::is_true;
/// use plumbline::validator::validate;
///
/// let err = validate(false, &is_true(), Violation::precondition).unwrap_err();
/// assert!(err.is_precondition());
/// assert!(err.message().contains("isTrue"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A caller supplied an invalid argument.
    Precondition(String),
    /// A function produced an invalid result.
    Postcondition(String),
    /// Any other failed check.
    Validation(String),
}

impl Violation {
    /// A precondition violation.
    pub fn precondition(report: String) -> Self {
        Violation::Precondition(report)
    }

    /// A postcondition violation.
    pub fn postcondition(report: String) -> Self {
        Violation::Postcondition(report)
    }

    /// A generic validation failure.
    pub fn validation(report: String) -> Self {
        Violation::Validation(report)
    }

    /// The report text.
    pub fn message(&self) -> &str {
        match self {
            Violation::Precondition(m) | Violation::Postcondition(m) | Violation::Validation(m) => {
                m
            }
        }
    }

    /// Returns true for [`Violation::Precondition`].
    pub fn is_precondition(&self) -> bool {
        matches!(self, Violation::Precondition(_))
    }

    /// Returns true for [`Violation::Postcondition`].
    pub fn is_postcondition(&self) -> bool {
        matches!(self, Violation::Postcondition(_))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl StdError for Violation {}
