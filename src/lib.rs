//! # Plumbline
//!
//! > *"A plumb line does not argue; it shows where the wall leans."*
//!
//! A Rust library for composable, self-describing predicates.
//!
//! ## Philosophy
//!
//! A validation rule in **Plumbline** is a tree of small named pieces rather
//! than one opaque closure:
//! - **Nodes** know their own names and arguments, so a tree can print itself
//! - **Identity** is structural, so two trees built the same way are equal
//! - **Reports** walk the tree and show which piece failed, on which value
//!
//! ## Quick Example
//!
//! ```rust
//! use plumbline::error::Violation;
//! use plumbline::function::{element_at, size};
//! use plumbline::predicate::{is_equal_to, is_instance_of, is_not_null};
//! use plumbline::validator::validate;
//! use plumbline::value::{Value, ValueKind};
//!
//! let one_string = is_not_null()
//!     .and(size().check(is_equal_to(1)))
//!     .and(element_at(0).check(is_instance_of(ValueKind::Str)));
//!
//! // Success returns the value unchanged
//! let ok = validate(vec!["hello"], &one_string, Violation::validation);
//! assert_eq!(ok.unwrap(), Value::from(vec!["hello"]));
//!
//! // Failure carries a report of the whole tree
//! let err = validate(vec![123], &one_string, Violation::validation).unwrap_err();
//! let lines: Vec<&str> = err.message().lines().collect();
//! assert_eq!(lines[1], "and <- [123] -> false");
//! assert_eq!(lines[6], "    isInstanceOf[string] <- 123 -> false");
//! ```
//!
//! ## Parameterized checks
//!
//! Multi-argument functions are curried and fed from a [`Context`]:
//!
//! ```rust
//! use plumbline::curry::{curry2, to_context_predicate, Context};
//! use plumbline::predicate::is_true;
//! use plumbline::validator::Validator;
//!
//! let starts = curry2("startsWith", |s: String, p: String| s.starts_with(&p));
//! let node = to_context_predicate(starts, is_true(), vec![]);
//!
//! let ctx = Context::of("plumbline").append("plumb");
//! assert!(Validator::new().check(ctx, &node).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod curry;
pub mod error;
pub mod function;
pub mod identity;
pub mod node;
pub mod predicate;
pub mod report;
pub mod testing;
pub mod validator;
pub mod value;

// Re-exports
pub use curry::{Context, CurriedFunction};
pub use error::{Fault, Rejection, Violation};
pub use identity::{Identifiable, Identity, Name};
pub use node::Node;
pub use report::ReportOptions;
pub use validator::{validate, Evaluation, Validator, Verdict};
pub use value::{Value, ValueKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::curry::{apply_curried_function, curry, curry2, to_context_predicate, Context};
    pub use crate::error::{Fault, Rejection, Violation};
    pub use crate::function::{cast, element_at, function, length, size, stream};
    pub use crate::identity::Identifiable;
    pub use crate::node::Node;
    pub use crate::predicate::prelude::*;
    pub use crate::validator::{validate, Validator};
    pub use crate::value::{Value, ValueKind};
}
