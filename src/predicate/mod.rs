//! Standard predicates for composable validation logic
//!
//! Every function in this module returns a [`Node`](crate::node::Node), so
//! the results can be combined with `and`, `or` and `negate`, wrapped in
//! transforms and quantifiers, and evaluated by a
//! [`Validator`](crate::validator::Validator) that explains which part
//! failed.
//!
//! # Philosophy
//!
//! Instead of writing one opaque boolean function, build the check from
//! small named pieces:
//!
//! - Each piece prints its own label, e.g. `greaterThan[0]`
//! - Trees with the same shape compare equal, whoever built them
//! - A failing tree reports the path to the piece that said no
//!
//! # Example
//!
//! ```rust
//! use plumbline::predicate::*;
//! use plumbline::value::Value;
//!
//! let valid_age = is_not_null().and(ge(0)).and(le(150));
//!
//! assert!(valid_age.test(&Value::from(25)).unwrap());
//! assert!(!valid_age.test(&Value::from(200)).unwrap());
//! assert_eq!(
//!     valid_age.to_string(),
//!     "and(isNotNull,greaterThanOrEqualTo[0],lessThanOrEqualTo[150])"
//! );
//! ```
//!
//! # Integration with the validator
//!
//! ```rust
//! use plumbline::predicate::*;
//! use plumbline::validator::Validator;
//!
//! let result = Validator::new().check("hello", &starts_with("he"));
//! assert!(result.is_ok());
//!
//! let report = Validator::new().check("world", &starts_with("he")).unwrap_err();
//! assert!(report.report().starts_with(r#"Value:"world" violated: startsWith["he"]"#));
//! ```

mod collection;
mod combinators;
mod number;
mod object;
mod string;

pub mod prelude;

// Re-export combinator helpers
pub use combinators::{all_match, all_of, and, any_match, any_of, none_match, none_of, not, or};

// Re-export object predicates
pub use object::{
    is_equal_to, is_false, is_instance_of, is_not_equal_to, is_not_null, is_null, is_true,
};

// Re-export string predicates
pub use string::{
    contains_string, ends_with, finds_regex, is_empty_string, is_null_or_empty_string,
    matches_regex, starts_with,
};

// Re-export number predicates
pub use number::{between, eq, ge, gt, le, lt, negative, positive};

// Re-export collection predicates
pub use collection::{contains_element, has_len, is_empty, is_not_empty};
