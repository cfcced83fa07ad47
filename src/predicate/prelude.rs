//! Predicate prelude for convenient imports
//!
//! This module re-exports the most commonly used predicates and transforms.
//!
//! # Example
//!
//! ```rust
//! use plumbline::predicate::prelude::*;
//!
//! let one_string = size().check(is_equal_to(1));
//! assert!(one_string.test(&Value::from(vec!["a"])).unwrap());
//! ```

// Tree type
pub use crate::node::Node;
pub use crate::value::{Value, ValueKind};

// Logical combinators
pub use super::combinators::{all_match, and, any_match, none_match, not, or};

// Object predicates
pub use super::object::{is_equal_to, is_instance_of, is_not_null, is_null, is_true};

// String predicates
pub use super::string::{ends_with, matches_regex, starts_with};

// Number predicates
pub use super::number::{between, ge, gt, le, lt};

// Collection predicates
pub use super::collection::{has_len, is_empty, is_not_empty};

// Transforms
pub use crate::function::{element_at, length, size};
