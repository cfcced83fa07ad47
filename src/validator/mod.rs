//! Validator and evaluation engine
//!
//! A [`Validator`] runs a [`Node`] tree against a value in one pass and, when
//! the tree does not hold, renders a report that walks from the root to the
//! node that said no.
//!
//! # Example
//!
//! ```rust
//! use plumbline::predicate::is_true;
//! use plumbline::validator::Validator;
//! use plumbline::value::Value;
//!
//! let validator = Validator::new();
//! assert_eq!(validator.check(true, &is_true()).unwrap(), Value::from(true));
//!
//! let rejection = validator.check(false, &is_true()).unwrap_err();
//! assert_eq!(
//!     rejection.report().lines().next(),
//!     Some("Value:false violated: isTrue")
//! );
//! ```
//!
//! A predicate that cannot produce a verdict is reported as a fault, not as
//! `false`:
//!
//! ```rust
//! use plumbline::predicate::is_true;
//! use plumbline::validator::{Validator, Verdict};
//! use plumbline::value::Value;
//!
//! let node = is_true();
//! let evaluation = Validator::new().evaluate(&Value::from("yes"), &node);
//! assert_eq!(evaluation.verdict(), Verdict::Faulted);
//! assert_eq!(evaluation.fault().map(|f| f.kind()), Some("coercion"));
//! ```

mod record;

pub use record::{Outcome, Record};

use crate::error::{Fault, Rejection};
use crate::node::Node;
use crate::report::{self, ReportOptions};
use crate::value::Value;

/// The terminal state of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The tree held.
    Passed,
    /// The tree did not hold.
    Failed,
    /// A node faulted before a verdict was reached.
    Faulted,
}

/// The result of evaluating one tree against one value.
#[derive(Debug, Clone)]
pub struct Evaluation<'n> {
    root: Record<'n>,
}

impl<'n> Evaluation<'n> {
    /// The record of the root node.
    pub fn root(&self) -> &Record<'n> {
        &self.root
    }

    /// The value the tree was evaluated against.
    pub fn subject(&self) -> &Value {
        self.root.subject().unwrap_or(&Value::Null)
    }

    /// The terminal state.
    pub fn verdict(&self) -> Verdict {
        match self.root.outcome().verdict() {
            Some(true) => Verdict::Passed,
            Some(false) => Verdict::Failed,
            None => Verdict::Faulted,
        }
    }

    /// Returns true if the tree held.
    pub fn passed(&self) -> bool {
        self.verdict() == Verdict::Passed
    }

    /// The first fault raised, if any.
    pub fn fault(&self) -> Option<&Fault> {
        self.root.fault()
    }

    /// Render the annotated report.
    pub fn report(&self, options: &ReportOptions) -> String {
        report::compose(self, options)
    }
}

/// Evaluates trees and renders reports.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::is_equal_to;
/// use plumbline::validator::Validator;
///
/// let long = "x".repeat(60);
/// let rejection = Validator::with_subject_width(10)
///     .check(long.as_str(), &is_equal_to("y"))
///     .unwrap_err();
/// assert!(rejection.report().contains("Detail of failure [#1]:"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ReportOptions,
}

impl Validator {
    /// A validator with default report options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator with the given report options.
    pub fn with_options(options: ReportOptions) -> Self {
        Self { options }
    }

    /// A validator abbreviating subjects longer than `width` characters.
    pub fn with_subject_width(width: usize) -> Self {
        Self::with_options(ReportOptions::default().with_subject_width(width))
    }

    /// The report options in use.
    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Evaluate `node` against `value`, recording every visited node.
    pub fn evaluate<'n>(&self, value: &Value, node: &'n Node) -> Evaluation<'n> {
        Evaluation {
            root: record::visit(node, value),
        }
    }

    /// Return `value` unchanged if `node` holds, or a [`Rejection`] carrying
    /// the report otherwise.
    ///
    /// The tree is first tested without recording anything; the annotated
    /// record and its report are only built when the test does not hold.
    pub fn check(&self, value: impl Into<Value>, node: &Node) -> Result<Value, Rejection> {
        let value = value.into();
        if let Ok(true) = node.test(&value) {
            #[cfg(feature = "tracing")]
            tracing::trace!("{} held for {}", node, value);
            return Ok(value);
        }

        let evaluation = self.evaluate(&value, node);
        let verdict = evaluation.verdict();
        if verdict == Verdict::Passed {
            return Ok(value);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("{} rejected {}: {:?}", node.name(), value, verdict);

        let report = evaluation.report(&self.options);
        Err(Rejection::new(report, evaluation.fault().cloned()))
    }

    /// Like [`check`](Self::check), mapping the report through `factory`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plumbline::error::Violation;
    /// use plumbline::predicate::gt;
    /// use plumbline::validator::Validator;
    ///
    /// let err = Validator::new()
    ///     .validate(0, &gt(0), Violation::postcondition)
    ///     .unwrap_err();
    /// assert!(err.is_postcondition());
    /// assert!(err.message().contains("greaterThan[0]"));
    /// ```
    pub fn validate<E, F>(
        &self,
        value: impl Into<Value>,
        node: &Node,
        factory: F,
    ) -> Result<Value, E>
    where
        F: FnOnce(String) -> E,
    {
        self.check(value, node)
            .map_err(|rejection| factory(rejection.into_report()))
    }
}

/// Validate with default report options.
///
/// # Example
///
/// ```rust
/// use plumbline::error::Violation;
/// use plumbline::predicate::{is_not_null, starts_with};
/// use plumbline::validator::validate;
/// use plumbline::value::Value;
///
/// let name = validate("plumb", &is_not_null().and(starts_with("pl")), Violation::validation);
/// assert_eq!(name.unwrap(), Value::from("plumb"));
/// ```
pub fn validate<E, F>(value: impl Into<Value>, node: &Node, factory: F) -> Result<Value, E>
where
    F: FnOnce(String) -> E,
{
    Validator::new().validate(value, node, factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use crate::identity::Name;
    use crate::predicate::{gt, is_not_null, is_true, lt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_check_returns_value_unchanged() {
        let value = Value::from(vec![1, 2, 3]);
        let node = is_not_null();
        assert_eq!(Validator::new().check(value.clone(), &node).unwrap(), value);
    }

    #[test]
    fn test_rejection_keeps_fault_apart_from_false() {
        let failed = Validator::new().check(false, &is_true()).unwrap_err();
        assert!(!failed.is_fault());

        let faulted = Validator::new().check("no", &is_true()).unwrap_err();
        assert!(faulted.is_fault());
        assert_eq!(faulted.fault().map(Fault::kind), Some("coercion"));
    }

    #[test]
    fn test_verdicts() {
        let node = gt(0).and(lt(10));
        let v = Validator::new();
        assert_eq!(v.evaluate(&Value::from(5), &node).verdict(), Verdict::Passed);
        assert_eq!(v.evaluate(&Value::from(50), &node).verdict(), Verdict::Failed);
        assert_eq!(v.evaluate(&Value::from("x"), &node).verdict(), Verdict::Faulted);
    }

    #[test]
    fn test_validate_maps_report_to_violation() {
        let err = validate(false, &is_true(), Violation::precondition).unwrap_err();
        assert!(err.is_precondition());
        assert!(err.message().starts_with("Value:false violated: isTrue"));
    }

    #[test]
    fn test_success_path_builds_no_record() {
        let resolved = Arc::new(AtomicUsize::new(0));
        let tested = Arc::new(AtomicUsize::new(0));
        let name = {
            let resolved = resolved.clone();
            Name::lazy(move || {
                resolved.fetch_add(1, Ordering::SeqCst);
                "isShort".to_owned()
            })
        };
        let short = {
            let tested = tested.clone();
            Node::leaf(name, move |v: &Value| {
                tested.fetch_add(1, Ordering::SeqCst);
                v.as_list().is_some_and(|items| items.len() < 4)
            })
        };
        let node = is_not_null().and(short);

        let value = Value::from(vec![1, 2, 3]);
        assert_eq!(Validator::new().check(value.clone(), &node).unwrap(), value);
        assert_eq!(resolved.load(Ordering::SeqCst), 0);
        assert_eq!(tested.load(Ordering::SeqCst), 1);

        let rejection = Validator::new().check(vec![1, 2, 3, 4], &node).unwrap_err();
        assert!(rejection.report().contains("isShort <- [1,2,3,4] -> false"));
        assert!(resolved.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_evaluation_subject() {
        let node = is_not_null();
        let evaluation = Validator::new().evaluate(&Value::from(7), &node);
        assert_eq!(evaluation.subject(), &Value::from(7));
        assert!(evaluation.passed());
    }
}
