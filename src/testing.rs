//! Testing utilities for plumbline
//!
//! This module provides a parser for rendered reports, so tests can assert
//! on report shape instead of exact text, assertion macros, and
//! property-based testing support.
//!
//! # Examples
//!
//! ## Report parser
//!
//! ```rust
//! use plumbline::predicate::{gt, lt};
//! use plumbline::testing::ReportText;
//! use plumbline::validator::Validator;
//!
//! let rejection = Validator::new().check(-1, &gt(0).and(lt(10))).unwrap_err();
//! let report = ReportText::parse(rejection.report());
//!
//! let records = report.records();
//! assert_eq!(records[0].label, "and");
//! assert_eq!(records[1].depth, 1);
//! assert_eq!(records[1].result, "false");
//! assert_eq!(records[2].subject, None);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use plumbline::predicate::{gt, starts_with};
//! use plumbline::{assert_passes, assert_rejects};
//!
//! assert_passes!(5, gt(0));
//! assert_rejects!("world", starts_with("he"), r#"startsWith["he"]"#);
//! ```

const DETAIL_HEADER: &str = "Detail of failure [#";
const NOT_EVALUATED: &str = " -> (not evaluated)";

/// One node line of a report.
///
/// A line reads `<label> <- <subject> -> <result>`. Subjects and results
/// are split on the arrows that fall outside string literals, so string
/// values containing `" -> "` parse intact. Labels are taken up to the last
/// such `" <- "`; a label whose string literals are unbalanced cannot be
/// split reliably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// Nesting level; the root is at depth 0.
    pub depth: usize,
    /// The node label, e.g. `isEqualTo[1]`.
    pub label: String,
    /// The subject as printed, or `None` for a node that was not evaluated.
    pub subject: Option<String>,
    /// The result token: `true`, `false`, an output value, `(aborted)`, ...
    pub result: String,
    /// The detail block this line refers to.
    pub detail: Option<usize>,
}

/// Whether a report line refers to a detail block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// The node label.
    pub label: String,
    /// The detail block index, if any.
    pub detail: Option<usize>,
}

impl SummaryEntry {
    /// Returns true if the line refers to a detail block.
    pub fn has_detail(&self) -> bool {
        self.detail.is_some()
    }
}

/// A rendered report, split into lines.
///
/// Accepts both `\n` and `\r\n` line endings.
///
/// # Example
///
/// ```rust
/// use plumbline::testing::ReportText;
///
/// let report = ReportText::parse("Value:1 violated: isNull\r\nisNull <- 1 -> false\r\n");
/// assert_eq!(report.line_count(), 2);
/// assert_eq!(report.line_at(1), Some("isNull <- 1 -> false"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportText {
    lines: Vec<String>,
}

impl ReportText {
    /// Split `text` into lines.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    /// Total number of lines, detail blocks included.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `index`, without its line ending.
    pub fn line_at(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// The `Value:... violated: ...` line.
    pub fn header(&self) -> Option<&str> {
        self.line_at(0)
    }

    /// The node lines, in report order.
    pub fn records(&self) -> Vec<ReportLine> {
        self.lines
            .iter()
            .skip(1)
            .take_while(|line| !line.starts_with(DETAIL_HEADER))
            .filter_map(|line| parse_line(line))
            .collect()
    }

    /// One entry per node line, noting its detail index.
    pub fn summary(&self) -> Vec<SummaryEntry> {
        self.records()
            .into_iter()
            .map(|line| SummaryEntry {
                label: line.label,
                detail: line.detail,
            })
            .collect()
    }

    /// The text of detail block `index`, unindented.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plumbline::function::element_at;
    /// use plumbline::predicate::is_true;
    /// use plumbline::testing::ReportText;
    /// use plumbline::validator::Validator;
    ///
    /// let node = element_at(2).check(is_true());
    /// let rejection = Validator::new().check(vec![true], &node).unwrap_err();
    /// let report = ReportText::parse(rejection.report());
    ///
    /// assert_eq!(report.records()[0].detail, Some(1));
    /// assert_eq!(
    ///     report.detail(1).as_deref(),
    ///     Some("cause: index 2 out of range for size 1")
    /// );
    /// ```
    pub fn detail(&self, index: usize) -> Option<String> {
        let header = format!("{}{}]:", DETAIL_HEADER, index);
        let start = self.lines.iter().position(|line| *line == header)?;
        let body: Vec<&str> = self.lines[start + 1..]
            .iter()
            .take_while(|line| !line.starts_with(DETAIL_HEADER))
            .map(|line| line.strip_prefix("  ").unwrap_or(line))
            .collect();
        Some(body.join("\n"))
    }
}

fn parse_line(line: &str) -> Option<ReportLine> {
    let text = line.trim_start_matches(' ');
    let depth = (line.len() - text.len()) / 2;

    if let Some(label) = text.strip_suffix(NOT_EVALUATED) {
        return Some(ReportLine {
            depth,
            label: label.to_owned(),
            subject: None,
            result: "(not evaluated)".to_owned(),
            detail: None,
        });
    }

    let (label, rest) = text.split_at(last_unquoted(text, " <- ")?);
    let rest = &rest[" <- ".len()..];
    let (subject, result) = rest.split_at(first_unquoted(rest, " -> ")?);
    let result = &result[" -> ".len()..];
    let (result, detail) = match result.rsplit_once(" [#") {
        Some((head, tail)) => match tail.strip_suffix(']').and_then(|n| n.parse().ok()) {
            Some(n) => (head, Some(n)),
            None => (result, None),
        },
        None => (result, None),
    };
    Some(ReportLine {
        depth,
        label: label.to_owned(),
        subject: Some(subject.to_owned()),
        result: result.to_owned(),
        detail,
    })
}

/// Byte offsets of `sep` in `text` that fall outside string literals.
fn unquoted<'a>(text: &'a str, sep: &'a str) -> impl Iterator<Item = usize> + 'a {
    let bytes = text.as_bytes();
    let mut quoted = false;
    let mut escaped = false;
    (0..bytes.len()).filter(move |&i| {
        let b = bytes[i];
        if quoted {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => quoted = false,
                _ => {}
            }
            false
        } else if b == b'"' {
            quoted = true;
            false
        } else {
            bytes[i..].starts_with(sep.as_bytes())
        }
    })
}

fn first_unquoted(text: &str, sep: &str) -> Option<usize> {
    unquoted(text, sep).next()
}

fn last_unquoted(text: &str, sep: &str) -> Option<usize> {
    unquoted(text, sep).last()
}

/// Assert that a value passes a node, returning the value.
///
/// This macro will panic with the rendered report if the value is rejected.
///
/// # Example
///
/// ```rust
/// use plumbline::assert_passes;
/// use plumbline::predicate::is_not_null;
/// use plumbline::value::Value;
///
/// let value = assert_passes!("ok", is_not_null());
/// assert_eq!(value, Value::from("ok"));
/// ```
#[macro_export]
macro_rules! assert_passes {
    ($value:expr, $node:expr) => {
        match $crate::validator::Validator::new().check($value, &$node) {
            Ok(value) => value,
            Err(rejection) => {
                panic!("Expected value to pass, got report:\n{}", rejection);
            }
        }
    };
}

/// Assert that a value is rejected by a node, returning the rejection.
///
/// Extra arguments are substrings the report must contain.
///
/// # Example
///
/// ```rust
/// use plumbline::assert_rejects;
/// use plumbline::predicate::is_true;
///
/// let rejection = assert_rejects!(false, is_true(), "isTrue", "false");
/// assert!(!rejection.is_fault());
/// ```
#[macro_export]
macro_rules! assert_rejects {
    ($value:expr, $node:expr) => {
        match $crate::validator::Validator::new().check($value, &$node) {
            Err(rejection) => rejection,
            Ok(value) => {
                panic!("Expected rejection, value passed: {}", value);
            }
        }
    };
    ($value:expr, $node:expr, $($needle:expr),+ $(,)?) => {{
        let rejection = $crate::assert_rejects!($value, $node);
        $(
            assert!(
                rejection.report().contains($needle),
                "Expected report to contain {:?}, got:\n{}",
                $needle,
                rejection
            );
        )+
        rejection
    }};
}

#[cfg(feature = "proptest")]
use crate::{curry::Context, value::Value};
#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Value {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int),
            (-1.0e9..1.0e9f64).prop_map(Value::Float),
            "[a-z0-9 ]{0,12}".prop_map(Value::Str),
        ];
        leaf.prop_recursive(3, 24, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
                prop::collection::vec(inner, 0..4)
                    .prop_map(|values| Value::Context(values.into_iter().collect::<Context>())),
            ]
        })
        .boxed()
    }
}
