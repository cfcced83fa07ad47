//! Report composer
//!
//! Renders an [`Evaluation`] as plain text: a header naming the value and
//! the tree, one line per visited node in depth-first pre-order, and
//! numbered detail blocks for anything too long to fit on its line.
//!
//! ```text
//! Value:[123] violated: and(isNotNull,size->isEqualTo[1],at[0]->isInstanceOf[string])
//! and <- [123] -> false
//!   isNotNull <- [123] -> true
//!   size <- [123] -> 1
//!     isEqualTo[1] <- 1 -> true
//!   at[0] <- [123] -> 123
//!     isInstanceOf[string] <- 123 -> false
//! ```
//!
//! Each level indents by two spaces. A node skipped by a short-circuit
//! prints `<label> -> (not evaluated)`. Transforms print their output as
//! the result, quantifiers append the index of the deciding (or faulting)
//! element as `(at [i])`, and a fault prints `fault: <kind>` with its
//! description in a detail block; the fault's ancestors print `(aborted)`.
//! Abbreviated subjects never leave a string literal open.

use crate::node::Node;
use crate::validator::{Evaluation, Outcome, Record};
use crate::value::Value;

/// Subject width used when none is configured.
pub const DEFAULT_SUBJECT_WIDTH: usize = 40;

/// Options controlling report layout.
///
/// # Example
///
/// ```rust
/// use plumbline::report::ReportOptions;
///
/// let options = ReportOptions::default().with_subject_width(16);
/// assert_eq!(options.subject_width(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportOptions {
    subject_width: usize,
}

impl ReportOptions {
    /// Abbreviate subjects and outputs longer than `width` characters.
    pub fn with_subject_width(mut self, width: usize) -> Self {
        self.subject_width = width;
        self
    }

    /// The configured subject width.
    pub fn subject_width(&self) -> usize {
        self.subject_width
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            subject_width: DEFAULT_SUBJECT_WIDTH,
        }
    }
}

/// Render `evaluation` as report text.
///
/// # Example
///
/// ```rust
/// use plumbline::predicate::{all_match, is_not_null};
/// use plumbline::report::{compose, ReportOptions};
/// use plumbline::validator::Validator;
/// use plumbline::value::Value;
///
/// let node = all_match(is_not_null());
/// let value = Value::from(vec![Some("hello"), Some("world"), None]);
/// let evaluation = Validator::new().evaluate(&value, &node);
/// let report = compose(&evaluation, &ReportOptions::default());
///
/// let lines: Vec<&str> = report.lines().collect();
/// assert_eq!(lines[1], r#"allMatch <- ["hello","world",null] -> false (at [2])"#);
/// assert_eq!(lines[2], "  isNotNull <- null -> false");
/// ```
pub fn compose(evaluation: &Evaluation<'_>, options: &ReportOptions) -> String {
    let mut composer = Composer {
        width: options.subject_width(),
        lines: Vec::new(),
        details: Vec::new(),
    };
    let root = evaluation.root();
    composer.lines.push(format!(
        "Value:{} violated: {}",
        composer.abbreviate(&evaluation.subject().to_string()),
        root.node()
    ));
    composer.record(root, 0);

    let Composer {
        mut lines, details, ..
    } = composer;
    for (i, detail) in details.iter().enumerate() {
        lines.push(format!("Detail of failure [#{}]:", i + 1));
        lines.extend(detail.lines().map(|line| format!("  {}", line)));
    }
    lines.join("\n")
}

struct Composer {
    width: usize,
    lines: Vec<String>,
    details: Vec<String>,
}

/// Parts of one report line that may overflow into a detail block.
#[derive(Default)]
struct Overflow {
    parts: Vec<String>,
}

impl Overflow {
    fn push(&mut self, heading: &str, text: &str) {
        self.parts.push(format!("{}: {}", heading, text));
    }
}

impl Composer {
    /// Cut `text` to the subject width, closing any string literal left
    /// open so the `" -> "` separator never lands inside quotes.
    fn abbreviate(&self, text: &str) -> String {
        let first = text.lines().next().unwrap_or("");
        if first.len() == text.len() && text.chars().count() <= self.width {
            return text.to_owned();
        }
        let mut head: String = first.chars().take(self.width).collect();
        match open_quote(&head) {
            Quote::Closed => {}
            Quote::Open => head.push('"'),
            Quote::Escaping => {
                head.pop();
                head.push('"');
            }
        }
        format!("{}...", head)
    }

    /// Render `value`, noting the full text in `overflow` when abbreviated.
    fn value(&self, value: &Value, heading: &str, overflow: &mut Overflow) -> String {
        let full = value.to_string();
        let shown = self.abbreviate(&full);
        if shown != full {
            overflow.push(heading, &full);
        }
        shown
    }

    fn detail_ref(&mut self, overflow: Overflow) -> String {
        if overflow.parts.is_empty() {
            return String::new();
        }
        self.details.push(overflow.parts.join("\n"));
        format!(" [#{}]", self.details.len())
    }

    fn record(&mut self, record: &Record<'_>, depth: usize) {
        let indent = "  ".repeat(depth);

        // A negated leaf prints as a single line.
        let negated = match record.node() {
            Node::Not(inner) if inner.is_leaf() => Some(inner.as_ref()),
            _ => None,
        };
        let label = match negated {
            Some(inner) => format!("not:{}", inner.name()),
            None => record.node().name(),
        };
        let (shown, children): (&Record<'_>, &[Record<'_>]) = match (negated, record.children()) {
            (Some(_), [child]) if matches!(child.outcome(), Outcome::Faulted(_)) => (child, &[]),
            (Some(_), _) => (record, &[]),
            (None, children) => (record, children),
        };

        let subject = match shown.subject() {
            Some(subject) => subject,
            None => {
                self.lines
                    .push(format!("{}{} -> (not evaluated)", indent, label));
                return;
            }
        };

        let mut overflow = Overflow::default();
        let subject = self.value(subject, "value", &mut overflow);
        let result = match shown.outcome() {
            Outcome::Faulted(fault) => {
                overflow.push("cause", &fault.to_string());
                format!("fault: {}", fault.kind())
            }
            Outcome::Aborted => "(aborted)".to_owned(),
            Outcome::NotEvaluated => "(not evaluated)".to_owned(),
            outcome => match shown.output() {
                Some(output) => self.value(output, "output", &mut overflow),
                None => verdict(outcome).to_owned(),
            },
        };
        let result = match shown.index() {
            Some(index) => format!("{} (at [{}])", result, index),
            None => result,
        };
        let detail = self.detail_ref(overflow);
        self.lines.push(format!(
            "{}{} <- {} -> {}{}",
            indent, label, subject, result, detail
        ));

        for child in children {
            self.record(child, depth + 1);
        }
    }
}

enum Quote {
    Closed,
    Open,
    Escaping,
}

/// Where `text` ends relative to the string literals printed by `Value`.
fn open_quote(text: &str) -> Quote {
    let mut state = Quote::Closed;
    for c in text.chars() {
        state = match (state, c) {
            (Quote::Closed, '"') => Quote::Open,
            (Quote::Closed, _) => Quote::Closed,
            (Quote::Open, '\\') => Quote::Escaping,
            (Quote::Open, '"') => Quote::Closed,
            (Quote::Open, _) | (Quote::Escaping, _) => Quote::Open,
        };
    }
    state
}

fn verdict(outcome: &Outcome) -> &'static str {
    match outcome.verdict() {
        Some(true) => "true",
        _ => "false",
    }
}
