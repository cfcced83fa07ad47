//! Annotated evaluation records
//!
//! A single pass over a [`Node`] tree produces a tree of [`Record`]s that
//! mirrors it: one record per visited node, holding the subject the node
//! saw and what came of it. Nodes skipped by a short-circuit get a record
//! too, marked [`Outcome::NotEvaluated`], so the report can show them.

use crate::error::Fault;
use crate::node::{Node, Quantifier, Transform};
use crate::value::Value;

/// What happened when a node was visited.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The node held.
    Passed,
    /// The node did not hold.
    Failed,
    /// The node's own test or function failed to produce a result.
    Faulted(Fault),
    /// A descendant faulted, so this node has no verdict.
    Aborted,
    /// A short-circuit skipped the node.
    NotEvaluated,
}

impl Outcome {
    fn from_verdict(verdict: bool) -> Self {
        if verdict {
            Outcome::Passed
        } else {
            Outcome::Failed
        }
    }

    /// The boolean verdict, if there is one.
    pub fn verdict(&self) -> Option<bool> {
        match self {
            Outcome::Passed => Some(true),
            Outcome::Failed => Some(false),
            _ => None,
        }
    }

    /// Returns true for [`Outcome::Faulted`] and [`Outcome::Aborted`].
    pub fn is_fault(&self) -> bool {
        matches!(self, Outcome::Faulted(_) | Outcome::Aborted)
    }

    /// The parent outcome implied by a child outcome that has no verdict.
    fn propagate(&self) -> Outcome {
        match self {
            Outcome::NotEvaluated => Outcome::NotEvaluated,
            _ => Outcome::Aborted,
        }
    }
}

/// One visited node and what it saw.
#[derive(Debug, Clone)]
pub struct Record<'n> {
    node: &'n Node,
    subject: Option<Value>,
    outcome: Outcome,
    output: Option<Value>,
    index: Option<usize>,
    children: Vec<Record<'n>>,
}

impl<'n> Record<'n> {
    /// The node this record belongs to.
    pub fn node(&self) -> &'n Node {
        self.node
    }

    /// The value the node was applied to. `None` when not evaluated.
    pub fn subject(&self) -> Option<&Value> {
        self.subject.as_ref()
    }

    /// The outcome of the visit.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The function output, for transform nodes that ran.
    pub fn output(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    /// The index of the element that decided a quantifier.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Records of the child nodes, in construction order.
    pub fn children(&self) -> &[Record<'n>] {
        &self.children
    }

    /// The first fault in depth-first order.
    pub fn fault(&self) -> Option<&Fault> {
        match &self.outcome {
            Outcome::Faulted(fault) => Some(fault),
            _ => self.children.iter().find_map(Record::fault),
        }
    }

    fn skipped(node: &'n Node) -> Self {
        Record {
            node,
            subject: None,
            outcome: Outcome::NotEvaluated,
            output: None,
            index: None,
            children: Vec::new(),
        }
    }

    fn visited(node: &'n Node, subject: &Value, outcome: Outcome) -> Self {
        Record {
            node,
            subject: Some(subject.clone()),
            outcome,
            output: None,
            index: None,
            children: Vec::new(),
        }
    }
}

/// Evaluate `node` against `value`, recording every visited node.
pub(crate) fn visit<'n>(node: &'n Node, value: &Value) -> Record<'n> {
    match node {
        Node::Leaf(_) | Node::Parameterized(_) => {
            let outcome = match node.test(value) {
                Ok(verdict) => Outcome::from_verdict(verdict),
                Err(fault) => Outcome::Faulted(fault),
            };
            Record::visited(node, value, outcome)
        }
        Node::Not(child) => {
            let child = visit(child, value);
            let outcome = match child.outcome.verdict() {
                Some(verdict) => Outcome::from_verdict(!verdict),
                None => child.outcome.propagate(),
            };
            let mut record = Record::visited(node, value, outcome);
            record.children.push(child);
            record
        }
        Node::And(children) => junction(node, children, value, false),
        Node::Or(children) => junction(node, children, value, true),
        Node::Transform(t) => transform(node, t, value),
        Node::Quantifier(q) => quantifier(node, q, value),
    }
}

/// Left to right; the first child whose verdict equals `stop_on` decides.
fn junction<'n>(node: &'n Node, children: &'n [Node], value: &Value, stop_on: bool) -> Record<'n> {
    let mut decided = None;
    let mut records = Vec::with_capacity(children.len());
    for child in children {
        if decided.is_some() {
            records.push(Record::skipped(child));
            continue;
        }
        let record = visit(child, value);
        match record.outcome.verdict() {
            Some(verdict) if verdict == stop_on => decided = Some(Outcome::from_verdict(stop_on)),
            Some(_) => {}
            None => decided = Some(record.outcome.propagate()),
        }
        records.push(record);
    }
    let outcome = decided.unwrap_or_else(|| Outcome::from_verdict(!stop_on));
    let mut record = Record::visited(node, value, outcome);
    record.children = records;
    record
}

fn transform<'n>(node: &'n Node, t: &'n Transform, value: &Value) -> Record<'n> {
    match t.apply(value) {
        Ok(output) => {
            let child = visit(t.check(), &output);
            let outcome = match child.outcome.verdict() {
                Some(verdict) => Outcome::from_verdict(verdict),
                None => child.outcome.propagate(),
            };
            let mut record = Record::visited(node, value, outcome);
            record.output = Some(output);
            record.children.push(child);
            record
        }
        Err(fault) => {
            let mut record = Record::visited(node, value, Outcome::Faulted(fault));
            record.children.push(Record::skipped(t.check()));
            record
        }
    }
}

fn quantifier<'n>(node: &'n Node, q: &'n Quantifier, value: &Value) -> Record<'n> {
    let items = match value.elements() {
        Ok(items) => items,
        Err(e) => {
            let mut record = Record::visited(node, value, Outcome::Faulted(e.into()));
            record.children.push(Record::skipped(q.element()));
            return record;
        }
    };
    let kind = q.kind();
    let mut last = None;
    for (i, item) in items.iter().enumerate() {
        let element = visit(q.element(), item);
        let outcome = match element.outcome.verdict() {
            Some(verdict) if verdict == kind.short_circuits_on() => {
                Outcome::from_verdict(kind.verdict_on_short_circuit())
            }
            Some(_) => {
                last = Some(element);
                continue;
            }
            None => element.outcome.propagate(),
        };
        let mut record = Record::visited(node, value, outcome);
        record.index = Some(i);
        record.children.push(element);
        return record;
    }
    let mut record = Record::visited(
        node,
        value,
        Outcome::from_verdict(kind.verdict_when_exhausted()),
    );
    record.children.push(last.unwrap_or_else(|| Record::skipped(q.element())));
    record
}
