//! Presentation plumbing over the in-tree error nodes. `tokenize` and `parse` never
//! return a `Result` — [`SyntaxError`](crate::tree::Node::SyntaxError) and
//! [`UserError`](crate::tree::Node::UserError) nodes are the only representation of a
//! malformed input. This module just makes them easy to enumerate from a driver.

use std::fmt;

use thiserror::Error;

use crate::position::Position;
use crate::tree::Node;

/// A read-only view of one error node found while walking a parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Syntax,
    User,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            DiagnosticKind::Syntax => "syntax error",
            DiagnosticKind::User => "user error",
        };
        write!(f, "{label} at {}:{}: {}", self.position.ln, self.position.col, self.message)
    }
}

/// Walks `node` and its descendants, collecting one [`Diagnostic`] per error node, in
/// the order they appear in the source.
pub fn collect_diagnostics(node: &Node) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    walk(node, &mut out);
    out
}

fn walk(node: &Node, out: &mut Vec<Diagnostic>) {
    match node {
        Node::SyntaxError(message, position) => {
            out.push(Diagnostic { kind: DiagnosticKind::Syntax, message: message.clone(), position: *position });
        }
        Node::UserError(message, position) => {
            out.push(Diagnostic { kind: DiagnosticKind::User, message: message.clone(), position: *position });
        }
        Node::Module { items, .. } => items.iter().for_each(|n| walk(n, out)),
        Node::Sequence { children, .. } => children.iter().for_each(|n| walk(n, out)),
        Node::Evaluation { terms, .. } => terms.iter().for_each(|n| walk(n, out)),
        Node::Object { children, .. } => children.iter().for_each(|n| walk(n, out)),
        Node::Definition { body, .. } => {
            if let Some(body) = body {
                walk(body, out);
            }
        }
        Node::Null(_) | Node::Bool(..) | Node::Integer(..) | Node::Real(..) | Node::String(..) => {}
    }
}

/// Failures that indicate a bug in this crate, never in the input. Not part of the
/// public `tokenize`/`parse` contract: both are total functions over arbitrary input.
/// Reserved for internal invariant checks (debug assertions, construction helpers) that
/// are not supposed to be reachable at all.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("position arithmetic overflowed merging {a:?} and {b:?}")]
    PositionOverflow { a: Position, b: Position },

    #[error("parser stack underflow: popped past the module frame")]
    StackUnderflow,
}
