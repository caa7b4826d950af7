//! The parsed tree produced by [`crate::parser::parse`].
//!
//! Nodes own their children outright: once [`parse`](crate::parser::parse) returns, the
//! `Module` at the root can be walked, matched on, or dropped with no other references
//! to keep alive.

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Distinguishes the three bracket families that introduce a [`Node::Sequence`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceKind {
    /// `( ... )`
    Default,
    /// `{ ... }`, the body of a `Definition`-by-block.
    DefinitionBody,
    /// `[ ... ]`, a parameter list attached to an `Object`.
    ParameterList,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// The root of every parse. Top-level items are whatever terms, objects, or nested
    /// sequences appear outside any explicit bracket, separated implicitly by `\n` or
    /// explicitly by `,`.
    Module { position: Position, explicit: bool, items: Vec<Node> },

    /// A bracket-delimited group of sequence items.
    Sequence { kind: SequenceKind, position: Position, explicit: bool, children: Vec<Node> },

    /// An ordered list of terms combined by juxtaposition. Never empty once constructed.
    Evaluation { position: Position, terms: Vec<Node> },

    /// A symbol reference, optionally carrying parameter lists and a definition body.
    /// `symbol` is `None` for the anonymous object synthesized when `[` or `{` appears
    /// without a preceding symbol.
    Object { position: Position, symbol: Option<String>, children: Vec<Node> },

    /// A `=`-introduced body attached under an `Object`. `None` when `=` is immediately
    /// followed by a token that closes it with no term in between.
    Definition { position: Position, body: Option<Box<Node>> },

    Null(Position),
    Bool(bool, Position),
    Integer(i64, Position),
    Real(f64, Position),
    String(String, Position),
    UserError(String, Position),
    SyntaxError(String, Position),
}

impl Node {
    pub fn position(&self) -> Position {
        match self {
            Node::Module { position, .. }
            | Node::Sequence { position, .. }
            | Node::Evaluation { position, .. }
            | Node::Object { position, .. }
            | Node::Definition { position, .. }
            | Node::Null(position)
            | Node::Bool(_, position)
            | Node::Integer(_, position)
            | Node::Real(_, position)
            | Node::String(_, position)
            | Node::UserError(_, position)
            | Node::SyntaxError(_, position) => *position,
        }
    }

    pub fn position_mut(&mut self) -> &mut Position {
        match self {
            Node::Module { position, .. }
            | Node::Sequence { position, .. }
            | Node::Evaluation { position, .. }
            | Node::Object { position, .. }
            | Node::Definition { position, .. }
            | Node::Null(position)
            | Node::Bool(_, position)
            | Node::Integer(_, position)
            | Node::Real(_, position)
            | Node::String(_, position)
            | Node::UserError(_, position)
            | Node::SyntaxError(_, position) => position,
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Node::SyntaxError(..))
    }

    pub fn is_user_error(&self) -> bool {
        matches!(self, Node::UserError(..))
    }
}
