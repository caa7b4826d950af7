//! Lexical tokens produced by [`crate::tokenizer::tokenize`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::position::Position;

/// One classified lexeme together with its source position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// All lexical kinds this layer recognizes. Keywords (`null`/`true`/`false`) are their
/// own variants rather than `Symbol` carrying a flag, matching how identifiers that are
/// keywords are given dedicated variants upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    Comment,
    Null,
    True,
    False,
    Symbol(String),
    Integer(i64),
    Real(f64),
    /// Body text with the delimiting `'` quotes already stripped.
    String(String),
    /// Body text with the delimiting `` ` `` quotes already stripped.
    UserError(String),
    /// An unclassifiable run of input. Carries a short diagnostic message.
    SyntaxError(String),

    Separator,
    SeparatorImplicit,
    SequenceStart,
    SequenceEnd,
    Definition,
    DefinitionStart,
    DefinitionEnd,
    ParameterStart,
    ParameterEnd,
}

/// The keyword spellings recognized by the tokenizer, checked against a whole identifier
/// lexeme before it is emitted as a plain [`TokenKind::Symbol`].
pub const KEYWORDS: &[(&str, fn() -> TokenKind)] =
    &[("null", || TokenKind::Null), ("true", || TokenKind::True), ("false", || TokenKind::False)];

impl TokenKind {
    /// Looks up `ident` against [`KEYWORDS`], returning the keyword token if it matches.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        KEYWORDS.iter().find(|(spelling, _)| *spelling == ident).map(|(_, make)| make())
    }

    /// Whether this token kind carries a value a parser would attach as a primitive leaf.
    pub fn is_term_start(&self) -> bool {
        matches!(
            self,
            TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Symbol(_)
                | TokenKind::Integer(_)
                | TokenKind::Real(_)
                | TokenKind::String(_)
                | TokenKind::UserError(_)
                | TokenKind::SyntaxError(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        match self {
            Comment => write!(f, "comment"),
            Null => write!(f, "null"),
            True => write!(f, "true"),
            False => write!(f, "false"),
            Symbol(s) => write!(f, "{s}"),
            Integer(i) => write!(f, "{i}"),
            Real(r) => write!(f, "{r}"),
            String(s) => write!(f, "'{s}'"),
            UserError(s) => write!(f, "`{s}`"),
            SyntaxError(msg) => write!(f, "<syntax error: {msg}>"),
            Separator => write!(f, ","),
            SeparatorImplicit => write!(f, "\\n"),
            SequenceStart => write!(f, "("),
            SequenceEnd => write!(f, ")"),
            Definition => write!(f, "="),
            DefinitionStart => write!(f, "{{"),
            DefinitionEnd => write!(f, "}}"),
            ParameterStart => write!(f, "["),
            ParameterEnd => write!(f, "]"),
        }
    }
}
