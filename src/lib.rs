//! # weft-syntax
//!
//! Tokenizer and structurizer for the Weft expression language. From a source string
//! this crate produces a positioned token stream ([`tokenizer::tokenize`]) and a tree
//! of expressions grouped into sequences, evaluations, objects and definitions
//! ([`parser::parse`]).
//!
//! Both entry points are total: malformed input never panics or returns an error, it
//! shows up as an in-band [`tree::Node::SyntaxError`] or [`tree::Node::UserError`] node
//! (or token) at the point it was detected. Use [`error::collect_diagnostics`] to
//! enumerate them after parsing.
//!
//! ```
//! use weft_syntax::parser::parse_source;
//!
//! let module = parse_source("greet[name]={ name }\ngreet['world']");
//! assert!(weft_syntax::error::collect_diagnostics(&module).is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod position;
pub mod token;
pub mod tokenizer;
pub mod tree;

pub mod parser;

pub use parser::{parse, parse_source};
pub use tokenizer::tokenize;
