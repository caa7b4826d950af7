//! The tokenizer: converts source text into a stream of positioned tokens.
//!
//! [`tokenize`] is total — every input, however malformed, produces some token stream.
//! Unclassifiable input becomes [`crate::token::TokenKind::SyntaxError`] tokens rather
//! than an error return.

mod cursor;
mod lexer;

use cursor::Cursor;

use crate::token::{Token, TokenKind};

/// Runtime knobs for [`tokenize_with`]. The grammar itself (§4.1) is fixed; the only
/// axis a caller can vary is whether comment tokens make it into the returned vector
/// (the parser discards them either way).
#[derive(Clone, Copy, Debug)]
pub struct TokenizeOptions {
    pub keep_comments: bool,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self { keep_comments: true }
    }
}

/// Tokenizes `source` with [`TokenizeOptions::default`].
#[tracing::instrument(level = "trace", skip(source))]
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with(source, TokenizeOptions::default())
}

/// Tokenizes `source`, applying `options`.
#[tracing::instrument(level = "trace", skip(source))]
pub fn tokenize_with(source: &str, options: TokenizeOptions) -> Vec<Token> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    while let Some(c) = cursor.peek() {
        if lexer::is_whitespace(c) {
            cursor.bump_while(lexer::is_whitespace);
            continue;
        }

        let start = cursor.here();
        let kind = if lexer::is_particle(c) {
            lexer::eat_particle(&mut cursor, c)
        } else if c == '#' {
            lexer::eat_comment(&mut cursor)
        } else if c.is_ascii_digit() {
            lexer::eat_number(&mut cursor)
        } else if c == '\'' {
            lexer::eat_string(&mut cursor)
        } else if c == '`' {
            lexer::eat_user_error(&mut cursor)
        } else if c.is_ascii_alphabetic() || c == '_' {
            lexer::eat_identifier(&mut cursor)
        } else {
            lexer::eat_fallback(&mut cursor)
        };

        tracing::trace!(?kind, "lexed token");

        if matches!(kind, TokenKind::Comment) && !options.keep_comments {
            continue;
        }

        let mut position = start;
        position.len = cursor.byte_offset() - position.ch;
        tokens.push(Token::new(kind, position));
    }

    tokens
}
