//! Per-lexeme scanning. Every `eat_*` function assumes the cursor is already
//! positioned at the first character of its lexeme and consumes exactly that lexeme.

use crate::token::TokenKind;
use crate::tokenizer::cursor::Cursor;

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0B' | '\x0C' | '\r')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn particle_token(c: char) -> Option<TokenKind> {
    Some(match c {
        ',' => TokenKind::Separator,
        '\n' => TokenKind::SeparatorImplicit,
        '(' => TokenKind::SequenceStart,
        ')' => TokenKind::SequenceEnd,
        '=' => TokenKind::Definition,
        '{' => TokenKind::DefinitionStart,
        '}' => TokenKind::DefinitionEnd,
        '[' => TokenKind::ParameterStart,
        ']' => TokenKind::ParameterEnd,
        _ => return None,
    })
}

/// Whether `c` begins some recognized lexeme class (used by the fallback scanner to
/// decide where a run of unclassifiable bytes must stop).
fn starts_token(c: char) -> bool {
    is_whitespace(c) || particle_token(c).is_some() || c == '#' || is_ident_start(c) || c.is_ascii_digit() || c == '\'' || c == '`'
}

fn digit_value(c: char, base: u32) -> Option<u32> {
    c.to_digit(base)
}

/// Eats `#` through (not including) the next `\n` or end of input.
pub(crate) fn eat_comment(cursor: &mut Cursor) -> TokenKind {
    cursor.bump(); // '#'
    cursor.bump_while(|c| c != '\n');
    TokenKind::Comment
}

/// Eats an identifier and resolves it to a keyword token if it matches one exactly.
pub(crate) fn eat_identifier(cursor: &mut Cursor) -> TokenKind {
    let start = cursor.byte_offset();
    cursor.bump();
    cursor.bump_while(is_ident_continue);
    let text = cursor.slice_from(start);
    TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Symbol(text.to_string()))
}

/// Eats a number: a decimal run, an optionally-based integer (`0x`/`0o`/`0b`), or a
/// decimal real with fractional/exponent parts. Never fails; malformed based-prefixes
/// become `SyntaxError` over exactly what was consumed.
pub(crate) fn eat_number(cursor: &mut Cursor) -> TokenKind {
    let start = cursor.byte_offset();

    if cursor.peek() == Some('0') {
        let base = match cursor.peek_at(1) {
            Some('x') | Some('X') => Some(16u32),
            Some('o') | Some('O') => Some(8u32),
            Some('b') | Some('B') => Some(2u32),
            _ => None,
        };
        if let Some(base) = base {
            cursor.bump(); // '0'
            cursor.bump(); // x/o/b
            let digits_start = cursor.byte_offset();
            cursor.bump_while(|c| digit_value(c, base).is_some());
            let digits = cursor.slice_from(digits_start);
            if digits.is_empty() {
                let lexeme = cursor.slice_from(start);
                return TokenKind::SyntaxError(format!("invalid base prefix `{lexeme}`"));
            }
            let value = i64::from_str_radix(digits, base).unwrap_or_else(|_| saturate_base(digits, base));
            return TokenKind::Integer(value);
        }
    }

    cursor.bump_while(|c| c.is_ascii_digit());
    let mut is_real = false;

    if cursor.peek() == Some('.') && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
        is_real = true;
        cursor.bump(); // '.'
        cursor.bump_while(|c| c.is_ascii_digit());
    }

    if matches!(cursor.peek(), Some('e') | Some('E')) {
        let mark = cursor.peek_at(1);
        let exponent_digits_start = match mark {
            Some('+') | Some('-') => cursor.peek_at(2),
            other => other,
        };
        if exponent_digits_start.is_some_and(|c| c.is_ascii_digit()) {
            is_real = true;
            cursor.bump(); // e/E
            if matches!(cursor.peek(), Some('+') | Some('-')) {
                cursor.bump();
            }
            cursor.bump_while(|c| c.is_ascii_digit());
        }
    }

    let lexeme = cursor.slice_from(start);
    if is_real {
        TokenKind::Real(lexeme.parse::<f64>().unwrap_or(f64::NAN))
    } else {
        TokenKind::Integer(lexeme.parse::<i64>().unwrap_or_else(|_| saturate_decimal(lexeme)))
    }
}

fn saturate_base(digits: &str, base: u32) -> i64 {
    // from_str_radix only fails here on overflow (digits are pre-validated); clamp
    // to the signed extrema rather than panicking.
    let _ = (digits, base);
    i64::MAX
}

fn saturate_decimal(lexeme: &str) -> i64 {
    if lexeme.starts_with('-') { i64::MIN } else { i64::MAX }
}

/// Eats a `'`-delimited string. Unterminated input becomes `SyntaxError` over the run
/// that was actually consumed, with no closing quote required to reach end of input.
pub(crate) fn eat_string(cursor: &mut Cursor) -> TokenKind {
    eat_delimited(cursor, '\'', TokenKind::String, "unterminated string literal")
}

/// Eats a `` ` ``-delimited user-error marker, same recovery rule as strings.
pub(crate) fn eat_user_error(cursor: &mut Cursor) -> TokenKind {
    eat_delimited(cursor, '`', TokenKind::UserError, "unterminated user error literal")
}

fn eat_delimited(cursor: &mut Cursor, delim: char, make: fn(String) -> TokenKind, unterminated_msg: &str) -> TokenKind {
    let start = cursor.byte_offset();
    cursor.bump(); // opening delimiter
    let body_start = cursor.byte_offset();
    loop {
        match cursor.peek() {
            None => {
                let lexeme = cursor.slice_from(start);
                return TokenKind::SyntaxError(format!("{unterminated_msg}: `{lexeme}`"));
            }
            Some(c) if c == delim => {
                let body = cursor.slice_from(body_start).to_string();
                cursor.bump(); // closing delimiter
                return make(body);
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}

/// Eats a maximal run of bytes that do not begin any other recognized lexeme.
pub(crate) fn eat_fallback(cursor: &mut Cursor) -> TokenKind {
    let start = cursor.byte_offset();
    cursor.bump();
    cursor.bump_while(|c| !starts_token(c));
    TokenKind::SyntaxError(format!("unrecognized input `{}`", cursor.slice_from(start)))
}

pub(crate) fn eat_particle(cursor: &mut Cursor, c: char) -> TokenKind {
    cursor.bump();
    particle_token(c).expect("caller already matched a particle character")
}

pub(crate) fn is_particle(c: char) -> bool {
    particle_token(c).is_some()
}
