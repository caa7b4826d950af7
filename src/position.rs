//! Source positions.
//!
//! A [`Position`] locates a span of bytes in a source string. The tokenizer is the only
//! producer of fresh positions; everything downstream only extends or copies them.

use serde::{Deserialize, Serialize};

/// A byte-offset span plus the line/column of its start, all 0-based except `ch`/`len`
/// which are byte counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset of the first byte of the span.
    pub ch: usize,
    /// Length of the span in bytes.
    pub len: usize,
    /// 0-based line of the first byte.
    pub ln: usize,
    /// 0-based column of the first byte, in bytes from the start of its line.
    pub col: usize,
}

impl Position {
    pub fn new(ch: usize, len: usize, ln: usize, col: usize) -> Self {
        Self { ch, len, ln, col }
    }

    /// A zero-length position at the given location, used for synthetic end-of-input nodes.
    pub fn empty_at(ch: usize, ln: usize, col: usize) -> Self {
        Self { ch, len: 0, ln, col }
    }

    /// Byte offset one past the end of this span.
    pub fn end(&self) -> usize {
        self.ch + self.len
    }

    /// Extend `self` so that it also covers `other`, assuming `other` starts no earlier
    /// than `self` (true of every caller in this crate: children are always discovered
    /// after their parent's start). That assumption is checked in debug builds only;
    /// violating it would be a bug in this crate, not a property of any input.
    pub fn extend_to(&mut self, other: &Position) {
        let new_end = other.end();
        if new_end > self.end() {
            match new_end.checked_sub(self.ch) {
                Some(len) => self.len = len,
                None => debug_assert!(false, "{}", crate::error::InternalError::PositionOverflow { a: *self, b: *other }),
            }
        }
    }

    /// `self` extended to cover `other`, leaving both inputs' `ln`/`col` untouched.
    pub fn covering(mut self, other: &Position) -> Self {
        self.extend_to(other);
        self
    }
}
