//! Source position type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in the source markup.
///
/// Uses 1-indexed lines, 0-indexed columns (counted in characters) and a
/// 0-indexed byte offset.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SourcePosition {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
    /// Byte offset from the start of the source.
    pub offset: u32,
}

impl SourcePosition {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Computes the line and column of a byte offset in `source`.
    ///
    /// Offsets past the end of `source` are clamped to its length, and an
    /// offset inside a multi-byte character counts that character as not
    /// yet reached.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];

        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |pos| pos + 1);
        let column = source[line_start..]
            .char_indices()
            .take_while(|(idx, _)| line_start + idx < offset)
            .count();

        Self::new(line as u32, column as u32, offset as u32)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line={} column={} offset={}",
            self.line, self.column, self.offset
        )
    }
}
