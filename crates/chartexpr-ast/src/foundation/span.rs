//! Source location tracking for error reporting.
//!
//! # Design
//!
//! - `Span`: byte range plus the cached 1-based line/column of its start
//! - `LineIndex`: line-start table used to turn byte offsets into positions
//! - `Location`: the flattened form reported to callers
//!
//! # Examples
//!
//! ```
//! # use chartexpr_ast::foundation::span::*;
//! let index = LineIndex::new("A = 1;\nB = A;");
//! let span = index.span(7, 8);
//!
//! assert_eq!((span.line, span.column), (2, 1));
//! assert_eq!(span.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Compact source location reference.
///
/// Points to a byte range in the program source with the cached line and
/// column of the start position, so diagnostics never need the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of start position
    pub start: u32,
    /// Byte offset of end position (exclusive)
    pub end: u32,
    /// 1-based line of the start position
    pub line: u32,
    /// 1-based column (in characters) of the start position
    pub column: u32,
}

/// Caller-facing source position of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
    pub length: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: u32, end: u32, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Zero-length span at the start of the source.
    pub fn zero() -> Self {
        Self::new(0, 0, 1, 1)
    }

    /// Check if this span is zero-length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of this span in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Merge two spans (returns span covering both).
    ///
    /// The line/column of the result is taken from whichever span starts first.
    pub fn merge(&self, other: &Span) -> Span {
        let first = if other.start < self.start { other } else { self };
        Span {
            start: first.start,
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }

    /// Flatten into the reported location form.
    pub fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
            offset: self.start,
            length: self.len(),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Line-start table over a single source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    source: &'src str,
    /// Byte offsets of each line start; `line_starts[0]` is always 0.
    line_starts: Vec<u32>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self {
            source,
            line_starts,
        }
    }

    /// Get 1-based (line, column) for a byte offset.
    ///
    /// Offsets past the end of the source clamp to the end.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.max(1) - 1,
        };
        let line_start = self.line_starts[line_idx] as usize;
        let column = self
            .source
            .get(line_start..offset as usize)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset as usize - line_start);

        ((line_idx + 1) as u32, column as u32 + 1)
    }

    /// Build a span for a byte range, resolving its start position.
    pub fn span(&self, start: usize, end: usize) -> Span {
        let (line, column) = self.line_col(start as u32);
        Span::new(start as u32, end as u32, line, column)
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_single_line() {
        let index = LineIndex::new("A = 1 + 2;");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(4), (1, 5));
    }

    #[test]
    fn test_line_col_multi_line() {
        let index = LineIndex::new("A = 1;\n\nB = 2;");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(6), (1, 7));
        assert_eq!(index.line_col(7), (2, 1));
        assert_eq!(index.line_col(8), (3, 1));
        assert_eq!(index.line_col(12), (3, 5));
    }

    #[test]
    fn test_line_col_counts_characters() {
        let index = LineIndex::new("\"é\" #");
        assert_eq!(index.line_col(5), (1, 5));
    }

    #[test]
    fn test_merge_keeps_earliest_position() {
        let index = LineIndex::new("A +\n  B");
        let left = index.span(0, 1);
        let right = index.span(6, 7);

        let merged = right.merge(&left);
        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 7);
        assert_eq!((merged.line, merged.column), (1, 1));
    }

    #[test]
    fn test_location() {
        let span = Span::new(4, 9, 1, 5);
        let location = span.location();
        assert_eq!(location.offset, 4);
        assert_eq!(location.length, 5);
        assert_eq!(location.column, 5);
    }
}
