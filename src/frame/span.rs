use serde::{Deserialize, Serialize};

/// Lines `start..end` (0-based, end exclusive) of one text snapshot split on
/// `\n`. A span is only meaningful for the exact text it was scanned from.
///
/// `start` sits above the opening marker when comment lines were absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span ends before it starts");
        Self { start, end }
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// The smallest span holding both, lines between them included.
    pub fn cover(self, other: LineSpan) -> LineSpan {
        LineSpan::new(self.start.min(other.start), self.end.max(other.end))
    }
}
