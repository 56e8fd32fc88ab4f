use serde::{Deserialize, Serialize};

/// A character range `[start, end)` within a single line.
///
/// Offsets count `char`s, not bytes: hosts report cursor columns in
/// characters and every span handed back to them must use the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkSpan {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset (the position just after the closing syntax).
    pub end: usize,
}

impl LinkSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `at`, used for insertions.
    pub fn empty_at(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the length in chars. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Cursor containment with both bounds inclusive.
    ///
    /// A cursor sitting directly before the opening bracket or directly
    /// after the closing one still "touches" the link.
    #[must_use]
    pub fn touches(self, ch: usize) -> bool {
        self.start <= ch && ch <= self.end
    }

    /// True when `ch` lies in the first half of the span, midpoint included.
    ///
    /// Equivalent to `ch <= (start + end) / 2` evaluated without integer
    /// truncation.
    #[must_use]
    pub fn is_left_half(self, ch: usize) -> bool {
        ch * 2 <= self.start + self.end
    }

    #[must_use]
    pub fn overlaps(self, other: LinkSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Which half of a link span the cursor sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorSide {
    Left,
    Right,
}

impl CursorSide {
    pub fn of(span: LinkSpan, ch: usize) -> Self {
        if span.is_left_half(ch) {
            CursorSide::Left
        } else {
            CursorSide::Right
        }
    }
}

/// Extracts the chars of `sp` from `chars` as an owned String.
///
/// Out-of-range bounds are clamped.
pub fn slice_chars(chars: &[char], sp: LinkSpan) -> String {
    let end = sp.end.min(chars.len());
    let start = sp.start.min(end);
    chars[start..end].iter().collect()
}
