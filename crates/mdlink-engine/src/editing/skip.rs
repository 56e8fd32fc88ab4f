//! # Skip/Close Position Calculator
//!
//! Moves the cursor over a link span so it never lands inside link
//! syntax. Works on one line plus the boundary metadata a caller supplies
//! (line count and previous line length); it never sees the document.
//!
//! Targets are chosen so the cursor ends up one char clear of the span:
//! a cursor at `end` would still touch the link.

use serde::{Deserialize, Serialize};

use crate::parsing::{
    locate::detect_link_at_cursor,
    span::{CursorSide, LinkSpan},
};

/// A document position: 0-based line and char column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SkipContext<'a> {
    pub cursor_line: usize,
    pub cursor_ch: usize,
    /// The cursor's line, without its newline.
    pub line_text: &'a str,
    pub line_count: usize,
    /// Char length of line `cursor_line - 1`; ignored on the first line.
    pub prev_line_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipLinkResult {
    pub position: Position,
    pub skipped: bool,
}

/// Where the cursor goes when the edit form closes on a known link span.
#[derive(Debug, Clone, Copy)]
pub struct CloseContext<'a> {
    pub cursor_line: usize,
    /// The link's span as it stands after the edit.
    pub link_span: LinkSpan,
    pub entered_from_left: bool,
    pub line_text: &'a str,
    pub line_count: usize,
    pub prev_line_length: usize,
}

struct LineBounds {
    line: usize,
    len: usize,
    line_count: usize,
    prev_line_length: usize,
}

impl LineBounds {
    fn here(&self, ch: usize) -> Position {
        Position::new(self.line, ch)
    }

    fn next_line(&self) -> Option<Position> {
        (self.line + 1 < self.line_count).then(|| Position::new(self.line + 1, 0))
    }

    fn prev_line(&self) -> Option<Position> {
        (self.line > 0).then(|| Position::new(self.line - 1, self.prev_line_length))
    }
}

/// Steps off `span` away from `side`: a cursor on the left half leaves
/// rightward, one on the right half leaves leftward.
fn exit_position(span: LinkSpan, side: CursorSide, b: &LineBounds) -> Position {
    let whole_line = span.start == 0 && span.end >= b.len;
    let after = span.end + 1;

    let (branch, position) = match (whole_line, side) {
        (true, CursorSide::Left) => (
            "whole line, rightward",
            b.next_line()
                .or_else(|| b.prev_line())
                .unwrap_or_else(|| b.here(span.end)),
        ),
        (true, CursorSide::Right) => (
            "whole line, leftward",
            b.prev_line()
                .or_else(|| b.next_line())
                .unwrap_or_else(|| b.here(0)),
        ),
        (false, CursorSide::Left) => {
            let position = if after <= b.len {
                b.here(after)
            } else if let Some(next) = b.next_line() {
                next
            } else if span.start > 0 {
                b.here(span.start - 1)
            } else {
                b.here(span.end)
            };
            ("rightward", position)
        }
        (false, CursorSide::Right) => {
            let position = if span.start > 0 {
                b.here(span.start - 1)
            } else if let Some(prev) = b.prev_line() {
                prev
            } else if after <= b.len {
                b.here(after)
            } else {
                b.here(0)
            };
            ("leftward", position)
        }
    };
    log::trace!("skip {branch} over {span:?} -> {position:?}");
    position
}

/// Moves the cursor past the link it touches, if any.
pub fn determine_skip_position(ctx: &SkipContext<'_>) -> SkipLinkResult {
    let unchanged = SkipLinkResult {
        position: Position::new(ctx.cursor_line, ctx.cursor_ch),
        skipped: false,
    };
    let Some(hit) = detect_link_at_cursor(ctx.line_text, ctx.cursor_ch) else {
        return unchanged;
    };

    let bounds = LineBounds {
        line: ctx.cursor_line,
        len: ctx.line_text.chars().count(),
        line_count: ctx.line_count,
        prev_line_length: ctx.prev_line_length,
    };
    SkipLinkResult {
        position: exit_position(hit.span, CursorSide::of(hit.span, ctx.cursor_ch), &bounds),
        skipped: true,
    }
}

/// Leaves the link in the direction the cursor was travelling when it
/// entered: in from the left means out to the right.
///
/// The span is taken as given rather than re-detected, so a neighbouring
/// link touching the same offset cannot be picked instead.
pub fn determine_close_position(ctx: &CloseContext<'_>) -> Position {
    let side = if ctx.entered_from_left {
        CursorSide::Left
    } else {
        CursorSide::Right
    };
    let bounds = LineBounds {
        line: ctx.cursor_line,
        len: ctx.line_text.chars().count(),
        line_count: ctx.line_count,
        prev_line_length: ctx.prev_line_length,
    };
    exit_position(ctx.link_span, side, &bounds)
}
