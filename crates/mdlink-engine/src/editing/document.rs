use std::borrow::Cow;

use xi_rope::{Rope, delta::Builder};

use super::{
    operation::AppliedEdit,
    skip::{CloseContext, Position, SkipContext, SkipLinkResult, determine_close_position, determine_skip_position},
};
use crate::parsing::span::LinkSpan;

/// A whole document held in an xi-rope buffer.
///
/// The link core only ever sees one line at a time; this type supplies the
/// boundary metadata (line count, previous line length) it needs from the
/// full text. Lines are split on `\n` with any trailing `\r` dropped, and a
/// trailing newline opens an empty last line, as editors count them.
#[derive(Debug, Clone)]
pub struct TextDocument {
    buffer: Rope,
}

impl From<&str> for TextDocument {
    fn from(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
        }
    }
}

impl TextDocument {
    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    /// Byte range of `line` without its line terminator.
    fn line_range(&self, line: usize) -> Option<std::ops::Range<usize>> {
        if line >= self.line_count() {
            return None;
        }
        let start = self.buffer.offset_of_line(line);
        let next = self.buffer.offset_of_line(line + 1);
        let raw = self.buffer.slice_to_cow(start..next);
        let trimmed = raw.trim_end_matches('\n').trim_end_matches('\r');
        Some(start..start + trimmed.len())
    }

    /// Text of `line`, or `None` past the last line.
    pub fn line_text(&self, line: usize) -> Option<Cow<'_, str>> {
        self.line_range(line)
            .map(|range| self.buffer.slice_to_cow(range))
    }

    /// Length of `line` in chars; 0 past the last line.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_text(line).map_or(0, |t| t.chars().count())
    }

    fn prev_line_length(&self, line: usize) -> usize {
        line.checked_sub(1).map_or(0, |prev| self.line_len(prev))
    }

    /// Runs the skip calculator at `position` with boundary metadata filled in.
    pub fn skip(&self, position: Position) -> SkipLinkResult {
        let text = self.line_text(position.line).unwrap_or_default();
        determine_skip_position(&SkipContext {
            cursor_line: position.line,
            cursor_ch: position.ch,
            line_text: &text,
            line_count: self.line_count(),
            prev_line_length: self.prev_line_length(position.line),
        })
    }

    /// Close position for a link span on `line`, as the text now stands.
    pub fn close_position(&self, line: usize, link_span: LinkSpan, entered_from_left: bool) -> Position {
        let text = self.line_text(line).unwrap_or_default();
        determine_close_position(&CloseContext {
            cursor_line: line,
            link_span,
            entered_from_left,
            line_text: &text,
            line_count: self.line_count(),
            prev_line_length: self.prev_line_length(line),
        })
    }

    /// Writes an applied link edit back into `line` and returns where the
    /// cursor should go.
    ///
    /// Returns `None`, leaving the document untouched, when `line` does not exist.
    pub fn commit(&mut self, line: usize, edit: &AppliedEdit) -> Option<Position> {
        let range = self.line_range(line)?;
        let mut builder = Builder::new(self.buffer.len());
        builder.replace(range, Rope::from(edit.line.as_str()));
        self.buffer = builder.build().apply(&self.buffer);
        Some(self.close_position(line, edit.span, edit.entered_from_left))
    }
}
