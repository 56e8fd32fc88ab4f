//! Top-level decision: edit the link under the cursor, or create one.

use serde::{Deserialize, Serialize};

use super::{
    skip::{CloseContext, Position, determine_close_position},
    synthesize::{LinkContext, determine_link_from_context},
};
use crate::{
    error::LinkError,
    parsing::{link::LinkInfo, locate::detect_link_at_cursor, span::LinkSpan, url::url_at_cursor},
};

/// A snapshot of the editor at the moment the link command runs.
#[derive(Debug, Clone, Copy)]
pub struct EditorState<'a> {
    pub line: &'a str,
    /// Cursor offset, or the selection start when a selection is active.
    pub cursor_ch: usize,
    pub selection: &'a str,
    /// Already-read clipboard; read failures arrive as `""`.
    pub clipboard_text: &'a str,
}

/// The single decision made before any text changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOperation {
    pub link: LinkInfo,
    pub span: LinkSpan,
    pub entered_from_left: bool,
    pub is_new_link: bool,
    pub should_select_text: bool,
    pub conversion_notice: Option<String>,
}

/// A line after committing an edited link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEdit {
    pub line: String,
    /// Span of the rendered link in the new line.
    pub span: LinkSpan,
    pub entered_from_left: bool,
}

impl AppliedEdit {
    /// Where the cursor should rest once the edit form closes.
    pub fn close_position(&self, cursor_line: usize, line_count: usize, prev_line_length: usize) -> Position {
        determine_close_position(&CloseContext {
            cursor_line,
            link_span: self.span,
            entered_from_left: self.entered_from_left,
            line_text: &self.line,
            line_count,
            prev_line_length,
        })
    }
}

pub fn determine_link_operation(state: &EditorState<'_>) -> LinkOperation {
    if let Some(hit) = detect_link_at_cursor(state.line, state.cursor_ch) {
        log::debug!("editing existing link at {:?}", hit.span);
        return LinkOperation {
            link: hit.link,
            span: hit.span,
            entered_from_left: hit.entered_from_left,
            is_new_link: false,
            should_select_text: false,
            conversion_notice: None,
        };
    }

    let cursor_url = url_at_cursor(state.line, state.cursor_ch);
    let new_link = determine_link_from_context(&LinkContext {
        selection: state.selection,
        clipboard_text: state.clipboard_text,
        cursor_url: cursor_url.as_ref(),
        line: state.line,
        cursor_ch: state.cursor_ch,
    });
    LinkOperation {
        link: new_link.link,
        span: new_link.span,
        entered_from_left: true,
        is_new_link: true,
        should_select_text: new_link.should_select_text,
        conversion_notice: new_link.conversion_notice,
    }
}

impl LinkOperation {
    /// Replaces this operation's span in `line` with the rendered `edited` link.
    pub fn apply(&self, line: &str, edited: &LinkInfo) -> Result<AppliedEdit, LinkError> {
        let rendered = edited.committed()?.to_syntax();
        let chars: Vec<char> = line.chars().collect();
        let end = self.span.end.min(chars.len());
        let start = self.span.start.min(end);

        let mut out: String = chars[..start].iter().collect();
        out.push_str(&rendered);
        out.extend(&chars[end..]);

        Ok(AppliedEdit {
            line: out,
            span: LinkSpan::new(start, start + rendered.chars().count()),
            entered_from_left: self.entered_from_left,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state<'a>(line: &'a str, cursor_ch: usize, selection: &'a str, clipboard_text: &'a str) -> EditorState<'a> {
        EditorState {
            line,
            cursor_ch,
            selection,
            clipboard_text,
        }
    }

    #[test]
    fn existing_link_is_edited() {
        let op = determine_link_operation(&state("see [x](y.md) now", 6, "", "https://ignored"));
        assert!(!op.is_new_link);
        assert_eq!(op.link, LinkInfo::markdown("x", "y.md"));
        assert_eq!(op.span, LinkSpan::new(4, 13));
        assert!(!op.entered_from_left);
    }

    #[test]
    fn url_under_cursor_becomes_new_markdown_link() {
        let op = determine_link_operation(&state("go www.a.org now", 5, "", ""));
        assert!(op.is_new_link);
        assert_eq!(op.span, LinkSpan::new(3, 12));
        assert_eq!(op.link.destination, "https://www.a.org");
        assert!(op.should_select_text);
        assert!(op.entered_from_left);
    }

    #[test]
    fn apply_replaces_span_and_reports_new_span() {
        let line = "see [x](y.md) now";
        let op = determine_link_operation(&state(line, 6, "", ""));
        let edited = LinkInfo::wiki("y", "Why");
        let applied = op.apply(line, &edited).unwrap();
        assert_eq!(applied.line, "see [[y|Why]] now");
        assert_eq!(applied.span, LinkSpan::new(4, 13));
    }

    #[test]
    fn apply_inserts_at_zero_width_span() {
        let line = "ab";
        let op = determine_link_operation(&state(line, 1, "", "note"));
        let applied = op.apply(line, &op.link).unwrap();
        assert_eq!(applied.line, "a[[note]]b");
        assert_eq!(applied.span, LinkSpan::new(1, 9));
    }

    #[test]
    fn apply_refuses_empty_destination() {
        let op = determine_link_operation(&state("ab", 1, "", ""));
        assert_eq!(op.apply("ab", &op.link), Err(LinkError::EmptyDestination));
    }

    #[test]
    fn close_position_after_new_link_moves_past_it() {
        let line = "ab";
        let op = determine_link_operation(&state(line, 1, "", "note"));
        let applied = op.apply(line, &op.link).unwrap();
        assert_eq!(applied.close_position(0, 1, 0), Position::new(0, 10));
    }
}
