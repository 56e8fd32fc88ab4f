//! # Cursor Link Locator
//!
//! Finds the link touching a cursor offset on one line. Markdown links are
//! always checked before wiki links; the ordering is the tie-break when
//! bracket runs could be read either way.

use serde::{Deserialize, Serialize};

use super::{
    codec::{
        LocatedLink, MarkdownScan, parse_markdown_link, parse_wiki_link, scan_markdown, try_parse_wiki,
    },
    cursor::Cursor,
    link::LinkInfo,
    span::LinkSpan,
};

/// The link under the cursor and which way the cursor came in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAtCursor {
    pub link: LinkInfo,
    pub span: LinkSpan,
    /// Cursor sits at or just inside the opening delimiter.
    pub entered_from_left: bool,
}

fn scan_markdown_links(chars: &[char]) -> Vec<LocatedLink> {
    let mut cur = Cursor::new(chars);
    let mut out = vec![];
    while !cur.eof() {
        match scan_markdown(&mut cur) {
            MarkdownScan::Found(found) => out.push(found),
            MarkdownScan::NoneBefore(resume) => cur = Cursor::at(chars, resume),
            MarkdownScan::Exhausted => break,
        }
    }
    out
}

fn scan_wiki_links(chars: &[char]) -> Vec<LocatedLink> {
    let mut cur = Cursor::new(chars);
    let mut out = vec![];
    while !cur.eof() {
        if let Some(found) = try_parse_wiki(&mut cur) {
            out.push(found);
            continue;
        }
        cur.bump();
    }
    out
}

/// Every markdown link on the line followed by every wiki link.
///
/// Each kind is scanned left to right without overlap within that kind;
/// a markdown and a wiki match may overlap each other.
pub fn scan_links(line: &str) -> Vec<LocatedLink> {
    let chars: Vec<char> = line.chars().collect();
    let mut links = scan_markdown_links(&chars);
    links.extend(scan_wiki_links(&chars));
    links
}

/// Links as a reader sees them: position order, with any wiki match that
/// overlaps a markdown link dropped.
pub fn visible_links(line: &str) -> Vec<LocatedLink> {
    let chars: Vec<char> = line.chars().collect();
    let markdown = scan_markdown_links(&chars);
    // markdown spans are disjoint and ordered, so only the last one starting
    // before a wiki link ends can overlap it
    let hidden = |wiki: &LocatedLink| {
        let i = markdown.partition_point(|m| m.span.start < wiki.span.end);
        i > 0 && markdown[i - 1].span.overlaps(wiki.span)
    };
    let wiki: Vec<LocatedLink> = scan_wiki_links(&chars)
        .into_iter()
        .filter(|w| !hidden(w))
        .collect();

    let mut kept = markdown;
    kept.extend(wiki);
    kept.sort_by_key(|l| l.span.start);
    kept
}

/// The link whose span touches `ch` (inclusive bounds), if any.
pub fn detect_link_at_cursor(line: &str, ch: usize) -> Option<LinkAtCursor> {
    let found = scan_links(line)
        .into_iter()
        .find(|l| l.span.touches(ch))?;

    // `[` for markdown, `[[` for wiki
    let opener = if found.link.is_wiki { 2 } else { 1 };
    Some(LinkAtCursor {
        entered_from_left: ch <= found.span.start + opener,
        link: found.link,
        span: found.span,
    })
}

/// Reads clipboard content as a link only when the whole trimmed string is
/// exactly one link.
pub fn parse_clipboard_link(text: &str) -> Option<LinkInfo> {
    let t = text.trim();
    parse_markdown_link(t).or_else(|| parse_wiki_link(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_wiki_link_and_span() {
        let hit = detect_link_at_cursor("Check [[my-note]] for more", 8).unwrap();
        assert_eq!(hit.span, LinkSpan::new(6, 17));
        assert_eq!(hit.link.destination, "my-note");
        assert!(hit.link.is_wiki);
        assert!(hit.entered_from_left);
    }

    #[test]
    fn entered_from_left_thresholds() {
        let line = "a [[b]] [c](d)";
        assert!(detect_link_at_cursor(line, 4).unwrap().entered_from_left);
        assert!(!detect_link_at_cursor(line, 5).unwrap().entered_from_left);
        assert!(detect_link_at_cursor(line, 9).unwrap().entered_from_left);
        assert!(!detect_link_at_cursor(line, 10).unwrap().entered_from_left);
    }

    #[test]
    fn span_bounds_are_inclusive() {
        let line = "x [a](b) y";
        assert!(detect_link_at_cursor(line, 1).is_none());
        assert!(detect_link_at_cursor(line, 2).is_some());
        assert!(detect_link_at_cursor(line, 8).is_some());
        assert!(detect_link_at_cursor(line, 9).is_none());
    }

    #[test]
    fn markdown_wins_over_overlapping_wiki() {
        // `[[a]]` sits inside the markdown destination; both touch offset 7
        let hit = detect_link_at_cursor("[t](x[[a]]y)", 7).unwrap();
        assert!(!hit.link.is_wiki);
        assert_eq!(hit.span, LinkSpan::new(0, 12));
        assert_eq!(hit.link.text, "t");
        assert_eq!(hit.link.destination, "x[[a]]y");
    }

    #[test]
    fn picks_the_link_under_the_cursor_not_the_first() {
        let line = "[[one]] and [[two]]";
        assert_eq!(detect_link_at_cursor(line, 14).unwrap().link.destination, "two");
    }

    #[test]
    fn embed_marker_is_part_of_span() {
        let hit = detect_link_at_cursor("see ![[pic.png]]", 10).unwrap();
        assert!(hit.link.is_embed);
        assert_eq!(hit.span, LinkSpan::new(4, 16));
    }

    #[test]
    fn no_link_returns_none() {
        assert!(detect_link_at_cursor("plain text", 3).is_none());
        assert!(detect_link_at_cursor("", 0).is_none());
        assert!(detect_link_at_cursor("[[open", 3).is_none());
    }

    #[test]
    fn visible_links_drop_overlapping_wiki() {
        let links = visible_links("[t](x[[a]]y) then [[c]]");
        assert_eq!(links.len(), 2);
        assert!(!links[0].link.is_wiki);
        assert_eq!(links[1].link.destination, "c");
    }

    #[test]
    fn markdown_scan_resumes_after_a_failed_text_close() {
        let links = scan_links("[a][b](c)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].span, LinkSpan::new(3, 9));
        assert_eq!(links[0].link.text, "b");

        let links = scan_links("[x [y](z)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].span, LinkSpan::new(0, 9));
        assert_eq!(links[0].link.text, "x [y");

        let links = scan_links("[a]() [b](c)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].link.destination, "c");
    }

    #[test]
    fn unclosed_markdown_runs_find_nothing_but_later_wiki_links() {
        assert!(scan_links(&"[".repeat(50)).is_empty());
        let links = scan_links("[a](b [[c]]");
        assert_eq!(links.len(), 1);
        assert!(links[0].link.is_wiki);
    }

    #[test]
    fn clipboard_requires_whole_string() {
        assert_eq!(
            parse_clipboard_link("  [[note|Shown]]\n"),
            Some(LinkInfo::wiki("note", "Shown"))
        );
        assert_eq!(
            parse_clipboard_link("[Site](https://x.y)"),
            Some(LinkInfo::markdown("Site", "https://x.y"))
        );
        assert_eq!(parse_clipboard_link("see [[note]]"), None);
        assert_eq!(parse_clipboard_link("https://x.y"), None);
        assert_eq!(parse_clipboard_link(""), None);
    }
}
