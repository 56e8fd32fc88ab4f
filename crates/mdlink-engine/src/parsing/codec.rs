//! # Link Syntax Codec
//!
//! Reads and converts wiki (`[[dest|text]]`) and markdown (`[text](dest)`)
//! link syntax. The `try_parse_*` scanners are shared with the line
//! locator; the `parse_*` entry points accept only a string that is
//! exactly one link.

use serde::{Deserialize, Serialize};

use super::{
    cursor::Cursor,
    kinds::{Embed, MarkdownLink, WikiLink},
    link::LinkInfo,
    span::{LinkSpan, slice_chars},
    url::is_url,
};

/// Which notation a scanned link uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    Wiki,
    Markdown,
}

/// A link found by a scanner, with the spans of its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedLink {
    pub link: LinkInfo,
    /// Full span including `!`, brackets and parens.
    pub span: LinkSpan,
    /// Raw (untrimmed) destination span.
    pub destination_span: LinkSpan,
    /// Raw text span: always present for markdown links, only with an
    /// alias for wiki links.
    pub text_span: Option<LinkSpan>,
}

impl LocatedLink {
    pub fn kind(&self) -> LinkKind {
        if self.link.is_wiki {
            LinkKind::Wiki
        } else {
            LinkKind::Markdown
        }
    }
}

/// Outcome of converting a markdown destination into wiki notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conversion {
    /// The converted destination; may equal the input when nothing needed decoding.
    Converted(String),
    /// The destination is an external URL, which wiki links cannot reference.
    Unrepresentable,
}

impl Conversion {
    pub fn into_option(self) -> Option<String> {
        match self {
            Conversion::Converted(s) => Some(s),
            Conversion::Unrepresentable => None,
        }
    }
}

/// One markdown scan attempt, with where a line scan may resume after a miss.
pub(crate) enum MarkdownScan {
    Found(LocatedLink),
    /// No markdown link starts before this offset. Every start up to the
    /// first `]` shares that `]` as its text close, so they all fail alike.
    NoneBefore(usize),
    /// No markdown link starts anywhere from here to the end of the line.
    Exhausted,
}

/// Scans a markdown link at the cursor, restoring it on a miss.
///
/// Mirrors `(!?\[)([^\]]*)\]\(([^)]+)\)`: the first `]` closes the text and
/// the first `)` closes the destination.
pub(crate) fn scan_markdown(cur: &mut Cursor<'_>) -> MarkdownScan {
    let saved = cur.clone();
    let start = cur.pos();
    let is_embed = cur.peek() == Some(Embed::MARKER);
    if is_embed {
        cur.bump();
    }
    if cur.peek() != Some(MarkdownLink::TEXT_OPEN) {
        *cur = saved;
        return MarkdownScan::NoneBefore(start + 1);
    }
    cur.bump();

    let text_start = cur.pos();
    cur.bump_while(|c| c != MarkdownLink::TEXT_CLOSE);
    let text_end = cur.pos();
    if cur.eof() {
        *cur = saved;
        return MarkdownScan::Exhausted;
    }
    cur.bump();

    if cur.peek() != Some(MarkdownLink::DEST_OPEN) {
        *cur = saved;
        return MarkdownScan::NoneBefore(text_end + 1);
    }
    cur.bump();

    let dest_start = cur.pos();
    let dest_len = cur.bump_while(|c| c != MarkdownLink::DEST_CLOSE);
    let dest_end = cur.pos();
    if cur.eof() {
        // any later start closes its text at or after this `]`
        *cur = saved;
        return MarkdownScan::Exhausted;
    }
    if dest_len == 0 {
        *cur = saved;
        return MarkdownScan::NoneBefore(text_end + 1);
    }
    cur.bump();

    let text_span = LinkSpan::new(text_start, text_end);
    let destination_span = LinkSpan::new(dest_start, dest_end);
    MarkdownScan::Found(LocatedLink {
        link: LinkInfo {
            text: slice_chars(cur.chars, text_span).trim().to_string(),
            destination: slice_chars(cur.chars, destination_span).trim().to_string(),
            is_wiki: false,
            is_embed,
        },
        span: LinkSpan::new(start, cur.pos()),
        destination_span,
        text_span: Some(text_span),
    })
}

/// Attempts to scan a markdown link at the cursor. On failure the cursor
/// is restored.
pub fn try_parse_markdown(cur: &mut Cursor<'_>) -> Option<LocatedLink> {
    match scan_markdown(cur) {
        MarkdownScan::Found(found) => Some(found),
        MarkdownScan::NoneBefore(_) | MarkdownScan::Exhausted => None,
    }
}

/// Attempts to scan a wiki link at the cursor.
///
/// Handles `[[dest]]` and `[[dest|text]]`, each optionally prefixed by `!`.
/// Brackets may not appear inside either part. On failure the cursor is
/// restored.
pub fn try_parse_wiki(cur: &mut Cursor<'_>) -> Option<LocatedLink> {
    let saved = cur.clone();
    let start = cur.pos();
    let is_embed = cur.peek() == Some(Embed::MARKER);
    if is_embed {
        cur.bump();
    }
    if !cur.eat(WikiLink::OPEN) {
        *cur = saved;
        return None;
    }

    let is_bracket = |c: char| c == '[' || c == ']';
    let dest_start = cur.pos();
    cur.bump_while(|c| !is_bracket(c) && c != WikiLink::ALIAS);
    let destination_span = LinkSpan::new(dest_start, cur.pos());

    let mut text_span = None;
    if cur.peek() == Some(WikiLink::ALIAS) {
        cur.bump();
        let alias_start = cur.pos();
        cur.bump_while(|c| !is_bracket(c));
        text_span = Some(LinkSpan::new(alias_start, cur.pos()));
    }

    if !cur.eat(WikiLink::CLOSE) {
        *cur = saved;
        return None;
    }

    let destination = slice_chars(cur.chars, destination_span).trim().to_string();
    let text = match text_span {
        Some(sp) => slice_chars(cur.chars, sp).trim().to_string(),
        None => destination.clone(),
    };
    Some(LocatedLink {
        link: LinkInfo {
            text,
            destination,
            is_wiki: true,
            is_embed,
        },
        span: LinkSpan::new(start, cur.pos()),
        destination_span,
        text_span,
    })
}

fn parse_whole(s: &str, scan: fn(&mut Cursor<'_>) -> Option<LocatedLink>) -> Option<LinkInfo> {
    let chars: Vec<char> = s.trim().chars().collect();
    let mut cur = Cursor::new(&chars);
    let found = scan(&mut cur)?;
    cur.eof().then_some(found.link)
}

/// Parses a string that is exactly one wiki link.
///
/// Returns `None` on any structural mismatch, including trailing text.
pub fn parse_wiki_link(s: &str) -> Option<LinkInfo> {
    parse_whole(s, try_parse_wiki)
}

/// Parses a string that is exactly one markdown link.
pub fn parse_markdown_link(s: &str) -> Option<LinkInfo> {
    parse_whole(s, try_parse_markdown)
}

fn percent_escape(c: char) -> Option<&'static str> {
    match c {
        '%' => Some("%25"),
        ' ' => Some("%20"),
        '^' => Some("%5E"),
        '(' => Some("%28"),
        ')' => Some("%29"),
        '<' => Some("%3C"),
        '>' => Some("%3E"),
        _ => None,
    }
}

/// Percent-encodes the characters a bare markdown destination cannot hold.
///
/// URLs pass through untouched. `#` is left alone so heading references
/// keep working.
pub fn wiki_to_markdown(destination: &str) -> String {
    if is_url(destination) {
        return destination.to_string();
    }
    let mut out = String::with_capacity(destination.len());
    for c in destination.chars() {
        match percent_escape(c) {
            Some(esc) => out.push_str(esc),
            None => out.push(c),
        }
    }
    out
}

/// Decodes a markdown destination into wiki notation.
///
/// Sequences that do not decode to valid UTF-8 leave the input as-is.
pub fn markdown_to_wiki(destination: &str) -> Conversion {
    if is_url(destination) {
        return Conversion::Unrepresentable;
    }
    match urlencoding::decode(destination) {
        Ok(decoded) => Conversion::Converted(decoded.into_owned()),
        Err(_) => Conversion::Converted(destination.to_string()),
    }
}

/// The forbidden characters present in the file-name part of a wiki
/// destination (before any `#`), deduplicated, in order of appearance.
pub fn forbidden_wiki_chars(destination: &str) -> Vec<char> {
    let file_name = destination
        .split(WikiLink::SUBPATH)
        .next()
        .unwrap_or_default();
    let mut found = vec![];
    for c in file_name.chars() {
        if WikiLink::FORBIDDEN.contains(&c) && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

pub fn is_valid_wiki_link(s: &str) -> bool {
    let t = s.trim();
    !t.is_empty() && !is_url(t) && forbidden_wiki_chars(t).is_empty()
}

/// URLs are always valid; other destinations must not contain literal
/// spaces (`%20` is fine).
pub fn is_valid_markdown_link(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if is_url(s) {
        return true;
    }
    !s.contains(' ')
}
