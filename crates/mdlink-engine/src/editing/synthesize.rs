//! # New-Link Synthesizer
//!
//! Decides what a freshly created link contains from the selection, the
//! clipboard and any URL under the cursor. The rules are an ordered table;
//! the first rule that yields a link wins.

use serde::{Deserialize, Serialize};

use crate::parsing::{
    link::LinkInfo,
    locate::parse_clipboard_link,
    span::LinkSpan,
    url::{UrlMatch, is_url, normalize_url},
};

/// Everything the synthesizer may draw on. Clipboard read failures are
/// expected to arrive here as an empty string.
#[derive(Debug, Clone, Copy)]
pub struct LinkContext<'a> {
    pub selection: &'a str,
    pub clipboard_text: &'a str,
    pub cursor_url: Option<&'a UrlMatch>,
    pub line: &'a str,
    /// Cursor offset, or the selection start when a selection is active.
    pub cursor_ch: usize,
}

impl LinkContext<'_> {
    fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    fn selection_span(&self) -> LinkSpan {
        LinkSpan::new(
            self.cursor_ch,
            self.cursor_ch + self.selection.chars().count(),
        )
    }

    fn insertion_point(&self) -> LinkSpan {
        LinkSpan::empty_at(self.cursor_ch.min(self.line.chars().count()))
    }
}

/// The link to create and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLink {
    pub link: LinkInfo,
    /// Range to replace: the selection, the URL under the cursor, or a
    /// zero-width insertion point.
    pub span: LinkSpan,
    /// Pre-select the text field so placeholder text can be overtyped.
    pub should_select_text: bool,
    /// Set only when URL normalization changed the input.
    pub conversion_notice: Option<String>,
}

fn conversion_notice(original: &str, normalized: &str) -> Option<String> {
    (original != normalized).then(|| format!("URL converted: {original} → {normalized}"))
}

fn url_link(original: &str, text: &str, span: LinkSpan, select: bool) -> NewLink {
    let destination = normalize_url(original);
    NewLink {
        conversion_notice: conversion_notice(original.trim(), &destination),
        link: LinkInfo::markdown(text, destination),
        span,
        should_select_text: select,
    }
}

/// A rule builds its link when its guard holds and yields `None` otherwise,
/// so whatever the guard inspected is reused by the builder.
struct Rule {
    name: &'static str,
    try_build: fn(&LinkContext<'_>) -> Option<NewLink>,
}

const RULES: [Rule; 5] = [
    Rule {
        name: "selection is a URL",
        try_build: link_from_url_selection,
    },
    Rule {
        name: "selection is text",
        try_build: link_from_text_selection,
    },
    Rule {
        name: "URL under cursor",
        try_build: link_from_cursor_url,
    },
    Rule {
        name: "clipboard holds a link",
        try_build: link_from_clipboard_link,
    },
    Rule {
        name: "clipboard holds a URL",
        try_build: link_from_clipboard_url,
    },
];

fn link_from_url_selection(ctx: &LinkContext<'_>) -> Option<NewLink> {
    if !ctx.has_selection() || !is_url(ctx.selection) {
        return None;
    }
    let original = ctx.selection.trim();
    Some(url_link(original, original, ctx.selection_span(), true))
}

fn link_from_text_selection(ctx: &LinkContext<'_>) -> Option<NewLink> {
    if !ctx.has_selection() {
        return None;
    }
    let text = ctx.selection.trim();
    if is_url(ctx.clipboard_text) {
        return Some(url_link(ctx.clipboard_text, text, ctx.selection_span(), false));
    }
    Some(NewLink {
        link: LinkInfo::wiki(ctx.clipboard_text, text),
        span: ctx.selection_span(),
        should_select_text: false,
        conversion_notice: None,
    })
}

fn link_from_cursor_url(ctx: &LinkContext<'_>) -> Option<NewLink> {
    let m = ctx.cursor_url?;
    Some(url_link(&m.url, &normalize_url(&m.url), m.span, true))
}

fn link_from_clipboard_link(ctx: &LinkContext<'_>) -> Option<NewLink> {
    let link = parse_clipboard_link(ctx.clipboard_text)?;
    Some(NewLink {
        link,
        span: ctx.insertion_point(),
        should_select_text: false,
        conversion_notice: None,
    })
}

fn link_from_clipboard_url(ctx: &LinkContext<'_>) -> Option<NewLink> {
    if !is_url(ctx.clipboard_text) {
        return None;
    }
    let normalized = normalize_url(ctx.clipboard_text);
    Some(url_link(ctx.clipboard_text, &normalized, ctx.insertion_point(), true))
}

fn fallback(ctx: &LinkContext<'_>) -> NewLink {
    NewLink {
        link: LinkInfo::wiki(ctx.clipboard_text, ""),
        span: ctx.insertion_point(),
        should_select_text: false,
        conversion_notice: None,
    }
}

/// Applies the first matching rule, falling back to an empty wiki link
/// whose destination is the raw clipboard text.
pub fn determine_link_from_context(ctx: &LinkContext<'_>) -> NewLink {
    for rule in &RULES {
        if let Some(link) = (rule.try_build)(ctx) {
            log::debug!("new link: rule '{}' applied", rule.name);
            return link;
        }
    }
    log::debug!("new link: no rule applied, using fallback");
    fallback(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx<'a>(selection: &'a str, clipboard_text: &'a str) -> LinkContext<'a> {
        LinkContext {
            selection,
            clipboard_text,
            cursor_url: None,
            line: "some line of text",
            cursor_ch: 5,
        }
    }

    #[test]
    fn selected_url_is_kept_as_text() {
        let out = determine_link_from_context(&ctx("http://example.com", ""));
        assert_eq!(out.link, LinkInfo::markdown("http://example.com", "http://example.com"));
        assert!(out.should_select_text);
        assert_eq!(out.conversion_notice, None);
        assert_eq!(out.span, LinkSpan::new(5, 23));
    }

    #[test]
    fn selected_www_url_is_normalized_with_notice() {
        let out = determine_link_from_context(&ctx("www.example.com", ""));
        assert_eq!(out.link.text, "www.example.com");
        assert_eq!(out.link.destination, "https://www.example.com");
        assert_eq!(
            out.conversion_notice.as_deref(),
            Some("URL converted: www.example.com → https://www.example.com")
        );
    }

    #[test]
    fn selected_text_with_url_clipboard_makes_markdown() {
        let out = determine_link_from_context(&ctx("docs", "www.rust-lang.org"));
        assert_eq!(out.link, LinkInfo::markdown("docs", "https://www.rust-lang.org"));
        assert!(!out.should_select_text);
        assert!(out.conversion_notice.is_some());
    }

    #[test]
    fn selected_text_with_plain_clipboard_makes_wiki() {
        let out = determine_link_from_context(&ctx("docs", "Some Note"));
        assert_eq!(out.link, LinkInfo::wiki("Some Note", "docs"));
        assert_eq!(out.span, LinkSpan::new(5, 9));
    }

    #[test]
    fn url_under_cursor_uses_its_own_span() {
        let m = UrlMatch {
            url: "www.a.org".to_string(),
            span: LinkSpan::new(4, 13),
        };
        let out = determine_link_from_context(&LinkContext {
            selection: "",
            clipboard_text: "[[ignored]]",
            cursor_url: Some(&m),
            line: "see www.a.org",
            cursor_ch: 7,
        });
        assert_eq!(out.link, LinkInfo::markdown("https://www.a.org", "https://www.a.org"));
        assert_eq!(out.span, LinkSpan::new(4, 13));
        assert!(out.should_select_text);
        assert!(out.conversion_notice.is_some());
    }

    #[test]
    fn clipboard_link_is_taken_verbatim() {
        let out = determine_link_from_context(&ctx("", "[Site](www.x.y)"));
        assert_eq!(out.link, LinkInfo::markdown("Site", "www.x.y"));
        assert_eq!(out.span, LinkSpan::empty_at(5));
        assert_eq!(out.conversion_notice, None);
    }

    #[test]
    fn clipboard_url_fills_both_fields() {
        let out = determine_link_from_context(&ctx("", "https://x.y"));
        assert_eq!(out.link, LinkInfo::markdown("https://x.y", "https://x.y"));
        assert!(out.should_select_text);
        assert_eq!(out.conversion_notice, None);
    }

    #[test]
    fn fallback_uses_raw_clipboard_as_wiki_destination() {
        let out = determine_link_from_context(&ctx("", "just words"));
        assert_eq!(out.link, LinkInfo::wiki("just words", ""));
        let empty = determine_link_from_context(&ctx("", ""));
        assert_eq!(empty.link, LinkInfo::wiki("", ""));
        assert!(!empty.should_select_text);
    }

    #[test]
    fn whitespace_selection_is_still_a_selection() {
        let out = determine_link_from_context(&ctx("  ", "Note"));
        assert_eq!(out.link, LinkInfo::wiki("Note", ""));
        assert_eq!(out.span, LinkSpan::new(5, 7));
        assert!(!out.should_select_text);

        let out = determine_link_from_context(&ctx("   ", "https://x.y"));
        assert_eq!(out.link, LinkInfo::markdown("", "https://x.y"));
        assert_eq!(out.span, LinkSpan::new(5, 8));
        assert!(!out.should_select_text);
    }

    #[test]
    fn clipboard_link_is_used_as_parsed_including_embed() {
        let out = determine_link_from_context(&ctx("", " ![[pic.png|Pic]] "));
        assert_eq!(out.link.destination, "pic.png");
        assert_eq!(out.link.text, "Pic");
        assert!(out.link.is_wiki);
        assert!(out.link.is_embed);
        assert!(!out.should_select_text);
    }

    #[test]
    fn selection_outranks_cursor_url() {
        let m = UrlMatch {
            url: "https://a.org".to_string(),
            span: LinkSpan::new(0, 13),
        };
        let out = determine_link_from_context(&LinkContext {
            selection: "words",
            clipboard_text: "",
            cursor_url: Some(&m),
            line: "https://a.org words",
            cursor_ch: 14,
        });
        assert_eq!(out.link, LinkInfo::wiki("", "words"));
        assert_eq!(out.span, LinkSpan::new(14, 19));
    }

    #[test]
    fn insertion_point_is_clamped_to_line() {
        let mut c = ctx("", "");
        c.cursor_ch = 999;
        assert_eq!(determine_link_from_context(&c).span, LinkSpan::empty_at(17));
    }
}
