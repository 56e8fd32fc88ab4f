//! # URL Classifier
//!
//! Auto-link heuristics for bare URLs. Only `http://`, `https://` and
//! `www.` forms count; bare domains such as `example.com` are plain text.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{cursor::Cursor, span::LinkSpan};

const HTTP: &str = "http://";
const HTTPS: &str = "https://";
const WWW: &str = "www.";

/// A URL found in a line, with its character span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMatch {
    pub url: String,
    pub span: LinkSpan,
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn has_scheme(s: &str) -> bool {
    strip_prefix_ignore_case(s, HTTP).is_some() || strip_prefix_ignore_case(s, HTTPS).is_some()
}

/// True iff the trimmed input is `http(s)://<non-space>+` or `www.<non-space>+`.
pub fn is_url(s: &str) -> bool {
    let t = s.trim();
    let rest = strip_prefix_ignore_case(t, HTTPS)
        .or_else(|| strip_prefix_ignore_case(t, HTTP))
        .or_else(|| strip_prefix_ignore_case(t, WWW));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.chars().any(char::is_whitespace),
        None => false,
    }
}

/// True iff the trimmed input starts with one of a fixed set of protocol
/// typos, or is a `www.` host with no further dot.
///
/// The pattern set is closed: `htp://`, `htps://`, `http:/x`, `https//`
/// and `www.label`.
pub fn is_almost_url(s: &str) -> bool {
    static ALMOST_URL: OnceLock<Regex> = OnceLock::new();
    let re = ALMOST_URL.get_or_init(|| {
        Regex::new(r"(?i)^(?:htp://|htps://|http:/[^/]|https//|www\.[^.\s]+$)")
            .expect("Invalid almost-URL regex")
    });
    re.is_match(s.trim())
}

/// Adds `https://` to `www.` URLs; everything else comes back trimmed.
pub fn normalize_url(s: &str) -> String {
    let t = s.trim();
    if has_scheme(t) {
        return t.to_string();
    }
    if strip_prefix_ignore_case(t, WWW).is_some() {
        return format!("{HTTPS}{t}");
    }
    t.to_string()
}

/// Attempts to match a URL at the cursor position.
///
/// On success the cursor is left after the URL; on failure it is restored.
fn try_parse_url(cur: &mut Cursor<'_>) -> Option<LinkSpan> {
    let prefix_len = if cur.starts_with_ignore_case(HTTPS) {
        HTTPS.len()
    } else if cur.starts_with_ignore_case(HTTP) {
        HTTP.len()
    } else if cur.starts_with_ignore_case(WWW) {
        WWW.len()
    } else {
        return None;
    };

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(prefix_len);
    if cur.bump_while(|c| !c.is_whitespace()) == 0 {
        *cur = saved;
        return None;
    }
    Some(LinkSpan::new(start, cur.pos()))
}

/// Every URL on the line, left to right, non-overlapping.
pub fn find_urls(line: &str) -> Vec<UrlMatch> {
    let chars: Vec<char> = line.chars().collect();
    let mut cur = Cursor::new(&chars);
    let mut out = vec![];

    while !cur.eof() {
        if let Some(span) = try_parse_url(&mut cur) {
            out.push(UrlMatch {
                url: chars[span.start..span.end].iter().collect(),
                span,
            });
            continue;
        }
        cur.bump();
    }
    out
}

/// The URL whose span touches `ch` (inclusive bounds), if any.
pub fn url_at_cursor(line: &str, ch: usize) -> Option<UrlMatch> {
    find_urls(line).into_iter().find(|m| m.span.touches(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_url_accepts_schemes_and_www() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://example.com/path?q=1"));
        assert!(is_url("www.example.com"));
        assert!(is_url("  HTTPS://EXAMPLE.COM  "));
    }

    #[test]
    fn is_url_rejects_bare_domains_and_blanks() {
        assert!(!is_url("example.com"));
        assert!(!is_url(""));
        assert!(!is_url("   "));
        assert!(!is_url("http://"));
        assert!(!is_url("www."));
        assert!(!is_url("http://exa mple.com"));
        assert!(!is_url("ftp://example.com"));
    }

    #[test]
    fn is_almost_url_flags_protocol_typos() {
        assert!(is_almost_url("htp://example.com"));
        assert!(is_almost_url("htps://example.com"));
        assert!(is_almost_url("http:/example.com"));
        assert!(is_almost_url("https//example.com"));
        assert!(is_almost_url("www.example"));
    }

    #[test]
    fn is_almost_url_ignores_well_formed_and_plain_text() {
        assert!(!is_almost_url("http://example.com"));
        assert!(!is_almost_url("www.example.com"));
        assert!(!is_almost_url("my note"));
        assert!(!is_almost_url(""));
    }

    #[test]
    fn normalize_url_prefixes_www_only() {
        assert_eq!(normalize_url("www.example.com"), "https://www.example.com");
        assert_eq!(normalize_url(" http://example.com "), "http://example.com");
        assert_eq!(normalize_url("example.com"), "example.com");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn normalize_url_is_idempotent() {
        for s in ["www.a.b", "http://x", "note", "  www.y  ", "HTTPS://Z"] {
            let once = normalize_url(s);
            assert_eq!(normalize_url(&once), once);
        }
    }

    #[test]
    fn url_at_cursor_picks_by_position() {
        let line = "see http://a.com and www.b.org now";
        assert_eq!(url_at_cursor(line, 6).unwrap().url, "http://a.com");
        let second = url_at_cursor(line, 25).unwrap();
        assert_eq!(second.url, "www.b.org");
        assert_eq!(second.span, LinkSpan::new(21, 30));
        assert!(url_at_cursor(line, 18).is_none());
    }

    #[test]
    fn url_at_cursor_bounds_are_inclusive() {
        let line = "x http://a.com y";
        assert!(url_at_cursor(line, 2).is_some());
        assert!(url_at_cursor(line, 14).is_some());
        assert!(url_at_cursor(line, 1).is_none());
        assert!(url_at_cursor(line, 15).is_none());
    }

    #[test]
    fn url_with_www_host_is_one_match() {
        let urls = find_urls("http://www.example.com");
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].span, LinkSpan::new(0, 22));
    }

    #[test]
    fn url_at_cursor_past_end_is_none() {
        assert!(url_at_cursor("http://a.com", 500).is_none());
        assert!(url_at_cursor("", 0).is_none());
    }
}
