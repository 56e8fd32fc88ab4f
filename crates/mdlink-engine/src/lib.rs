pub mod editing;
pub mod error;
pub mod parsing;

// Re-export key types for easier usage
pub use editing::*;
pub use error::LinkError;
pub use parsing::{
    codec::{
        Conversion, LinkKind, LocatedLink, forbidden_wiki_chars, is_valid_markdown_link, is_valid_wiki_link,
        markdown_to_wiki, parse_markdown_link, parse_wiki_link, wiki_to_markdown,
    },
    link::LinkInfo,
    locate::{LinkAtCursor, detect_link_at_cursor, parse_clipboard_link, scan_links, visible_links},
    query::{ParsedQuery, parse_query},
    span::{CursorSide, LinkSpan},
    url::{UrlMatch, find_urls, is_almost_url, is_url, normalize_url, url_at_cursor},
};
