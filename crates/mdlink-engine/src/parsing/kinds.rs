//! # Link Kinds
//!
//! Link-specific types that own their syntax delimiters.
//!
//! - **`WikiLink`**: `[[dest]]`, `[[dest|text]]`
//! - **`MarkdownLink`**: `[text](dest)`
//! - **`Embed`**: the `!` marker either kind may carry
//!
//! Scanners and serializers call these constants; they never hardcode
//! brackets.

pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";
    pub const ALIAS: char = '|';
    /// Separates the file name from a `#heading` or `#^block` suffix.
    pub const SUBPATH: char = '#';
    /// Characters a wiki file name may not contain.
    pub const FORBIDDEN: [char; 8] = ['|', '^', ':', '*', '"', '?', '\\', '/'];
}

pub struct MarkdownLink;

impl MarkdownLink {
    pub const TEXT_OPEN: char = '[';
    pub const TEXT_CLOSE: char = ']';
    pub const DEST_OPEN: char = '(';
    pub const DEST_CLOSE: char = ')';
}

pub struct Embed;

impl Embed {
    pub const MARKER: char = '!';
}
