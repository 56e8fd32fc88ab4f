//! # Link Parsing
//!
//! Pure, line-local recognition of links and URLs.
//!
//! ## Modules
//!
//! - **`cursor`**: `Cursor` for char-by-char scanning with position tracking
//! - **`kinds`**: delimiter constants owned by each link kind
//! - **`span`**: `LinkSpan` char ranges and `CursorSide`
//! - **`url`**: URL / almost-URL classification, normalization, URL at cursor
//! - **`link`**: `LinkInfo` and its rendering/toggling
//! - **`codec`**: whole-string parsing, destination encoding, validity rules
//! - **`locate`**: link under the cursor, clipboard link parsing
//! - **`query`**: suggester input classification
//!
//! Scanning is index-based: every `try_parse_*` either consumes a complete
//! construct or restores its cursor.

pub mod codec;
pub mod cursor;
pub mod kinds;
pub mod link;
pub mod locate;
pub mod query;
pub mod span;
pub mod url;
