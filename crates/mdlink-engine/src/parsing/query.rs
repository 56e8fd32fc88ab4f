//! Classification of the text typed into the wiki destination suggester.
//!
//! Every keystroke produces a fresh [`ParsedQuery`]; nothing is cached.

use serde::{Deserialize, Serialize};

/// What the user is searching for while typing a wiki destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParsedQuery {
    /// `note`
    File { search: Option<String> },
    /// `note#heading`
    FileHeading {
        file: Option<String>,
        search: Option<String>,
    },
    /// `note#^block`
    FileBlock {
        file: Option<String>,
        search: Option<String>,
    },
    /// `##heading`, across every file
    GlobalHeading { search: Option<String> },
    /// `#heading`
    CurrentFileHeading { search: Option<String> },
    /// `#^block`
    CurrentFileBlock { search: Option<String> },
    /// `^block`
    BlockNoHash { search: Option<String> },
    /// `note^block`
    FileBlockNoHash {
        file: Option<String>,
        search: Option<String>,
    },
}

fn part(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl ParsedQuery {
    pub fn file(&self) -> Option<&str> {
        match self {
            ParsedQuery::FileHeading { file, .. }
            | ParsedQuery::FileBlock { file, .. }
            | ParsedQuery::FileBlockNoHash { file, .. } => file.as_deref(),
            _ => None,
        }
    }

    pub fn search(&self) -> Option<&str> {
        match self {
            ParsedQuery::File { search }
            | ParsedQuery::FileHeading { search, .. }
            | ParsedQuery::FileBlock { search, .. }
            | ParsedQuery::GlobalHeading { search }
            | ParsedQuery::CurrentFileHeading { search }
            | ParsedQuery::CurrentFileBlock { search }
            | ParsedQuery::BlockNoHash { search }
            | ParsedQuery::FileBlockNoHash { search, .. } => search.as_deref(),
        }
    }

    /// True for the variants that look up blocks rather than files or headings.
    pub fn targets_block(&self) -> bool {
        matches!(
            self,
            ParsedQuery::FileBlock { .. }
                | ParsedQuery::CurrentFileBlock { .. }
                | ParsedQuery::BlockNoHash { .. }
                | ParsedQuery::FileBlockNoHash { .. }
        )
    }
}

/// Classifies suggester input; prefixes are checked before infixes.
pub fn parse_query(input: &str) -> ParsedQuery {
    let q = input.trim();

    if let Some(rest) = q.strip_prefix("##") {
        return ParsedQuery::GlobalHeading { search: part(rest) };
    }
    if let Some(rest) = q.strip_prefix("#^") {
        return ParsedQuery::CurrentFileBlock { search: part(rest) };
    }
    if let Some(rest) = q.strip_prefix('#') {
        return ParsedQuery::CurrentFileHeading { search: part(rest) };
    }
    if let Some(rest) = q.strip_prefix('^') {
        return ParsedQuery::BlockNoHash { search: part(rest) };
    }
    if let Some((file, rest)) = q.split_once("#^") {
        return ParsedQuery::FileBlock {
            file: part(file),
            search: part(rest),
        };
    }
    if let Some((file, rest)) = q.split_once('#') {
        return ParsedQuery::FileHeading {
            file: part(file),
            search: part(rest),
        };
    }
    if let Some((file, rest)) = q.split_once('^') {
        return ParsedQuery::FileBlockNoHash {
            file: part(file),
            search: part(rest),
        };
    }
    ParsedQuery::File { search: part(q) }
}
