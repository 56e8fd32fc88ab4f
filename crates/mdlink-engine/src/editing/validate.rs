//! # Link Validator
//!
//! Live checks for the edit form. An empty destination is accepted here;
//! refusing to submit one is the form's job (see `LinkInfo::committed`).

use serde::{Deserialize, Serialize};

use crate::parsing::{
    codec::forbidden_wiki_chars,
    url::{is_almost_url, is_url},
};

/// Destinations longer than this many chars draw a caution.
pub const MAX_DESTINATION_LENGTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks validity.
    Error,
    /// Shown to the user but does not block.
    Caution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub warnings: Vec<ValidationWarning>,
    pub should_highlight_dest: bool,
    pub should_highlight_text: bool,
}

impl ValidationReport {
    fn ok() -> Self {
        Self {
            is_valid: true,
            ..Default::default()
        }
    }

    fn dest(&mut self, severity: Severity, message: String) {
        self.should_highlight_dest = true;
        self.push(severity, message);
    }

    fn text(&mut self, message: String) {
        self.should_highlight_text = true;
        self.push(Severity::Caution, message);
    }

    fn push(&mut self, severity: Severity, message: String) {
        if severity == Severity::Error {
            self.is_valid = false;
        }
        self.warnings.push(ValidationWarning { severity, message });
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings
            .iter()
            .filter(|w| w.severity == Severity::Error)
    }
}

pub fn validate_link_destination(destination: &str, text: &str, is_wiki: bool) -> ValidationReport {
    let mut report = ValidationReport::ok();
    if destination.trim().is_empty() {
        return report;
    }

    if is_wiki {
        if is_url(destination) {
            report.dest(
                Severity::Error,
                "Wiki links cannot reference external URLs; switch to a markdown link".to_string(),
            );
        } else {
            let forbidden = forbidden_wiki_chars(destination);
            if !forbidden.is_empty() {
                let listed: Vec<String> = forbidden.iter().map(|c| c.to_string()).collect();
                report.dest(
                    Severity::Error,
                    format!(
                        "Wiki link file names cannot contain: {}",
                        listed.join(" ")
                    ),
                );
            }
        }
    } else if !is_url(destination) && destination.contains(' ') {
        report.dest(
            Severity::Caution,
            "Markdown link destination contains unencoded spaces; use %20".to_string(),
        );
    }

    if is_almost_url(destination) && !is_url(destination) {
        report.dest(
            Severity::Caution,
            "Destination looks like a URL with a mistyped protocol".to_string(),
        );
    }

    let len = destination.chars().count();
    if len > MAX_DESTINATION_LENGTH {
        report.dest(
            Severity::Caution,
            format!("Destination is unusually long ({len} characters)"),
        );
    }

    if is_wiki {
        if text.contains("]]") || text.contains('|') {
            report.text("Link text containing ]] or | will break the wiki link".to_string());
        }
    } else if text.contains(']') {
        report.text("Link text containing ] will break the markdown link".to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_destination_is_valid_and_silent() {
        let r = validate_link_destination("", "anything", true);
        assert!(r.is_valid);
        assert!(r.warnings.is_empty());
        assert!(!r.should_highlight_dest);
    }

    #[test]
    fn wiki_url_is_an_error() {
        let r = validate_link_destination("https://example.com", "", true);
        assert!(!r.is_valid);
        assert_eq!(r.errors().count(), 1);
        assert!(r.should_highlight_dest);
    }

    #[test]
    fn wiki_forbidden_characters_are_named() {
        let r = validate_link_destination("a:b?c", "", true);
        assert!(!r.is_valid);
        assert_eq!(r.warnings[0].message, "Wiki link file names cannot contain: : ?");
    }

    #[test]
    fn wiki_heading_suffix_is_fine() {
        let r = validate_link_destination("Note#^block", "Note", true);
        assert!(r.is_valid);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn markdown_spaces_are_a_caution_only() {
        let r = validate_link_destination("My Note.md", "x", false);
        assert!(r.is_valid);
        assert_eq!(r.warnings.len(), 1);
        assert_eq!(r.warnings[0].severity, Severity::Caution);
        assert!(r.should_highlight_dest);

        assert!(validate_link_destination("My%20Note.md", "x", false).warnings.is_empty());
    }

    #[test]
    fn almost_url_cautions_in_both_formats() {
        let md = validate_link_destination("htp://example.com", "", false);
        assert!(md.is_valid);
        assert_eq!(md.warnings.len(), 1);

        let wiki = validate_link_destination("htps://example.com", "", true);
        assert!(!wiki.is_valid, "':' and '/' are still forbidden in wiki names");
        assert!(wiki.warnings.iter().any(|w| w.severity == Severity::Caution));
    }

    #[test]
    fn long_destination_cautions() {
        let long = "a".repeat(MAX_DESTINATION_LENGTH + 1);
        let r = validate_link_destination(&long, "", false);
        assert!(r.is_valid);
        assert_eq!(r.warnings.len(), 1);

        let exact = "a".repeat(MAX_DESTINATION_LENGTH);
        assert!(validate_link_destination(&exact, "", false).warnings.is_empty());
    }

    #[test]
    fn breaking_text_highlights_text_field() {
        let r = validate_link_destination("note", "a|b", true);
        assert!(r.is_valid);
        assert!(r.should_highlight_text);
        assert!(!r.should_highlight_dest);

        let md = validate_link_destination("x.md", "a]b", false);
        assert!(md.should_highlight_text);
    }
}
