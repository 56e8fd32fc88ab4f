use serde::{Deserialize, Serialize};

use super::{
    codec::{Conversion, markdown_to_wiki, wiki_to_markdown},
    kinds::{Embed, MarkdownLink, WikiLink},
};
use crate::error::LinkError;

/// One link in either notation, independent of where it sits in the text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkInfo {
    pub text: String,
    pub destination: String,
    pub is_wiki: bool,
    /// Leading `!`; survives notation toggles.
    pub is_embed: bool,
}

impl LinkInfo {
    pub fn wiki(destination: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            destination: destination.into(),
            is_wiki: true,
            is_embed: false,
        }
    }

    pub fn markdown(text: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            destination: destination.into(),
            is_wiki: false,
            is_embed: false,
        }
    }

    /// Renders the link as it should appear in the document.
    ///
    /// Wiki links drop the alias when it would repeat the destination;
    /// markdown links never have empty text.
    pub fn to_syntax(&self) -> String {
        let mut out = String::new();
        if self.is_embed {
            out.push(Embed::MARKER);
        }
        if self.is_wiki {
            out.push_str(WikiLink::OPEN);
            out.push_str(&self.destination);
            if !self.text.is_empty() && self.text != self.destination {
                out.push(WikiLink::ALIAS);
                out.push_str(&self.text);
            }
            out.push_str(WikiLink::CLOSE);
        } else {
            let text = if self.text.is_empty() {
                &self.destination
            } else {
                &self.text
            };
            out.push(MarkdownLink::TEXT_OPEN);
            out.push_str(text);
            out.push(MarkdownLink::TEXT_CLOSE);
            out.push(MarkdownLink::DEST_OPEN);
            out.push_str(&self.destination);
            out.push(MarkdownLink::DEST_CLOSE);
        }
        out
    }

    /// Switches notation, converting the destination encoding.
    pub fn toggle_format(&self) -> Result<LinkInfo, LinkError> {
        let destination = if self.is_wiki {
            wiki_to_markdown(&self.destination)
        } else {
            match markdown_to_wiki(&self.destination) {
                Conversion::Converted(d) => d,
                Conversion::Unrepresentable => {
                    return Err(LinkError::UrlNotRepresentable(self.destination.clone()));
                }
            }
        };
        Ok(LinkInfo {
            text: self.text.clone(),
            destination,
            is_wiki: !self.is_wiki,
            is_embed: self.is_embed,
        })
    }

    /// Prepares the link for insertion into text.
    ///
    /// The destination is mandatory; an empty text falls back to it.
    pub fn committed(&self) -> Result<LinkInfo, LinkError> {
        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(LinkError::EmptyDestination);
        }
        let text = match self.text.trim() {
            "" => destination,
            t => t,
        };
        Ok(LinkInfo {
            text: text.to_string(),
            destination: destination.to_string(),
            is_wiki: self.is_wiki,
            is_embed: self.is_embed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::codec::{parse_markdown_link, parse_wiki_link};

    #[test]
    fn wiki_syntax_omits_redundant_alias() {
        assert_eq!(LinkInfo::wiki("note", "note").to_syntax(), "[[note]]");
        assert_eq!(LinkInfo::wiki("note", "").to_syntax(), "[[note]]");
        assert_eq!(LinkInfo::wiki("note", "Shown").to_syntax(), "[[note|Shown]]");
    }

    #[test]
    fn markdown_syntax_falls_back_to_destination() {
        assert_eq!(
            LinkInfo::markdown("", "https://a.b").to_syntax(),
            "[https://a.b](https://a.b)"
        );
        assert_eq!(LinkInfo::markdown("A", "b.md").to_syntax(), "[A](b.md)");
    }

    #[test]
    fn embed_marker_is_emitted_for_both_kinds() {
        let mut link = LinkInfo::wiki("pic.png", "");
        link.is_embed = true;
        assert_eq!(link.to_syntax(), "![[pic.png]]");
        let md = link.toggle_format().unwrap();
        assert_eq!(md.to_syntax(), "![pic.png](pic.png)");
    }

    #[test]
    fn rendered_syntax_parses_back() {
        let wiki = LinkInfo::wiki("My Note", "shown");
        assert_eq!(parse_wiki_link(&wiki.to_syntax()), Some(wiki));
        let md = LinkInfo::markdown("Site", "https://x.y");
        assert_eq!(parse_markdown_link(&md.to_syntax()), Some(md));
    }

    #[test]
    fn toggle_converts_destination_encoding() {
        let md = LinkInfo::wiki("My Note", "Shown").toggle_format().unwrap();
        assert!(!md.is_wiki);
        assert_eq!(md.destination, "My%20Note");
        assert_eq!(md.text, "Shown");

        let back = md.toggle_format().unwrap();
        assert_eq!(back, LinkInfo::wiki("My Note", "Shown"));
    }

    #[test]
    fn toggle_refuses_url_to_wiki() {
        let err = LinkInfo::markdown("x", "https://x.y")
            .toggle_format()
            .unwrap_err();
        assert!(matches!(err, LinkError::UrlNotRepresentable(ref d) if d == "https://x.y"));
    }

    #[test]
    fn committed_requires_destination_and_fills_text() {
        assert!(matches!(
            LinkInfo::wiki("  ", "text").committed(),
            Err(LinkError::EmptyDestination)
        ));
        let link = LinkInfo::markdown(" ", " b.md ").committed().unwrap();
        assert_eq!(link.text, "b.md");
        assert_eq!(link.destination, "b.md");
    }
}
