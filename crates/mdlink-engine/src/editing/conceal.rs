//! Which parts of a line are pure link syntax that the host may hide
//! while the cursor is elsewhere. Drawing is left to the host.

use serde::{Deserialize, Serialize};

use crate::parsing::{codec::LinkKind, locate::visible_links, span::LinkSpan};

/// A link whose syntax can be concealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcealedLink {
    pub kind: LinkKind,
    pub span: LinkSpan,
    /// The part left on screen: wiki alias or destination, markdown text.
    pub shown: LinkSpan,
    /// Syntax before and after `shown`; empty ranges are omitted.
    pub hidden: Vec<LinkSpan>,
}

/// Concealment plan for every link the cursor is not touching.
pub fn conceal_ranges(line: &str, cursor_ch: Option<usize>) -> Vec<ConcealedLink> {
    visible_links(line)
        .into_iter()
        .filter(|l| !cursor_ch.is_some_and(|ch| l.span.touches(ch)))
        .map(|l| {
            let shown = l.text_span.unwrap_or(l.destination_span);
            let hidden = [
                LinkSpan::new(l.span.start, shown.start),
                LinkSpan::new(shown.end, l.span.end),
            ]
            .into_iter()
            .filter(|sp| !sp.is_empty())
            .collect();
            ConcealedLink {
                kind: l.kind(),
                span: l.span,
                shown,
                hidden,
            }
        })
        .collect()
}
