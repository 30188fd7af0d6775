//! Node kind enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a [`ParseNode`](crate::ParseNode).
///
/// Only `Document` and `Element` nodes carry children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Document root.
    Document,
    /// Element with a tag, attributes and children.
    Element,
    /// Character data.
    Text,
    /// `<![CDATA[...]]>` section.
    Cdata,
    /// `<!-- ... -->` comment.
    Comment,
    /// Text consisting only of whitespace.
    Whitespace,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Document,
        NodeKind::Element,
        NodeKind::Text,
        NodeKind::Cdata,
        NodeKind::Comment,
        NodeKind::Whitespace,
    ];

    /// Returns the lowercase name used in configuration files and on the
    /// command line.
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Element => "element",
            NodeKind::Text => "text",
            NodeKind::Cdata => "cdata",
            NodeKind::Comment => "comment",
            NodeKind::Whitespace => "whitespace",
        }
    }

    /// Looks a kind up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Returns true for kinds that may have children.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Element)
    }

    /// Returns true for kinds whose payload is text.
    #[inline]
    pub const fn is_text_like(self) -> bool {
        !self.is_container()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "Document",
            NodeKind::Element => "Element",
            NodeKind::Text => "Text",
            NodeKind::Cdata => "Cdata",
            NodeKind::Comment => "Comment",
            NodeKind::Whitespace => "Whitespace",
        };
        f.write_str(name)
    }
}
