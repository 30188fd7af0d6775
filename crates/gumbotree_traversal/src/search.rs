//! Substring search over text nodes.

use memchr::memmem::Finder;
use serde::{Deserialize, Serialize};
use tracing::trace;

use gumbotree_ast::{NodeKind, ParseNode};

use crate::{NodeIterator, WhatToShow};

/// Whether a search on a container looks at its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchDescend {
    /// Only a text node passed in directly can match.
    ExcludeChildren,
    #[default]
    IncludeChildren,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchCase {
    #[default]
    MatchCase,
    /// Compares Unicode-lowercased text.
    CaseInsensitive,
}

enum Matcher {
    Exact(Finder<'static>),
    Folded(String),
}

impl Matcher {
    fn new(needle: &str, case: SearchCase) -> Self {
        match case {
            SearchCase::MatchCase => Matcher::Exact(Finder::new(needle).into_owned()),
            SearchCase::CaseInsensitive => Matcher::Folded(needle.to_lowercase()),
        }
    }

    fn is_match(&self, haystack: &str) -> bool {
        match self {
            Matcher::Exact(finder) => finder.find(haystack.as_bytes()).is_some(),
            Matcher::Folded(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Candidate text nodes for a search starting at `node`, in document order.
fn candidates<'a>(
    node: &'a ParseNode<'a>,
    descend: SearchDescend,
) -> Box<dyn Iterator<Item = &'a ParseNode<'a>> + 'a> {
    match node.kind() {
        NodeKind::Text => Box::new(std::iter::once(node)),
        NodeKind::Document | NodeKind::Element if descend == SearchDescend::IncludeChildren => {
            Box::new(NodeIterator::new(node, WhatToShow::TEXT))
        }
        _ => Box::new(std::iter::empty()),
    }
}

/// Finds the first text node containing `needle`.
///
/// A text node is tested on its own. A document or element is searched
/// through its descendant text nodes when `descend` is
/// [`SearchDescend::IncludeChildren`], and never matches otherwise. Other
/// node kinds never match.
///
/// # Example
///
/// ```rust
/// use gumbotree_ast::TreeArena;
/// use gumbotree_parser::{MarkupParser, TreeParser};
/// use gumbotree_traversal::{search_text, SearchCase, SearchDescend};
///
/// let arena = TreeArena::new();
/// let doc = MarkupParser::new()
///     .parse(&arena, "<div>Hello <span>World</span></div>")
///     .unwrap();
///
/// let found = search_text("world", doc, SearchDescend::IncludeChildren, SearchCase::CaseInsensitive);
/// assert_eq!(found.and_then(|n| n.text()), Some("World"));
/// ```
pub fn search_text<'a>(
    needle: &str,
    node: &'a ParseNode<'a>,
    descend: SearchDescend,
    case: SearchCase,
) -> Option<&'a ParseNode<'a>> {
    let matcher = Matcher::new(needle, case);
    let found = candidates(node, descend)
        .find(|candidate| candidate.text().is_some_and(|text| matcher.is_match(text)));
    trace!("search_text({:?}) -> {}", needle, found.is_some());
    found
}

/// Like [`search_text`], returning every matching text node in document order.
pub fn search_all_text<'a>(
    needle: &str,
    node: &'a ParseNode<'a>,
    descend: SearchDescend,
    case: SearchCase,
) -> Vec<&'a ParseNode<'a>> {
    let matcher = Matcher::new(needle, case);
    candidates(node, descend)
        .filter(|candidate| candidate.text().is_some_and(|text| matcher.is_match(text)))
        .collect()
}
