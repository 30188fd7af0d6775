//! Node acceptance: what-to-show masks, verdicts and filter predicates.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use gumbotree_ast::{NodeKind, ParseNode};

use crate::TraversalError;

bitflags! {
    /// Node kinds a cursor may return.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WhatToShow: u32 {
        const DOCUMENT = 1 << 0;
        const ELEMENT = 1 << 1;
        const TEXT = 1 << 2;
        const CDATA = 1 << 3;
        const COMMENT = 1 << 4;
        const WHITESPACE = 1 << 5;
    }
}

impl WhatToShow {
    /// Every node kind.
    pub const ALL: WhatToShow = WhatToShow::all();

    /// Legacy "show everything" value accepted by [`WhatToShow::from_bits_checked`].
    pub const LEGACY_SHOW_ALL: u32 = 0x00FF_FFFF;

    /// Converts a raw mask, rejecting bits that name no node kind.
    ///
    /// The legacy `0xFFFFFF` sentinel is read as [`WhatToShow::ALL`].
    pub fn from_bits_checked(bits: u32) -> Result<Self, TraversalError> {
        if bits == Self::LEGACY_SHOW_ALL {
            return Ok(Self::ALL);
        }
        Self::from_bits(bits).ok_or(TraversalError::UnknownShowBits(bits & !Self::all().bits()))
    }

    /// Builds a mask from a list of kinds.
    pub fn from_kinds(kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        kinds
            .into_iter()
            .fold(Self::empty(), |mask, kind| mask | Self::from(kind))
    }

    /// Returns true if nodes of `kind` pass the kind test.
    #[inline]
    pub fn shows(self, kind: NodeKind) -> bool {
        self.contains(Self::from(kind))
    }
}

impl From<NodeKind> for WhatToShow {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Document => Self::DOCUMENT,
            NodeKind::Element => Self::ELEMENT,
            NodeKind::Text => Self::TEXT,
            NodeKind::Cdata => Self::CDATA,
            NodeKind::Comment => Self::COMMENT,
            NodeKind::Whitespace => Self::WHITESPACE,
        }
    }
}

impl FromStr for WhatToShow {
    type Err = TraversalError;

    /// Parses a comma-separated list of kind names, or `all` / `none`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = Self::empty();
        for name in s.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            if name.eq_ignore_ascii_case("all") {
                mask |= Self::ALL;
            } else if name.eq_ignore_ascii_case("none") {
                continue;
            } else {
                let kind = NodeKind::from_name(name)
                    .ok_or_else(|| TraversalError::UnknownKind(name.to_string()))?;
                mask |= Self::from(kind);
            }
        }
        Ok(mask)
    }
}

/// Outcome of testing a node against a filter.
///
/// Cursors treat [`Verdict::Reject`] exactly like [`Verdict::Skip`]: the node
/// is not returned, but its descendants are still visited. Rejecting does not
/// prune the subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Verdict {
    Accept = 1,
    Reject = 2,
    Skip = 3,
}

impl Verdict {
    #[inline]
    pub fn is_accept(self) -> bool {
        self == Verdict::Accept
    }
}

/// A caller-supplied acceptance test.
///
/// Implemented for every `Fn(&ParseNode<'_>) -> Verdict`.
pub trait NodeFilter {
    fn accept_node(&self, node: &ParseNode<'_>) -> Verdict;
}

impl<F> NodeFilter for F
where
    F: Fn(&ParseNode<'_>) -> Verdict,
{
    fn accept_node(&self, node: &ParseNode<'_>) -> Verdict {
        self(node)
    }
}

/// A what-to-show mask plus an optional predicate.
///
/// # Example
///
/// ```rust
/// use gumbotree_ast::{ElementData, TreeArena, TreeBuilder};
/// use gumbotree_traversal::{FilterConfig, Verdict, WhatToShow};
///
/// let arena = TreeArena::new();
/// let mut builder = TreeBuilder::new(&arena);
/// builder.open_element(ElementData::new("p")).unwrap();
/// builder.close().unwrap();
/// let p = builder.finish().unwrap();
///
/// let filter = FilterConfig::new(WhatToShow::ELEMENT).with_filter(|node| {
///     if node.tag() == Some("p") { Verdict::Accept } else { Verdict::Skip }
/// });
/// assert_eq!(filter.accept(p), Verdict::Accept);
/// ```
pub struct FilterConfig<'f> {
    what_to_show: WhatToShow,
    filter: Option<Box<dyn NodeFilter + 'f>>,
}

impl<'f> FilterConfig<'f> {
    /// Creates a filter that only applies the kind test.
    pub fn new(what_to_show: WhatToShow) -> Self {
        Self {
            what_to_show,
            filter: None,
        }
    }

    /// Accepts every node.
    pub fn show_all() -> Self {
        Self::new(WhatToShow::ALL)
    }

    /// Adds a predicate consulted for nodes that pass the kind test.
    pub fn with_filter<F>(self, filter: F) -> Self
    where
        F: Fn(&ParseNode<'_>) -> Verdict + 'f,
    {
        self.with_node_filter(filter)
    }

    /// Like [`FilterConfig::with_filter`], for types implementing [`NodeFilter`].
    pub fn with_node_filter(mut self, filter: impl NodeFilter + 'f) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    #[inline]
    pub fn what_to_show(&self) -> WhatToShow {
        self.what_to_show
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Decides whether `node` is visible to a cursor.
    ///
    /// An empty mask rejects everything. Otherwise the node's kind bit must be
    /// set, and then the predicate, if any, has the final say. The predicate
    /// is never called for nodes that fail the kind test.
    pub fn accept(&self, node: &ParseNode<'_>) -> Verdict {
        if self.what_to_show.is_empty() || !self.what_to_show.shows(node.kind()) {
            return Verdict::Reject;
        }
        match &self.filter {
            Some(filter) => filter.accept_node(node),
            None => Verdict::Accept,
        }
    }
}

impl Default for FilterConfig<'_> {
    fn default() -> Self {
        Self::show_all()
    }
}

impl From<WhatToShow> for FilterConfig<'_> {
    fn from(what_to_show: WhatToShow) -> Self {
        Self::new(what_to_show)
    }
}

impl fmt::Debug for FilterConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterConfig")
            .field("what_to_show", &self.what_to_show)
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}
