//! Document-order cursor over a subtree.

use std::iter::FusedIterator;

use gumbotree_ast::ParseNode;
use tracing::{debug, trace};

use crate::{Bounds, FilterConfig, WhatToShow};

/// Where a [`NodeIterator`] currently is.
#[derive(Debug, Clone, Copy)]
pub enum IteratorPosition<'a> {
    /// Before the first node; reached by running [`NodeIterator::previous_node`] dry.
    BeforeStart,
    /// On a node inside the subtree.
    At(&'a ParseNode<'a>),
    /// After the last node; reached by running [`NodeIterator::next_node`] dry.
    AfterEnd,
}

/// Walks the accepted nodes of a subtree in document order, in both
/// directions.
///
/// The iterator starts on its root. The first call to
/// [`next_node`](Self::next_node) therefore returns the first accepted
/// descendant, not the root itself; the root is only returned when stepping
/// backwards onto it, or forwards after the iterator has run off the start.
///
/// Nodes the filter does not accept are stepped over, but their descendants
/// are still visited.
///
/// # Example
///
/// ```rust
/// use gumbotree_ast::TreeArena;
/// use gumbotree_parser::{MarkupParser, TreeParser};
/// use gumbotree_traversal::{FilterConfig, NodeIterator, WhatToShow};
///
/// let arena = TreeArena::new();
/// let doc = MarkupParser::new()
///     .parse(&arena, "<div>Hello <span>World</span></div>")
///     .unwrap();
///
/// let iter = NodeIterator::new(doc, FilterConfig::new(WhatToShow::TEXT));
/// let texts: Vec<_> = iter.filter_map(|node| node.text()).collect();
/// assert_eq!(texts, vec!["Hello ", "World"]);
/// ```
pub struct NodeIterator<'a, 'f> {
    bounds: Bounds<'a>,
    filter: FilterConfig<'f>,
    position: IteratorPosition<'a>,
}

impl<'a, 'f> NodeIterator<'a, 'f> {
    /// Creates an iterator over the subtree rooted at `root`.
    pub fn new(root: &'a ParseNode<'a>, filter: impl Into<FilterConfig<'f>>) -> Self {
        let filter = filter.into();
        debug!(
            "Created node iterator on {} with mask {:?}",
            root.kind(),
            filter.what_to_show()
        );
        Self {
            bounds: Bounds::new(root),
            filter,
            position: IteratorPosition::At(root),
        }
    }

    #[inline]
    pub fn root(&self) -> &'a ParseNode<'a> {
        self.bounds.root()
    }

    #[inline]
    pub fn what_to_show(&self) -> WhatToShow {
        self.filter.what_to_show()
    }

    #[inline]
    pub fn filter(&self) -> &FilterConfig<'f> {
        &self.filter
    }

    #[inline]
    pub fn position(&self) -> IteratorPosition<'a> {
        self.position
    }

    /// The node the iterator is on, if it is not past either end.
    pub fn current(&self) -> Option<&'a ParseNode<'a>> {
        match self.position {
            IteratorPosition::At(node) => Some(node),
            IteratorPosition::BeforeStart | IteratorPosition::AfterEnd => None,
        }
    }

    /// Moves to the next accepted node in document order.
    ///
    /// Returns `None`, and moves past the end, once the subtree is exhausted.
    pub fn next_node(&mut self) -> Option<&'a ParseNode<'a>> {
        let mut candidate = match self.position {
            IteratorPosition::BeforeStart => Some(self.bounds.root()),
            IteratorPosition::At(node) => self.bounds.next_in_order(node),
            IteratorPosition::AfterEnd => None,
        };

        while let Some(node) = candidate {
            if self.filter.accept(node).is_accept() {
                trace!("NodeIterator::next_node -> {}", node.kind());
                self.position = IteratorPosition::At(node);
                return Some(node);
            }
            candidate = self.bounds.next_in_order(node);
        }

        trace!("NodeIterator::next_node -> end");
        self.position = IteratorPosition::AfterEnd;
        None
    }

    /// Moves to the previous accepted node in document order.
    ///
    /// The root is a valid result. Returns `None`, and moves before the start,
    /// once the subtree is exhausted.
    pub fn previous_node(&mut self) -> Option<&'a ParseNode<'a>> {
        let mut candidate = match self.position {
            IteratorPosition::BeforeStart => None,
            IteratorPosition::At(node) => self.bounds.previous_in_order(node),
            IteratorPosition::AfterEnd => Some(self.bounds.last_in_order()),
        };

        while let Some(node) = candidate {
            if self.filter.accept(node).is_accept() {
                trace!("NodeIterator::previous_node -> {}", node.kind());
                self.position = IteratorPosition::At(node);
                return Some(node);
            }
            candidate = self.bounds.previous_in_order(node);
        }

        trace!("NodeIterator::previous_node -> start");
        self.position = IteratorPosition::BeforeStart;
        None
    }

    /// Releases the iterator. The tree is untouched.
    pub fn detach(self) {
        debug!("Detached node iterator on {}", self.bounds.root().kind());
    }
}

impl<'a> Iterator for NodeIterator<'a, '_> {
    type Item = &'a ParseNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node()
    }
}

impl FusedIterator for NodeIterator<'_, '_> {}
