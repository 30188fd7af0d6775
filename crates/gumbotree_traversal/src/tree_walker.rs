//! Structural cursor over a subtree.

use gumbotree_ast::ParseNode;
use tracing::{debug, trace};

use crate::{Bounds, FilterConfig, TraversalError, WhatToShow};

/// Moves between parents, children and siblings of a subtree, seeing only
/// the nodes its filter accepts.
///
/// Every move either lands on an accepted node and makes it current, or
/// returns `None` and leaves the walker where it was. The walker never
/// leaves the subtree of its root, though the root itself can be reached.
///
/// # Example
///
/// ```rust
/// use gumbotree_ast::TreeArena;
/// use gumbotree_parser::{MarkupParser, TreeParser};
/// use gumbotree_traversal::{TreeWalker, WhatToShow};
///
/// let arena = TreeArena::new();
/// let doc = MarkupParser::new()
///     .parse(&arena, "<ul><li>a</li><li>b</li></ul>")
///     .unwrap();
///
/// let mut walker = TreeWalker::new(doc, WhatToShow::ELEMENT);
/// assert_eq!(walker.first_child().and_then(|n| n.tag()), Some("ul"));
/// assert_eq!(walker.first_child().and_then(|n| n.tag()), Some("li"));
/// assert!(walker.next_sibling().is_some());
/// assert!(walker.next_sibling().is_none());
/// assert_eq!(walker.parent_node().and_then(|n| n.tag()), Some("ul"));
/// ```
pub struct TreeWalker<'a, 'f> {
    bounds: Bounds<'a>,
    filter: FilterConfig<'f>,
    current: &'a ParseNode<'a>,
}

impl<'a, 'f> TreeWalker<'a, 'f> {
    /// Creates a walker positioned on `root`.
    pub fn new(root: &'a ParseNode<'a>, filter: impl Into<FilterConfig<'f>>) -> Self {
        let filter = filter.into();
        debug!(
            "Created tree walker on {} with mask {:?}",
            root.kind(),
            filter.what_to_show()
        );
        Self {
            bounds: Bounds::new(root),
            filter,
            current: root,
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
    pub fn current(&self) -> &'a ParseNode<'a> {
        self.current
    }

    /// Repositions the walker. `node` may be any node of the subtree,
    /// accepted or not.
    pub fn set_current(&mut self, node: &'a ParseNode<'a>) -> Result<(), TraversalError> {
        if !self.bounds.contains(node) {
            return Err(TraversalError::OutsideRoot);
        }
        self.current = node;
        Ok(())
    }

    /// Moves to the nearest accepted ancestor, up to and including the root.
    pub fn parent_node(&mut self) -> Option<&'a ParseNode<'a>> {
        let mut node = self.current;
        while let Some(parent) = self.bounds.parent_of(node) {
            if self.filter.accept(parent).is_accept() {
                return self.move_to("parent_node", parent);
            }
            node = parent;
        }
        self.stay("parent_node")
    }

    /// Moves to the first accepted node down the first-child chain.
    ///
    /// Rejected children are descended into, but their siblings are never
    /// tried.
    pub fn first_child(&mut self) -> Option<&'a ParseNode<'a>> {
        let mut candidate = self.current.first_child();
        while let Some(node) = candidate {
            if self.filter.accept(node).is_accept() {
                return self.move_to("first_child", node);
            }
            candidate = node.first_child();
        }
        self.stay("first_child")
    }

    /// Moves to the first accepted node down the last-child chain.
    pub fn last_child(&mut self) -> Option<&'a ParseNode<'a>> {
        let mut candidate = self.current.last_child();
        while let Some(node) = candidate {
            if self.filter.accept(node).is_accept() {
                return self.move_to("last_child", node);
            }
            candidate = node.last_child();
        }
        self.stay("last_child")
    }

    /// Moves to the nearest accepted preceding sibling.
    pub fn previous_sibling(&mut self) -> Option<&'a ParseNode<'a>> {
        let mut candidate = self.bounds.previous_sibling_of(self.current);
        while let Some(node) = candidate {
            if self.filter.accept(node).is_accept() {
                return self.move_to("previous_sibling", node);
            }
            candidate = node.previous_sibling();
        }
        self.stay("previous_sibling")
    }

    /// Moves to the nearest accepted following sibling.
    pub fn next_sibling(&mut self) -> Option<&'a ParseNode<'a>> {
        let mut candidate = self.bounds.next_sibling_of(self.current);
        while let Some(node) = candidate {
            if self.filter.accept(node).is_accept() {
                return self.move_to("next_sibling", node);
            }
            candidate = node.next_sibling();
        }
        self.stay("next_sibling")
    }

    /// Releases the walker. The tree is untouched.
    pub fn detach(self) {
        debug!("Detached tree walker on {}", self.bounds.root().kind());
    }

    fn move_to(&mut self, operation: &str, node: &'a ParseNode<'a>) -> Option<&'a ParseNode<'a>> {
        trace!("TreeWalker::{} -> {}", operation, node.kind());
        self.current = node;
        Some(node)
    }

    fn stay(&self, operation: &str) -> Option<&'a ParseNode<'a>> {
        trace!("TreeWalker::{} -> none", operation);
        None
    }
}
