//! Subtree boundaries shared by both cursor kinds.
//!
//! Every move a cursor makes is a step in this module followed by a filter
//! check. The steps never leave the subtree of the cursor's root, and the
//! root's parent is only ever reported, never visited.

use gumbotree_ast::ParseNode;

/// The subtree a cursor is confined to.
#[derive(Debug, Clone, Copy)]
pub struct Bounds<'a> {
    root: &'a ParseNode<'a>,
}

impl<'a> Bounds<'a> {
    pub fn new(root: &'a ParseNode<'a>) -> Self {
        Self { root }
    }

    #[inline]
    pub fn root(&self) -> &'a ParseNode<'a> {
        self.root
    }

    /// The root's parent: the node just outside the subtree, if any.
    #[inline]
    pub fn boundary(&self) -> Option<&'a ParseNode<'a>> {
        self.root.parent()
    }

    #[inline]
    pub fn is_root(&self, node: &ParseNode<'_>) -> bool {
        ParseNode::same_node(node, self.root)
    }

    /// Returns true if `node` is the root or one of its descendants.
    pub fn contains(&self, node: &ParseNode<'_>) -> bool {
        self.is_root(node) || node.ancestors().any(|ancestor| self.is_root(ancestor))
    }

    /// The node after `node` in document order, without leaving the subtree.
    pub fn next_in_order(&self, node: &'a ParseNode<'a>) -> Option<&'a ParseNode<'a>> {
        if let Some(child) = node.first_child() {
            return Some(child);
        }
        let mut current = node;
        loop {
            if self.is_root(current) {
                return None;
            }
            if let Some(sibling) = current.next_sibling() {
                return Some(sibling);
            }
            current = current.parent()?;
        }
    }

    /// The node before `node` in document order, without leaving the subtree.
    pub fn previous_in_order(&self, node: &'a ParseNode<'a>) -> Option<&'a ParseNode<'a>> {
        if self.is_root(node) {
            return None;
        }
        match node.previous_sibling() {
            Some(sibling) => Some(Self::deepest_last(sibling)),
            None => node.parent(),
        }
    }

    /// The last node of the subtree in document order.
    pub fn last_in_order(&self) -> &'a ParseNode<'a> {
        Self::deepest_last(self.root)
    }

    /// The parent of `node`, unless `node` is the root.
    pub fn parent_of(&self, node: &'a ParseNode<'a>) -> Option<&'a ParseNode<'a>> {
        if self.is_root(node) {
            None
        } else {
            node.parent()
        }
    }

    /// The following sibling of `node`, unless `node` is the root.
    pub fn next_sibling_of(&self, node: &'a ParseNode<'a>) -> Option<&'a ParseNode<'a>> {
        if self.is_root(node) {
            None
        } else {
            node.next_sibling()
        }
    }

    /// The preceding sibling of `node`, unless `node` is the root.
    pub fn previous_sibling_of(&self, node: &'a ParseNode<'a>) -> Option<&'a ParseNode<'a>> {
        if self.is_root(node) {
            None
        } else {
            node.previous_sibling()
        }
    }

    fn deepest_last(node: &'a ParseNode<'a>) -> &'a ParseNode<'a> {
        let mut current = node;
        while let Some(last) = current.last_child() {
            current = last;
        }
        current
    }
}
