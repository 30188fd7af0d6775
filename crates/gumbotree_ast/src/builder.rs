//! Incremental construction of parse trees.

use thiserror::Error;

use crate::{
    DocumentData, ElementData, NodeData, NodeKind, ParseFlags, ParseNode, TextData, TreeArena,
};

/// Errors raised when builder calls do not describe a well-formed tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("a tree has exactly one root, but a second top-level node was added")]
    MultipleRoots,

    #[error("a document node can only be the root of a tree")]
    NestedDocument,

    #[error("there is no open node to close")]
    NothingToClose,

    #[error("{0} node(s) are still open")]
    Unclosed(usize),

    #[error("no node was added")]
    Empty,

    #[error("{0} nodes do not carry text")]
    NotTextLike(NodeKind),
}

struct OpenNode<'a> {
    node: &'a ParseNode<'a>,
    children: Vec<&'a ParseNode<'a>>,
}

/// Builds a tree top-down into a [`TreeArena`].
///
/// Containers are opened, filled and closed in document order; a node's
/// parent and index are fixed the moment it is added, and its children are
/// frozen when it is closed.
pub struct TreeBuilder<'a> {
    arena: &'a TreeArena,
    stack: Vec<OpenNode<'a>>,
    root: Option<&'a ParseNode<'a>>,
    next_flags: ParseFlags,
    node_count: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(arena: &'a TreeArena) -> Self {
        Self {
            arena,
            stack: Vec::new(),
            root: None,
            next_flags: ParseFlags::empty(),
            node_count: 0,
        }
    }

    /// The arena nodes are allocated in.
    pub fn arena(&self) -> &'a TreeArena {
        self.arena
    }

    /// Sets the parse flags of the next node added.
    pub fn next_flags(&mut self, flags: ParseFlags) -> &mut Self {
        self.next_flags = flags;
        self
    }

    /// Number of nodes added so far.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of currently open containers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Opens a document node. Documents can only be the root.
    pub fn open_document(&mut self, data: DocumentData<'a>) -> Result<&'a ParseNode<'a>, BuildError> {
        if !self.stack.is_empty() {
            return Err(BuildError::NestedDocument);
        }
        let node = self.attach(NodeKind::Document, NodeData::Document(data))?;
        self.stack.push(OpenNode {
            node,
            children: Vec::new(),
        });
        Ok(node)
    }

    /// Opens an element under the innermost open container.
    pub fn open_element(&mut self, data: ElementData<'a>) -> Result<&'a ParseNode<'a>, BuildError> {
        let node = self.attach(NodeKind::Element, NodeData::Element(data))?;
        self.stack.push(OpenNode {
            node,
            children: Vec::new(),
        });
        Ok(node)
    }

    /// Closes the innermost open container and freezes its children.
    pub fn close(&mut self) -> Result<&'a ParseNode<'a>, BuildError> {
        let open = self.stack.pop().ok_or(BuildError::NothingToClose)?;
        open.node
            .set_children(self.arena.alloc_slice_copy(&open.children));
        Ok(open.node)
    }

    /// Adds a text-like leaf of the given kind.
    pub fn push_text(
        &mut self,
        kind: NodeKind,
        data: TextData<'a>,
    ) -> Result<&'a ParseNode<'a>, BuildError> {
        if !kind.is_text_like() {
            return Err(BuildError::NotTextLike(kind));
        }
        self.attach(kind, NodeData::Text(data))
    }

    /// Adds a `Text` node, copying `text` into the arena.
    pub fn text(&mut self, text: &str) -> Result<&'a ParseNode<'a>, BuildError> {
        self.leaf(NodeKind::Text, text)
    }

    /// Adds a `Whitespace` node, copying `text` into the arena.
    pub fn whitespace(&mut self, text: &str) -> Result<&'a ParseNode<'a>, BuildError> {
        self.leaf(NodeKind::Whitespace, text)
    }

    /// Adds a `Comment` node, copying `text` into the arena.
    pub fn comment(&mut self, text: &str) -> Result<&'a ParseNode<'a>, BuildError> {
        self.leaf(NodeKind::Comment, text)
    }

    /// Adds a `Cdata` node, copying `text` into the arena.
    pub fn cdata(&mut self, text: &str) -> Result<&'a ParseNode<'a>, BuildError> {
        self.leaf(NodeKind::Cdata, text)
    }

    /// Returns the root once every container has been closed.
    pub fn finish(self) -> Result<&'a ParseNode<'a>, BuildError> {
        if !self.stack.is_empty() {
            return Err(BuildError::Unclosed(self.stack.len()));
        }
        self.root.ok_or(BuildError::Empty)
    }

    fn leaf(&mut self, kind: NodeKind, text: &str) -> Result<&'a ParseNode<'a>, BuildError> {
        let text = self.arena.alloc_str(text);
        self.push_text(kind, TextData::new(text))
    }

    fn attach(&mut self, kind: NodeKind, data: NodeData<'a>) -> Result<&'a ParseNode<'a>, BuildError> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(BuildError::MultipleRoots);
        }

        let flags = std::mem::take(&mut self.next_flags);
        let node: &'a ParseNode<'a> = match self.stack.last_mut() {
            Some(open) => {
                let node = self.arena.alloc(ParseNode::new(
                    kind,
                    Some(open.node),
                    open.children.len(),
                    data,
                    flags,
                ));
                open.children.push(node);
                node
            }
            None => {
                let node = self.arena.alloc(ParseNode::new(kind, None, 0, data, flags));
                self.root = Some(node);
                node
            }
        };

        self.node_count += 1;
        Ok(node)
    }
}
