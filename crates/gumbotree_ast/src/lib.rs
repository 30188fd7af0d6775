//! # gumbotree_ast
//!
//! Parse tree definitions for gumbotree.
//!
//! This crate provides the node model that the traversal cursors navigate.
//! A parser (see `gumbotree_parser`) or a hand-written [`TreeBuilder`] session
//! allocates every node of a document into a single [`TreeArena`]; the tree is
//! then immutable and can be borrowed by any number of cursors.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for Arena allocation
//! - Nodes are handed out as `&'a ParseNode<'a>` and compared by identity
//! - Every node knows its parent, its ordered children and its index
//!   among its siblings
//! - Memory is freed all at once when the arena is dropped
//!
//! ## Example
//!
//! ```rust
//! use gumbotree_ast::{ElementData, NodeKind, TreeArena, TreeBuilder};
//!
//! let arena = TreeArena::new();
//! let mut builder = TreeBuilder::new(&arena);
//!
//! builder.open_element(ElementData::new("div")).unwrap();
//! builder.text("Hello ").unwrap();
//! builder.open_element(ElementData::new("span")).unwrap();
//! builder.text("World").unwrap();
//! builder.close().unwrap();
//! builder.close().unwrap();
//!
//! let div = builder.finish().unwrap();
//! assert_eq!(div.kind(), NodeKind::Element);
//! assert_eq!(div.children().len(), 2);
//! assert_eq!(div.children()[1].children()[0].text(), Some("World"));
//! ```

mod arena;
mod builder;
mod flags;
mod node;
mod node_kind;
mod position;

pub use arena::TreeArena;
pub use builder::{BuildError, TreeBuilder};
pub use flags::ParseFlags;
pub use node::{
    Attribute, DocumentData, ElementData, Namespace, NodeData, ParseNode, QuirksMode, ShallowNode,
    TextData,
};
pub use node_kind::NodeKind;
pub use position::SourcePosition;
