//! # gumbotree_parser
//!
//! Parser layer for gumbotree.
//!
//! This crate provides:
//! - A `TreeParser` trait for anything that turns source text into a parse tree
//! - A built-in markup parser for well-formed XML/XHTML using `quick-xml`
//!
//! ## Architecture
//!
//! Parsers allocate the whole tree into a caller-owned
//! [`TreeArena`](gumbotree_ast::TreeArena) and return its root. The tree is
//! immutable afterwards, which is what the traversal cursors rely on.
//!
//! ## Example
//!
//! ```rust
//! use gumbotree_ast::{NodeKind, TreeArena};
//! use gumbotree_parser::{MarkupParser, TreeParser};
//!
//! let arena = TreeArena::new();
//! let parser = MarkupParser::new();
//! let doc = parser
//!     .parse(&arena, "<div>Hello <span>World</span></div>")
//!     .unwrap();
//!
//! assert_eq!(doc.kind(), NodeKind::Document);
//! assert_eq!(doc.children()[0].tag(), Some("div"));
//! ```

mod error;
mod markup;
mod traits;

pub use error::ParseError;
pub use markup::MarkupParser;
pub use traits::TreeParser;
