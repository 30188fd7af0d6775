//! # gumbotree_traversal
//!
//! DOM Level 2 style traversal over gumbotree parse trees.
//!
//! This crate provides:
//! - [`NodeIterator`]: document-order cursor, forwards and backwards
//! - [`TreeWalker`]: parent, child and sibling moves
//! - [`FilterConfig`]: the what-to-show mask and predicate both cursors share
//! - [`search_text`] and [`format_node`], small consumers built on the above
//! - [`TraversalConfig`]: JSONC configuration for the command-line front end
//!
//! Cursors borrow the tree for as long as they live, so the tree cannot
//! change under them. Dropping or detaching a cursor never touches the tree.
//!
//! ## Example
//!
//! ```rust
//! use gumbotree_ast::TreeArena;
//! use gumbotree_parser::{MarkupParser, TreeParser};
//! use gumbotree_traversal::{NodeIterator, WhatToShow};
//!
//! let arena = TreeArena::new();
//! let doc = MarkupParser::new()
//!     .parse(&arena, "<div>Hello <span>World</span></div>")
//!     .unwrap();
//!
//! let tags: Vec<_> = NodeIterator::new(doc, WhatToShow::ELEMENT)
//!     .filter_map(|node| node.tag())
//!     .collect();
//! assert_eq!(tags, vec!["div", "span"]);
//! ```

mod bounds;
mod config;
mod error;
mod filter;
mod format;
mod node_iterator;
mod search;
mod tree_walker;

pub use bounds::Bounds;
pub use config::{DEFAULT_CONFIG_FILE, SearchConfig, TraversalConfig};
pub use error::TraversalError;
pub use filter::{FilterConfig, NodeFilter, Verdict, WhatToShow};
pub use format::{NodeDump, format_node};
pub use node_iterator::{IteratorPosition, NodeIterator};
pub use search::{SearchCase, SearchDescend, search_all_text, search_text};
pub use tree_walker::TreeWalker;
