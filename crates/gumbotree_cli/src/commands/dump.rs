//! Dump command implementation

use std::path::Path;

use gumbotree_ast::{ParseNode, TreeArena};
use gumbotree_traversal::{NodeIterator, TraversalConfig, WhatToShow};
use miette::Result;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::output::output_nodes;

pub fn run_dump(
    file: &Path,
    show: Option<WhatToShow>,
    format: OutputFormat,
    config: &TraversalConfig,
) -> Result<()> {
    let arena = TreeArena::new();
    let root = super::parse_file(&arena, file)?;
    let mask = show.unwrap_or_else(|| config.what_to_show());

    let nodes = collect_nodes(root, mask);
    debug!("Dumping {} nodes with mask {:?}", nodes.len(), mask);
    output_nodes(&nodes, format)
}

/// Every accepted node of the tree in document order, the root included.
fn collect_nodes<'a>(root: &'a ParseNode<'a>, mask: WhatToShow) -> Vec<&'a ParseNode<'a>> {
    let mut iter = NodeIterator::new(root, mask);
    // Stepping back from the root leaves the iterator before the start,
    // where the next step can land on the root itself.
    iter.previous_node();
    iter.collect()
}
