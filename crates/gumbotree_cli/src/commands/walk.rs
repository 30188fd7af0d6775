//! Walk command implementation

use std::path::Path;

use gumbotree_ast::{NodeData, NodeKind, ParseNode, TreeArena};
use gumbotree_traversal::{FilterConfig, TraversalConfig, TreeWalker, WhatToShow};
use miette::Result;
use tracing::debug;

pub fn run_walk(file: &Path, show: Option<WhatToShow>, config: &TraversalConfig) -> Result<()> {
    let arena = TreeArena::new();
    let root = super::parse_file(&arena, file)?;

    let mask = match (show, &config.show) {
        (Some(mask), _) => mask,
        (None, Some(_)) => config.what_to_show(),
        (None, None) => WhatToShow::ELEMENT,
    };
    debug!("Walking with mask {:?}", mask);

    for line in outline(root, mask) {
        println!("{}", line);
    }
    Ok(())
}

/// One indented line per node whose kind is in `mask`, in document order.
///
/// The walker itself shows every node so that text between elements never
/// hides a later sibling; `mask` only decides what gets printed.
fn outline<'a>(root: &'a ParseNode<'a>, mask: WhatToShow) -> Vec<String> {
    let mut walker = TreeWalker::new(root, FilterConfig::show_all());
    let mut lines = Vec::new();
    let mut depth = 0;

    loop {
        let node = walker.current();
        if mask.shows(node.kind()) {
            lines.push(format!("{}{}", "  ".repeat(depth), label(node)));
        }

        if walker.first_child().is_some() {
            depth += 1;
            continue;
        }
        while walker.next_sibling().is_none() {
            if walker.parent_node().is_none() {
                return lines;
            }
            depth -= 1;
        }
    }
}

fn label(node: &ParseNode<'_>) -> String {
    match (node.kind(), node.data()) {
        (_, NodeData::Document(_)) => "#document".to_string(),
        (_, NodeData::Element(element)) => element.tag.to_string(),
        (NodeKind::Whitespace, _) => "#whitespace".to_string(),
        (kind, NodeData::Text(text)) => format!("#{} {:?}", kind.name(), text.text),
    }
}
