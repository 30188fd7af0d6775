//! Text output formatter

use gumbotree_ast::ParseNode;
use gumbotree_traversal::NodeDump;

pub fn output_text(nodes: &[&ParseNode<'_>]) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", NodeDump::new(node));
    }
    println!();
    println!("{} nodes", nodes.len());
}
