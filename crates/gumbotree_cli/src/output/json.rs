//! JSON output formatter

use gumbotree_ast::ParseNode;
use miette::{IntoDiagnostic, Result};

/// Prints one shallow JSON object per node, as an array.
pub fn output_json(nodes: &[&ParseNode<'_>]) -> Result<()> {
    let output: Vec<_> = nodes.iter().map(|node| node.shallow()).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
