//! Output formatting module

mod json;
mod text;

use gumbotree_ast::ParseNode;
use miette::Result;

use crate::cli::OutputFormat;

pub fn output_nodes(nodes: &[&ParseNode<'_>], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(nodes),
        OutputFormat::Text => {
            text::output_text(nodes);
            Ok(())
        }
    }
}
