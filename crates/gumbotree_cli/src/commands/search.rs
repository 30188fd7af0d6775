//! Search command implementation

use std::path::Path;

use gumbotree_ast::TreeArena;
use gumbotree_traversal::{SearchCase, SearchDescend, TraversalConfig, format_node, search_text};
use miette::Result;
use tracing::{debug, info};

/// Prints the first text node containing `needle`.
///
/// Returns `Ok(true)` when nothing matched.
pub fn run_search(
    file: &Path,
    needle: &str,
    ignore_case: bool,
    no_descend: bool,
    config: &TraversalConfig,
) -> Result<bool> {
    let arena = TreeArena::new();
    let root = super::parse_file(&arena, file)?;

    let case = if ignore_case {
        SearchCase::CaseInsensitive
    } else {
        config.search.case()
    };
    let descend = if no_descend {
        SearchDescend::ExcludeChildren
    } else {
        config.search.descend()
    };
    debug!("Searching {:?} ({:?}, {:?})", needle, case, descend);

    match search_text(needle, root, descend, case) {
        Some(node) => {
            println!("{}", format_node(node));
            Ok(false)
        }
        None => {
            info!("No text node contains {:?}", needle);
            Ok(true)
        }
    }
}
