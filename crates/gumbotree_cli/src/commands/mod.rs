//! Command implementations

pub mod dump;
pub mod search;
pub mod walk;

use std::path::Path;

use gumbotree_ast::{ParseNode, SourcePosition, TreeArena};
use gumbotree_parser::{MarkupParser, TreeParser};
use gumbotree_traversal::{DEFAULT_CONFIG_FILE, TraversalConfig};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info, warn};

/// Loads the configuration from `path`, or from `.gumbotree.jsonc` in the
/// working directory, falling back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<TraversalConfig> {
    if let Some(path) = path {
        info!("Using config: {}", path.display());
        return TraversalConfig::from_file(path).into_diagnostic();
    }

    match TraversalConfig::discover(".").into_diagnostic()? {
        Some(config) => {
            info!("Using config: {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(TraversalConfig::new())
        }
    }
}

/// Reads and parses `path` into `arena`.
pub fn parse_file<'a>(arena: &'a TreeArena, path: &Path) -> Result<&'a ParseNode<'a>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;

    let parser = MarkupParser::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        if !parser.can_parse(ext) {
            warn!(
                "Unknown extension .{}, parsing {} as {}",
                ext,
                path.display(),
                parser.name()
            );
        }
    }

    let root = parser.parse(arena, &source).map_err(|e| match e.offset() {
        Some(offset) => miette::miette!(
            "Failed to parse {} ({}): {}",
            path.display(),
            SourcePosition::from_offset(&source, offset),
            e
        ),
        None => miette::miette!("Failed to parse {}: {}", path.display(), e),
    })?;
    debug!("Parsed {} ({} bytes)", path.display(), source.len());
    Ok(root)
}
