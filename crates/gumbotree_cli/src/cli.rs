//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gumbotree_traversal::WhatToShow;

/// gumbotree - Inspect markup parse trees
#[derive(Parser)]
#[command(name = "gumbotree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every node accepted by the mask, in document order
    Dump {
        /// Markup file to parse
        file: PathBuf,

        /// Node kinds to show, comma separated (e.g. "element,text" or "all")
        #[arg(short, long, value_name = "KINDS")]
        show: Option<WhatToShow>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the first text node containing NEEDLE
    Search {
        /// Markup file to parse
        file: PathBuf,

        /// Text to look for
        needle: String,

        /// Compare case-insensitively
        #[arg(short, long)]
        ignore_case: bool,

        /// Only test the root node itself
        #[arg(long)]
        no_descend: bool,
    },

    /// Print an indented outline of the tree
    Walk {
        /// Markup file to parse
        file: PathBuf,

        /// Node kinds to list, comma separated (default: element)
        #[arg(short, long, value_name = "KINDS")]
        show: Option<WhatToShow>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
