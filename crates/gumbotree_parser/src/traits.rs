//! Parser trait definition.

use gumbotree_ast::{ParseNode, TreeArena};

use crate::ParseError;

/// Trait for parsing source text into a parse tree.
///
/// # Example
///
/// ```rust
/// use gumbotree_ast::{ElementData, ParseNode, TreeArena, TreeBuilder};
/// use gumbotree_parser::{ParseError, TreeParser};
///
/// /// Wraps every line of the input in a `<p>` element.
/// struct LineParser;
///
/// impl TreeParser for LineParser {
///     fn name(&self) -> &str {
///         "lines"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["txt"]
///     }
///
///     fn parse<'a>(
///         &self,
///         arena: &'a TreeArena,
///         source: &str,
///     ) -> Result<&'a ParseNode<'a>, ParseError> {
///         let mut builder = TreeBuilder::new(arena);
///         builder.open_element(ElementData::new("body"))?;
///         for line in source.lines() {
///             builder.open_element(ElementData::new("p"))?;
///             builder.text(line)?;
///             builder.close()?;
///         }
///         builder.close()?;
///         Ok(builder.finish()?)
///     }
/// }
///
/// let arena = TreeArena::new();
/// let body = LineParser.parse(&arena, "a\nb").unwrap();
/// assert_eq!(body.children().len(), 2);
/// assert!(LineParser.can_parse("TXT"));
/// ```
pub trait TreeParser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["xhtml", "xml"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree allocated in `arena`.
    ///
    /// # Returns
    ///
    /// The root node of the tree, or an error if parsing fails.
    fn parse<'a>(&self, arena: &'a TreeArena, source: &str)
    -> Result<&'a ParseNode<'a>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
