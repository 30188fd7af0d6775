//! Human-readable dump of a single node.

use std::borrow::Cow;
use std::fmt;

use gumbotree_ast::{DocumentData, ElementData, NodeData, ParseNode, TextData};

/// Column the `=` of every field line is aligned to.
const VALUE_COLUMN: usize = 21;

/// Renders the fields of one node, without recursing into its children.
///
/// Equivalent to `NodeDump::new(node).to_string()`.
pub fn format_node(node: &ParseNode<'_>) -> String {
    NodeDump::new(node).to_string()
}

/// [`Display`](fmt::Display) adapter behind [`format_node`].
pub struct NodeDump<'n, 'a> {
    node: &'n ParseNode<'a>,
}

impl<'n, 'a> NodeDump<'n, 'a> {
    pub fn new(node: &'n ParseNode<'a>) -> Self {
        Self { node }
    }
}

impl fmt::Display for NodeDump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node;
        writeln!(f, "ParseNode {{")?;
        field(f, 2, "kind", node.kind())?;
        match node.parent() {
            Some(parent) => field(f, 2, "parent", parent.kind())?,
            None => field(f, 2, "parent", "None")?,
        }
        field(f, 2, "index_in_parent", node.index_in_parent())?;
        field(f, 2, "parse_flags", node.parse_flags())?;
        match node.data() {
            NodeData::Document(document) => write_document(f, node, document)?,
            NodeData::Element(element) => write_element(f, node, element)?,
            NodeData::Text(text) => write_text(f, text)?,
        }
        write!(f, "}}")
    }
}

fn field(f: &mut fmt::Formatter<'_>, indent: usize, name: &str, value: impl fmt::Display) -> fmt::Result {
    // Names too long for the column still get one space before `=`.
    let width = VALUE_COLUMN.saturating_sub(indent).max(name.len() + 1);
    writeln!(f, "{:indent$}{:<width$}= {}", "", name, value)
}

fn children(node: &ParseNode<'_>) -> String {
    match node.children().len() {
        0 => "No".to_string(),
        n => format!("Yes ({})", n),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Escapes line breaks and tabs so every field stays on one line.
fn one_line(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r', '\t']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn write_document(
    f: &mut fmt::Formatter<'_>,
    node: &ParseNode<'_>,
    document: &DocumentData<'_>,
) -> fmt::Result {
    writeln!(f, "  document {{")?;
    field(f, 4, "children", children(node))?;
    field(f, 4, "has_doctype", yes_no(document.has_doctype))?;
    field(f, 4, "name", document.name)?;
    field(f, 4, "public_identifier", document.public_identifier)?;
    field(f, 4, "system_identifier", document.system_identifier)?;
    field(f, 4, "quirks_mode", format_args!("{:?}", document.quirks_mode))?;
    writeln!(f, "  }}")
}

fn write_element(
    f: &mut fmt::Formatter<'_>,
    node: &ParseNode<'_>,
    element: &ElementData<'_>,
) -> fmt::Result {
    writeln!(f, "  element {{")?;
    field(f, 4, "children", children(node))?;
    field(f, 4, "tag", element.tag)?;
    field(f, 4, "namespace", format_args!("{:?}", element.namespace))?;
    field(f, 4, "original_tag", one_line(element.original_tag))?;
    field(f, 4, "original_end_tag", one_line(element.original_end_tag))?;
    field(f, 4, "start_pos", element.start_pos)?;
    field(f, 4, "end_pos", element.end_pos)?;
    if element.attributes.is_empty() {
        field(f, 4, "attributes", "None")?;
    } else {
        let attributes: Vec<String> = element
            .attributes
            .iter()
            .map(|attr| format!("{}=\"{}\"", attr.name, one_line(attr.value)))
            .collect();
        field(f, 4, "attributes", attributes.join(" "))?;
    }
    writeln!(f, "  }}")
}

fn write_text(f: &mut fmt::Formatter<'_>, text: &TextData<'_>) -> fmt::Result {
    writeln!(f, "  text {{")?;
    field(f, 4, "text", one_line(text.text))?;
    field(f, 4, "original_text", one_line(text.original_text))?;
    field(f, 4, "start_pos", text.start_pos)?;
    writeln!(f, "  }}")
}
