//! ParseNode definition.
//!
//! The node type every cursor in gumbotree navigates.

use std::cell::OnceCell;
use std::fmt;

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::{NodeKind, ParseFlags, SourcePosition};

/// A node in a parse tree.
///
/// Nodes live in a [`TreeArena`](crate::TreeArena) and are only ever handed
/// out as shared references, so a tree cannot change while anything borrows
/// it. Two handles denote the same node iff they point at the same
/// allocation; use [`ParseNode::same_node`] to compare them.
///
/// # Invariants
///
/// - `parent` is `None` only for the absolute root of a tree.
/// - `index_in_parent` is the node's offset in `parent.children()`.
/// - Only `Document` and `Element` nodes have children.
///
/// The [`TreeBuilder`](crate::TreeBuilder) is the only way to create nodes,
/// which keeps these invariants true by construction.
pub struct ParseNode<'a> {
    kind: NodeKind,
    parent: Option<&'a ParseNode<'a>>,
    index_in_parent: usize,
    children: OnceCell<&'a [&'a ParseNode<'a>]>,
    data: NodeData<'a>,
    parse_flags: ParseFlags,
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, Copy)]
pub enum NodeData<'a> {
    Document(DocumentData<'a>),
    Element(ElementData<'a>),
    /// Shared by text, CDATA, comment and whitespace nodes.
    Text(TextData<'a>),
}

/// Document type information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentData<'a> {
    pub has_doctype: bool,
    pub name: &'a str,
    pub public_identifier: &'a str,
    pub system_identifier: &'a str,
    pub quirks_mode: QuirksMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuirksMode {
    #[default]
    NoQuirks,
    Quirks,
    LimitedQuirks,
}

/// Element payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementData<'a> {
    /// Normalized (lowercase, prefix-free) tag name.
    pub tag: &'a str,
    pub namespace: Namespace,
    pub attributes: &'a [Attribute<'a>],
    /// Start tag exactly as written in the source, empty if implied.
    pub original_tag: &'a str,
    /// End tag exactly as written in the source, empty if implied.
    pub original_end_tag: &'a str,
    pub start_pos: SourcePosition,
    pub end_pos: SourcePosition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Payload of text-like nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextData<'a> {
    /// Decoded text.
    pub text: &'a str,
    /// Text exactly as written in the source.
    pub original_text: &'a str,
    pub start_pos: SourcePosition,
}

impl<'a> ParseNode<'a> {
    pub(crate) fn new(
        kind: NodeKind,
        parent: Option<&'a ParseNode<'a>>,
        index_in_parent: usize,
        data: NodeData<'a>,
        parse_flags: ParseFlags,
    ) -> Self {
        Self {
            kind,
            parent,
            index_in_parent,
            children: OnceCell::new(),
            data,
            parse_flags,
        }
    }

    /// Fixes the children of a node. Only the first call has an effect.
    pub(crate) fn set_children(&self, children: &'a [&'a ParseNode<'a>]) {
        let _ = self.children.set(children);
    }

    /// Returns true if both handles point at the same node.
    #[inline]
    pub fn same_node(a: &ParseNode<'_>, b: &ParseNode<'_>) -> bool {
        std::ptr::eq(
            a as *const ParseNode<'_> as *const (),
            b as *const ParseNode<'_> as *const (),
        )
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The parent node, `None` for the absolute root.
    #[inline]
    pub fn parent(&self) -> Option<&'a ParseNode<'a>> {
        self.parent
    }

    /// Position of this node in its parent's children.
    #[inline]
    pub fn index_in_parent(&self) -> usize {
        self.index_in_parent
    }

    /// Ordered children; empty for leaf kinds.
    #[inline]
    pub fn children(&self) -> &'a [&'a ParseNode<'a>] {
        self.children.get().copied().unwrap_or(&[])
    }

    #[inline]
    pub fn data(&self) -> &NodeData<'a> {
        &self.data
    }

    #[inline]
    pub fn parse_flags(&self) -> ParseFlags {
        self.parse_flags
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    #[inline]
    pub fn first_child(&self) -> Option<&'a ParseNode<'a>> {
        self.children().first().copied()
    }

    #[inline]
    pub fn last_child(&self) -> Option<&'a ParseNode<'a>> {
        self.children().last().copied()
    }

    /// The sibling at `index_in_parent + 1`.
    pub fn next_sibling(&self) -> Option<&'a ParseNode<'a>> {
        self.parent?
            .children()
            .get(self.index_in_parent + 1)
            .copied()
    }

    /// The sibling at `index_in_parent - 1`.
    pub fn previous_sibling(&self) -> Option<&'a ParseNode<'a>> {
        let index = self.index_in_parent.checked_sub(1)?;
        self.parent?.children().get(index).copied()
    }

    /// Proper ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a ParseNode<'a>> + use<'a> {
        std::iter::successors(self.parent, |node| node.parent)
    }

    /// Text of a text-like node.
    pub fn text(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Text(text) => Some(text.text),
            _ => None,
        }
    }

    pub fn text_data(&self) -> Option<&TextData<'a>> {
        match &self.data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&ElementData<'a>> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&DocumentData<'a>> {
        match &self.data {
            NodeData::Document(document) => Some(document),
            _ => None,
        }
    }

    /// Tag name of an element.
    pub fn tag(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Element(element) => Some(element.tag),
            _ => None,
        }
    }

    /// Serializes this node without its children.
    pub fn shallow(&self) -> ShallowNode<'_, 'a> {
        ShallowNode(self)
    }
}

impl fmt::Debug for ParseNode<'_> {
    // Parent links make the derived impl recurse forever.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseNode")
            .field("kind", &self.kind)
            .field("parent", &self.parent.map(|p| p.kind))
            .field("index_in_parent", &self.index_in_parent)
            .field("children", &self.children().len())
            .field("data", &self.data)
            .field("parse_flags", &self.parse_flags)
            .finish()
    }
}

impl<'a> ElementData<'a> {
    /// Creates an HTML element payload with no attributes or positions.
    pub const fn new(tag: &'a str) -> Self {
        Self {
            tag,
            namespace: Namespace::Html,
            attributes: &[],
            original_tag: "",
            original_end_tag: "",
            start_pos: SourcePosition::new(0, 0, 0),
            end_pos: SourcePosition::new(0, 0, 0),
        }
    }

    pub const fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub const fn with_attributes(mut self, attributes: &'a [Attribute<'a>]) -> Self {
        self.attributes = attributes;
        self
    }

    pub const fn with_original_tags(mut self, start: &'a str, end: &'a str) -> Self {
        self.original_tag = start;
        self.original_end_tag = end;
        self
    }

    pub const fn with_positions(mut self, start: SourcePosition, end: SourcePosition) -> Self {
        self.start_pos = start;
        self.end_pos = end;
        self
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value)
    }
}

impl<'a> Attribute<'a> {
    pub const fn new(name: &'a str, value: &'a str) -> Self {
        Self { name, value }
    }
}

impl<'a> TextData<'a> {
    /// Creates a payload whose original text equals its decoded text.
    pub const fn new(text: &'a str) -> Self {
        Self {
            text,
            original_text: text,
            start_pos: SourcePosition::new(0, 0, 0),
        }
    }

    pub const fn with_original(mut self, original_text: &'a str) -> Self {
        self.original_text = original_text;
        self
    }

    pub const fn with_start(mut self, start_pos: SourcePosition) -> Self {
        self.start_pos = start_pos;
        self
    }
}

impl<'a> DocumentData<'a> {
    pub const fn with_doctype(
        name: &'a str,
        public_identifier: &'a str,
        system_identifier: &'a str,
    ) -> Self {
        Self {
            has_doctype: true,
            name,
            public_identifier,
            system_identifier,
            quirks_mode: QuirksMode::NoQuirks,
        }
    }
}

/// Serialization view of a node that reports a child count instead of
/// recursing into the children.
pub struct ShallowNode<'n, 'a>(&'n ParseNode<'a>);

/// Serializes the node with all of its descendants nested under
/// `children`.
///
/// Serializers recurse once per tree level, so trees nested thousands of
/// levels deep can exhaust the stack. Serialize such trees node by node
/// through [`ParseNode::shallow`] instead.
impl Serialize for ParseNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut len = header_field_count(self) + self.data.present_field_count();
        if self.kind.is_container() {
            len += 1;
        }

        let mut state = serializer.serialize_struct("ParseNode", len)?;
        serialize_header(self, &mut state)?;
        self.data.serialize_fields(&mut state)?;
        if self.kind.is_container() {
            state.serialize_field("children", self.children())?;
        }
        state.end()
    }
}

impl Serialize for ShallowNode<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let node = self.0;
        let mut len = header_field_count(node) + node.data.present_field_count();
        if node.kind.is_container() {
            len += 1;
        }

        let mut state = serializer.serialize_struct("ParseNode", len)?;
        serialize_header(node, &mut state)?;
        node.data.serialize_fields(&mut state)?;
        if node.kind.is_container() {
            state.serialize_field("childCount", &node.children().len())?;
        }
        state.end()
    }
}

fn header_field_count(node: &ParseNode<'_>) -> usize {
    // type, index
    let mut len = 2;
    if !node.parse_flags.is_empty() {
        len += 1;
    }
    len
}

fn serialize_header<S: SerializeStruct>(node: &ParseNode<'_>, state: &mut S) -> Result<(), S::Error> {
    state.serialize_field("type", &node.kind)?;
    state.serialize_field("index", &node.index_in_parent)?;
    if !node.parse_flags.is_empty() {
        state.serialize_field("flags", &node.parse_flags)?;
    }
    Ok(())
}

impl NodeData<'_> {
    /// Returns the number of fields `serialize_fields` writes.
    fn present_field_count(&self) -> usize {
        match self {
            NodeData::Document(document) => {
                if document.has_doctype {
                    4
                } else {
                    0
                }
            }
            NodeData::Element(_) => 5,
            NodeData::Text(_) => 2,
        }
    }

    /// Serializes the payload into the given struct serializer state.
    fn serialize_fields<S: SerializeStruct>(&self, state: &mut S) -> Result<(), S::Error> {
        match self {
            NodeData::Document(document) => {
                if document.has_doctype {
                    state.serialize_field("doctype", document.name)?;
                    state.serialize_field("publicIdentifier", document.public_identifier)?;
                    state.serialize_field("systemIdentifier", document.system_identifier)?;
                    state.serialize_field("quirksMode", &document.quirks_mode)?;
                }
            }
            NodeData::Element(element) => {
                state.serialize_field("tag", element.tag)?;
                state.serialize_field("namespace", &element.namespace)?;
                state.serialize_field("attributes", element.attributes)?;
                state.serialize_field("startPos", &element.start_pos)?;
                state.serialize_field("endPos", &element.end_pos)?;
            }
            NodeData::Text(text) => {
                state.serialize_field("text", text.text)?;
                state.serialize_field("startPos", &text.start_pos)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TreeArena, TreeBuilder};

    fn sample<'a>(arena: &'a TreeArena) -> &'a ParseNode<'a> {
        let mut builder = TreeBuilder::new(arena);
        builder.open_document(DocumentData::default()).unwrap();
        builder.open_element(ElementData::new("div")).unwrap();
        builder.text("Hello ").unwrap();
        builder.open_element(ElementData::new("span")).unwrap();
        builder.text("World").unwrap();
        builder.close().unwrap();
        builder.comment("note").unwrap();
        builder.close().unwrap();
        builder.close().unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_parent_links() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let div = doc.children()[0];
        let span = div.children()[1];

        assert!(doc.is_root());
        assert!(ParseNode::same_node(div.parent().unwrap(), doc));
        assert!(ParseNode::same_node(span.parent().unwrap(), div));
    }

    #[test]
    fn test_index_in_parent_matches_offset() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let div = doc.children()[0];

        for (offset, child) in div.children().iter().enumerate() {
            assert_eq!(child.index_in_parent(), offset);
        }
    }

    #[test]
    fn test_siblings() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let div = doc.children()[0];
        let [hello, span, note] = div.children() else {
            panic!("expected three children");
        };

        assert!(ParseNode::same_node(hello.next_sibling().unwrap(), span));
        assert!(ParseNode::same_node(note.previous_sibling().unwrap(), span));
        assert!(hello.previous_sibling().is_none());
        assert!(note.next_sibling().is_none());
        assert!(doc.next_sibling().is_none());
    }

    #[test]
    fn test_first_and_last_child() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let div = doc.children()[0];

        assert_eq!(div.first_child().unwrap().text(), Some("Hello "));
        assert_eq!(div.last_child().unwrap().kind(), NodeKind::Comment);
        assert!(div.first_child().unwrap().first_child().is_none());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let world = doc.children()[0].children()[1].children()[0];

        let kinds: Vec<_> = world.ancestors().map(|n| n.tag()).collect();
        assert_eq!(kinds, vec![Some("span"), Some("div"), None]);
    }

    #[test]
    fn test_payload_accessors() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let div = doc.children()[0];

        assert_eq!(div.tag(), Some("div"));
        assert!(div.text().is_none());
        assert!(doc.document().is_some());
        assert!(div.element().is_some());
        assert_eq!(div.children()[0].text_data().unwrap().original_text, "Hello ");
    }

    #[test]
    fn test_element_attribute_lookup() {
        let attributes = [Attribute::new("id", "main"), Attribute::new("class", "a b")];
        let element = ElementData::new("div").with_attributes(&attributes);

        assert_eq!(element.attribute("class"), Some("a b"));
        assert_eq!(element.attribute("href"), None);
    }

    #[test]
    fn test_debug_does_not_recurse() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let span = doc.children()[0].children()[1];

        let debug = format!("{:?}", span);
        assert!(debug.contains("parent: Some(Element)"));
        assert!(debug.contains("children: 1"));
    }

    #[test]
    fn test_serialization_tree() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let json = serde_json::to_value(doc).unwrap();

        assert_eq!(json["type"], "document");
        assert_eq!(json["children"][0]["tag"], "div");
        assert_eq!(json["children"][0]["children"][1]["children"][0]["text"], "World");
        assert_eq!(json["children"][0]["children"][2]["type"], "comment");
        // No doctype fields without a doctype
        assert!(json.get("doctype").is_none());
    }

    #[test]
    fn test_serialization_shallow() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let div = doc.children()[0];
        let json = serde_json::to_value(div.shallow()).unwrap();
        let obj = json.as_object().unwrap();

        // type, index, tag, namespace, attributes, startPos, endPos, childCount
        assert_eq!(obj.len(), 8);
        assert_eq!(obj["childCount"], 3);
        assert!(!obj.contains_key("children"));
    }

    #[test]
    fn test_serialization_text_leaf() {
        let arena = TreeArena::new();
        let doc = sample(&arena);
        let hello = doc.children()[0].children()[0];
        let json = serde_json::to_value(hello).unwrap();
        let obj = json.as_object().unwrap();

        // type, index, text, startPos
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["text"], "Hello ");
    }

    #[test]
    fn test_serialization_flags_and_doctype() {
        let arena = TreeArena::new();
        let mut builder = TreeBuilder::new(&arena);
        builder.next_flags(ParseFlags::BY_PARSER);
        builder
            .open_document(DocumentData::with_doctype("html", "", ""))
            .unwrap();
        builder.close().unwrap();
        let doc = builder.finish().unwrap();

        let json = serde_json::to_value(doc).unwrap();
        assert_eq!(json["flags"], serde_json::json!(["BY_PARSER"]));
        assert_eq!(json["doctype"], "html");
        assert_eq!(json["quirksMode"], "noQuirks");
        assert!(json["children"].as_array().unwrap().is_empty());
    }
}
