//! Markup parser using quick-xml.
//!
//! Reads well-formed XML/XHTML into a gumbotree parse tree rooted at a
//! `Document` node. Events are first collected into a flat list of pending
//! open, close and leaf entries, because an element's end tag and end
//! position are only known once it is closed. The list is then replayed into
//! a [`TreeBuilder`] in one pass. Neither phase recurses, so nesting depth is
//! bounded by memory only.

use std::ops::Range;

use gumbotree_ast::{
    Attribute, DocumentData, ElementData, Namespace, NodeKind, ParseFlags, ParseNode, QuirksMode,
    SourcePosition, TextData, TreeArena, TreeBuilder,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::{ParseError, TreeParser};

/// Markup parser implementation.
///
/// Handles:
/// - Elements, with `svg`/`math` subtrees and `svg:`/`math:` prefixes mapped
///   to their namespaces
/// - Text, whitespace-only text, CDATA sections and comments
/// - A leading `<!DOCTYPE ...>` declaration
///
/// Processing instructions and the XML declaration are skipped, as is
/// whitespace between top-level nodes.
pub struct MarkupParser;

impl MarkupParser {
    /// Creates a new markup parser.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParser for MarkupParser {
    fn name(&self) -> &str {
        "markup"
    }

    fn extensions(&self) -> &[&str] {
        &["xhtml", "xht", "xml", "svg", "html", "htm"]
    }

    fn parse<'a>(
        &self,
        arena: &'a TreeArena,
        source: &str,
    ) -> Result<&'a ParseNode<'a>, ParseError> {
        let pending = PendingDocument::read(source)?;
        let root = pending.build(arena, source)?;
        debug!(
            "Parsed markup into {} top-level nodes ({} bytes allocated)",
            root.children().len(),
            arena.allocated_bytes()
        );
        Ok(root)
    }
}

struct Doctype {
    name: String,
    public_identifier: String,
    system_identifier: String,
}

impl Doctype {
    /// Parses the body of a `<!DOCTYPE ...>` declaration.
    fn parse(body: &str) -> Self {
        let mut rest = body.trim();
        let name = take_word(&mut rest).to_string();

        let mut public_identifier = String::new();
        let mut system_identifier = String::new();
        let keyword = take_word(&mut rest);
        if keyword.eq_ignore_ascii_case("PUBLIC") {
            public_identifier = take_quoted(&mut rest).to_string();
            system_identifier = take_quoted(&mut rest).to_string();
        } else if keyword.eq_ignore_ascii_case("SYSTEM") {
            system_identifier = take_quoted(&mut rest).to_string();
        }

        Self {
            name,
            public_identifier,
            system_identifier,
        }
    }

    fn quirks_mode(&self) -> QuirksMode {
        if !self.name.eq_ignore_ascii_case("html") {
            return QuirksMode::Quirks;
        }
        let public = self.public_identifier.to_ascii_lowercase();
        if public.starts_with("-//w3c//dtd xhtml 1.0 transitional//")
            || public.starts_with("-//w3c//dtd xhtml 1.0 frameset//")
        {
            QuirksMode::LimitedQuirks
        } else {
            QuirksMode::NoQuirks
        }
    }
}

fn take_word<'s>(rest: &mut &'s str) -> &'s str {
    let trimmed = rest.trim_start();
    let end = trimmed
        .find(|c: char| c.is_whitespace())
        .unwrap_or(trimmed.len());
    let (word, tail) = trimmed.split_at(end);
    *rest = tail;
    word
}

fn take_quoted<'s>(rest: &mut &'s str) -> &'s str {
    let trimmed = rest.trim_start();
    let Some(quote) = trimmed.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        return "";
    };
    let body = &trimmed[1..];
    match body.find(quote) {
        Some(end) => {
            *rest = &body[end + 1..];
            &body[..end]
        }
        None => {
            *rest = "";
            body
        }
    }
}

enum Pending {
    Open(PendingElement),
    Close,
    Leaf {
        kind: NodeKind,
        text: String,
        span: Range<usize>,
        start_pos: SourcePosition,
    },
}

struct PendingElement {
    /// Name as written, used to match the end tag.
    qualified: String,
    tag: String,
    namespace: Namespace,
    attributes: Vec<(String, String)>,
    start_tag: Range<usize>,
    /// Empty for self-closing elements.
    end_tag: Range<usize>,
    start_pos: SourcePosition,
    end_pos: SourcePosition,
    flags: ParseFlags,
}

#[derive(Default)]
struct PendingDocument {
    doctype: Option<Doctype>,
    /// Document order; every `Open` is matched by a later `Close`.
    nodes: Vec<Pending>,
}

impl PendingDocument {
    fn read(source: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        // End tags are matched below, with our own error type.
        reader.config_mut().check_end_names = false;

        let mut document = PendingDocument::default();
        let mut positions = PositionCursor::new(source);
        // Indices into `document.nodes` of the open elements.
        let mut open: Vec<usize> = Vec::new();

        loop {
            let event_start = reader.buffer_position() as usize;

            let event = reader.read_event().map_err(|e| {
                ParseError::syntax_at(e.to_string(), reader.error_position() as usize)
            })?;
            let event_end = reader.buffer_position() as usize;

            match event {
                Event::Start(e) => {
                    let parent = document.namespace_of(open.last());
                    let start_pos = positions.advance_to(event_start);
                    let element = start_element(&e, parent, event_start..event_end, start_pos)?;
                    open.push(document.nodes.len());
                    document.nodes.push(Pending::Open(element));
                }
                Event::Empty(e) => {
                    let parent = document.namespace_of(open.last());
                    let start_pos = positions.advance_to(event_start);
                    let mut element = start_element(&e, parent, event_start..event_end, start_pos)?;
                    element.flags |= ParseFlags::IMPLICIT_END_TAG;
                    element.end_pos = positions.advance_to(event_end);
                    document.nodes.push(Pending::Open(element));
                    document.nodes.push(Pending::Close);
                }
                Event::End(e) => {
                    let found = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let index = open.pop().ok_or_else(|| ParseError::UnexpectedEndTag {
                        found: found.clone(),
                        offset: event_start,
                    })?;
                    let end_pos = positions.advance_to(event_end);
                    if let Some(Pending::Open(element)) = document.nodes.get_mut(index) {
                        if element.qualified != found {
                            return Err(ParseError::MismatchedEndTag {
                                expected: std::mem::take(&mut element.qualified),
                                found,
                                offset: event_start,
                            });
                        }
                        element.end_tag = event_start..event_end;
                        element.end_pos = end_pos;
                    }
                    document.nodes.push(Pending::Close);
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| {
                        ParseError::syntax_at(format!("Invalid text content: {}", err), event_start)
                    })?;
                    let is_whitespace = text.trim().is_empty();
                    if is_whitespace && open.is_empty() {
                        continue;
                    }
                    let kind = if is_whitespace {
                        NodeKind::Whitespace
                    } else {
                        NodeKind::Text
                    };
                    document.nodes.push(Pending::Leaf {
                        kind,
                        text: text.into_owned(),
                        span: event_start..event_end,
                        start_pos: positions.advance_to(event_start),
                    });
                }
                Event::CData(e) => {
                    let raw: &[u8] = &e;
                    document.nodes.push(Pending::Leaf {
                        kind: NodeKind::Cdata,
                        text: String::from_utf8_lossy(raw).into_owned(),
                        span: event_start..event_end,
                        start_pos: positions.advance_to(event_start),
                    });
                }
                Event::Comment(e) => {
                    let raw: &[u8] = &e;
                    document.nodes.push(Pending::Leaf {
                        kind: NodeKind::Comment,
                        text: String::from_utf8_lossy(raw).into_owned(),
                        span: event_start..event_end,
                        start_pos: positions.advance_to(event_start),
                    });
                }
                Event::DocType(e) => {
                    if !open.is_empty() || document.doctype.is_some() {
                        return Err(ParseError::syntax_at(
                            "DOCTYPE is only allowed once, before the first element",
                            event_start,
                        ));
                    }
                    let raw: &[u8] = &e;
                    document.doctype = Some(Doctype::parse(&String::from_utf8_lossy(raw)));
                }
                Event::Decl(_) | Event::PI(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(Pending::Open(element)) = open.last().and_then(|&i| document.nodes.get(i)) {
            return Err(ParseError::UnexpectedEof {
                expected: format!("closing tag </{}>", element.qualified),
            });
        }

        Ok(document)
    }

    fn namespace_of(&self, index: Option<&usize>) -> Option<Namespace> {
        match index.and_then(|&i| self.nodes.get(i)) {
            Some(Pending::Open(element)) => Some(element.namespace),
            _ => None,
        }
    }

    fn build<'a>(&self, arena: &'a TreeArena, source: &str) -> Result<&'a ParseNode<'a>, ParseError> {
        let mut builder = TreeBuilder::new(arena);

        let data = match &self.doctype {
            Some(doctype) => {
                let mut data = DocumentData::with_doctype(
                    arena.alloc_str(&doctype.name),
                    arena.alloc_str(&doctype.public_identifier),
                    arena.alloc_str(&doctype.system_identifier),
                );
                data.quirks_mode = doctype.quirks_mode();
                data
            }
            None => DocumentData::default(),
        };

        builder.next_flags(ParseFlags::BY_PARSER);
        builder.open_document(data)?;
        for node in &self.nodes {
            emit(&mut builder, node, source)?;
        }
        builder.close()?;

        Ok(builder.finish()?)
    }
}

fn start_element(
    e: &BytesStart<'_>,
    parent: Option<Namespace>,
    span: Range<usize>,
    start_pos: SourcePosition,
) -> Result<PendingElement, ParseError> {
    let qualified = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let (prefix, local) = match qualified.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qualified.as_str()),
    };

    let namespace = match prefix {
        Some(p) if p.eq_ignore_ascii_case("svg") => Namespace::Svg,
        Some(p) if p.eq_ignore_ascii_case("math") || p.eq_ignore_ascii_case("mathml") => {
            Namespace::MathMl
        }
        _ if local.eq_ignore_ascii_case("svg") => Namespace::Svg,
        _ if local.eq_ignore_ascii_case("math") => Namespace::MathMl,
        _ => parent.unwrap_or_default(),
    };

    // Foreign elements keep their case (e.g. `foreignObject`).
    let tag = match namespace {
        Namespace::Html => local.to_ascii_lowercase(),
        Namespace::Svg | Namespace::MathMl => local.to_string(),
    };

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            ParseError::syntax_at(format!("Invalid attribute: {}", err), span.start)
        })?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|err| {
            ParseError::syntax_at(format!("Invalid attribute value: {}", err), span.start)
        })?;
        attributes.push((name, value.into_owned()));
    }

    Ok(PendingElement {
        qualified,
        tag,
        namespace,
        attributes,
        end_tag: span.end..span.end,
        start_tag: span,
        start_pos,
        end_pos: start_pos,
        flags: ParseFlags::empty(),
    })
}

fn emit<'a>(builder: &mut TreeBuilder<'a>, node: &Pending, source: &str) -> Result<(), ParseError> {
    let arena = builder.arena();
    match node {
        Pending::Open(element) => {
            let attributes: Vec<Attribute<'a>> = element
                .attributes
                .iter()
                .map(|(name, value)| Attribute::new(arena.alloc_str(name), arena.alloc_str(value)))
                .collect();

            let data = ElementData::new(arena.alloc_str(&element.tag))
                .with_namespace(element.namespace)
                .with_attributes(arena.alloc_slice_copy(&attributes))
                .with_original_tags(
                    arena.alloc_str(&source[element.start_tag.clone()]),
                    arena.alloc_str(&source[element.end_tag.clone()]),
                )
                .with_positions(element.start_pos, element.end_pos);

            builder.next_flags(element.flags);
            builder.open_element(data)?;
        }
        Pending::Close => {
            builder.close()?;
        }
        Pending::Leaf {
            kind,
            text,
            span,
            start_pos,
        } => {
            let data = TextData::new(arena.alloc_str(text))
                .with_original(arena.alloc_str(&source[span.clone()]))
                .with_start(*start_pos);
            builder.push_text(*kind, data)?;
        }
    }
    Ok(())
}

/// Forward-only offset to line/column conversion.
///
/// Event offsets arrive in increasing order, so each call only scans the
/// bytes since the previous one. A smaller offset than the last one yields
/// the last position.
struct PositionCursor<'s> {
    source: &'s str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'s> PositionCursor<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 0,
        }
    }

    fn advance_to(&mut self, offset: usize) -> SourcePosition {
        let offset = offset.clamp(self.offset, self.source.len());
        let skipped = &self.source[self.offset..offset];
        match memchr::memrchr(b'\n', skipped.as_bytes()) {
            Some(last) => {
                self.line += memchr::memchr_iter(b'\n', skipped.as_bytes()).count() as u32;
                self.column = skipped[last + 1..].chars().count() as u32;
            }
            None => self.column += skipped.chars().count() as u32,
        }
        self.offset = offset;
        SourcePosition::new(self.line, self.column, offset as u32)
    }
}
