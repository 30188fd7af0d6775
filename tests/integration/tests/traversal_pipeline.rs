//! Integration tests for parsing followed by traversal
//!
//! Cursors are checked against a plain recursive pre-order walk of trees
//! produced by the markup parser.

use gumbotree_ast::{ParseNode, TreeArena};
use gumbotree_parser::{MarkupParser, TreeParser};
use gumbotree_traversal::{
    FilterConfig, NodeIterator, SearchCase, SearchDescend, TreeWalker, Verdict, WhatToShow,
    search_all_text,
};
use rstest::rstest;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Traversal</title></head>
  <body>
    <h1>Heading</h1>
    <!-- navigation -->
    <ul><li>one</li><li>two <em>and</em> a half</li><li/></ul>
    <p>Tail <![CDATA[raw & <kept>]]> text</p>
    <svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:circle r="1"/></svg:svg>
  </body>
</html>
"#;

fn parse<'a>(arena: &'a TreeArena, source: &str) -> &'a ParseNode<'a> {
    MarkupParser::new().parse(arena, source).unwrap()
}

/// Every node of the subtree in document order, `root` first.
fn pre_order<'a>(root: &'a ParseNode<'a>, out: &mut Vec<&'a ParseNode<'a>>) {
    out.push(root);
    for child in root.children() {
        pre_order(child, out);
    }
}

fn accepted<'a>(root: &'a ParseNode<'a>, mask: WhatToShow) -> Vec<*const ParseNode<'a>> {
    let mut nodes = Vec::new();
    pre_order(root, &mut nodes);
    nodes
        .into_iter()
        .filter(|node| mask.shows(node.kind()))
        .map(std::ptr::from_ref)
        .collect()
}

fn addresses<'a>(nodes: impl IntoIterator<Item = &'a ParseNode<'a>>) -> Vec<*const ParseNode<'a>> {
    nodes.into_iter().map(std::ptr::from_ref).collect()
}

mod node_iterator {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case::all(WhatToShow::ALL)]
    #[case::elements(WhatToShow::ELEMENT)]
    #[case::text(WhatToShow::TEXT)]
    #[case::text_like(WhatToShow::TEXT | WhatToShow::CDATA | WhatToShow::WHITESPACE)]
    #[case::comments(WhatToShow::COMMENT)]
    #[case::document_only(WhatToShow::DOCUMENT)]
    #[case::nothing(WhatToShow::empty())]
    fn forward_matches_pre_order(#[case] mask: WhatToShow) {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);

        let mut iter = NodeIterator::new(doc, mask);
        assert!(iter.previous_node().is_none());
        assert_eq!(addresses(iter), accepted(doc, mask));
    }

    #[rstest]
    #[case::all(WhatToShow::ALL)]
    #[case::elements(WhatToShow::ELEMENT)]
    #[case::text(WhatToShow::TEXT)]
    #[case::nothing(WhatToShow::empty())]
    fn backward_matches_reversed_pre_order(#[case] mask: WhatToShow) {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);

        let mut iter = NodeIterator::new(doc, mask);
        while iter.next_node().is_some() {}

        let mut backward = Vec::new();
        while let Some(node) = iter.previous_node() {
            backward.push(node);
        }
        backward.reverse();
        assert_eq!(addresses(backward), accepted(doc, mask));
    }

    #[test]
    fn subtree_iteration_stays_inside_root() {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);
        let list = NodeIterator::new(doc, WhatToShow::ELEMENT)
            .find(|node| node.tag() == Some("ul"))
            .unwrap();

        let mut expected = accepted(list, WhatToShow::ALL);
        expected.remove(0);
        assert_eq!(addresses(NodeIterator::new(list, WhatToShow::ALL)), expected);

        let texts: Vec<_> = NodeIterator::new(list, WhatToShow::TEXT)
            .filter_map(|node| node.text())
            .collect();
        assert_eq!(texts, vec!["one", "two ", "and", " a half"]);
    }

    #[test]
    fn direction_changes_revisit_neighbours() {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);

        let mut iter = NodeIterator::new(doc, WhatToShow::ELEMENT);
        let tags: Vec<_> = std::iter::from_fn(|| iter.next_node())
            .take(3)
            .filter_map(|node| node.tag())
            .collect();
        assert_eq!(tags, vec!["html", "head", "title"]);

        assert_eq!(iter.previous_node().and_then(|n| n.tag()), Some("head"));
        assert_eq!(iter.next_node().and_then(|n| n.tag()), Some("title"));
        assert_eq!(iter.next_node().and_then(|n| n.tag()), Some("body"));
    }

    #[test]
    fn predicate_rejection_keeps_descendants() {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);

        let filter = FilterConfig::new(WhatToShow::ELEMENT | WhatToShow::TEXT).with_filter(
            |node: &ParseNode<'_>| {
                if node.tag() == Some("ul") {
                    Verdict::Reject
                } else {
                    Verdict::Accept
                }
            },
        );
        let tags: Vec<_> = NodeIterator::new(doc, filter)
            .filter_map(|node| node.tag())
            .collect();
        assert!(!tags.contains(&"ul"));
        assert_eq!(tags.iter().filter(|tag| **tag == "li").count(), 3);
    }
}

mod tree_walker {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Depth-first walk using only child and sibling moves.
    fn walk<'a>(walker: &mut TreeWalker<'a, '_>) -> Vec<&'a ParseNode<'a>> {
        let mut visited = vec![walker.current()];
        loop {
            if let Some(child) = walker.first_child() {
                visited.push(child);
                continue;
            }
            loop {
                if let Some(sibling) = walker.next_sibling() {
                    visited.push(sibling);
                    break;
                }
                if walker.parent_node().is_none() {
                    return visited;
                }
            }
        }
    }

    #[test]
    fn show_all_walk_matches_pre_order() {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);

        let mut walker = TreeWalker::new(doc, FilterConfig::show_all());
        assert_eq!(addresses(walk(&mut walker)), accepted(doc, WhatToShow::ALL));
        assert!(std::ptr::eq(walker.current(), doc));
    }

    #[test]
    fn parent_node_skips_to_nearest_accepted_ancestor() {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);

        let emphasis = NodeIterator::new(doc, WhatToShow::TEXT)
            .find(|node| node.text() == Some("and"))
            .unwrap();

        let mut walker = TreeWalker::new(doc, WhatToShow::ELEMENT);
        walker.set_current(emphasis).unwrap();
        let chain: Vec<_> = std::iter::from_fn(|| walker.parent_node())
            .filter_map(|node| node.tag())
            .collect();
        assert_eq!(chain, vec!["em", "li", "ul", "body", "html"]);
        assert!(walker.parent_node().is_none());
        assert_eq!(walker.current().tag(), Some("html"));
    }

    #[test]
    fn sibling_moves_stay_at_root() {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);
        let list = NodeIterator::new(doc, WhatToShow::ELEMENT)
            .find(|node| node.tag() == Some("ul"))
            .unwrap();

        let mut walker = TreeWalker::new(list, WhatToShow::ELEMENT);
        assert!(walker.next_sibling().is_none());
        assert!(walker.previous_sibling().is_none());
        assert!(walker.parent_node().is_none());

        let last = walker.last_child().unwrap();
        assert_eq!(last.tag(), Some("li"));
        assert!(!last.has_children());
        let middle = walker.previous_sibling().unwrap();
        assert_eq!(middle.children().len(), 3);
        assert!(std::ptr::eq(walker.parent_node().unwrap(), list));
    }

    #[test]
    fn set_current_rejects_nodes_outside_root() {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);
        let html = doc.children()[0];
        let head = html.children().iter().find(|n| n.tag() == Some("head")).unwrap();
        let body = html.children().iter().find(|n| n.tag() == Some("body")).unwrap();

        let mut walker = TreeWalker::new(*head, FilterConfig::show_all());
        assert!(walker.set_current(*body).is_err());
        assert!(std::ptr::eq(walker.current(), *head));
    }
}

mod search {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case::exact("a", SearchCase::MatchCase)]
    #[case::folded("T", SearchCase::CaseInsensitive)]
    #[case::absent("zzz", SearchCase::MatchCase)]
    fn agrees_with_filtered_pre_order(#[case] needle: &str, #[case] case: SearchCase) {
        let arena = TreeArena::new();
        let doc = parse(&arena, PAGE);

        let mut nodes = Vec::new();
        pre_order(doc, &mut nodes);
        let expected: Vec<_> = nodes
            .into_iter()
            .filter(|node| WhatToShow::TEXT.shows(node.kind()))
            .filter(|node| {
                let text = node.text().unwrap_or_default();
                match case {
                    SearchCase::MatchCase => text.contains(needle),
                    SearchCase::CaseInsensitive => {
                        text.to_lowercase().contains(&needle.to_lowercase())
                    }
                }
            })
            .collect();

        let found = search_all_text(needle, doc, SearchDescend::IncludeChildren, case);
        assert_eq!(addresses(found), addresses(expected));
    }
}
