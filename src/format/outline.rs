// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::ids::NodeIdGen;
use crate::model::node::{Node, Outline};

/// A parsed document plus the id generator that minted its node ids, so
/// later insertions keep drawing from the same sequence.
#[derive(Debug)]
pub struct ParsedDocument {
    outline: Outline,
    id_gen: NodeIdGen,
}

impl ParsedDocument {
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn id_gen(&self) -> &NodeIdGen {
        &self.id_gen
    }

    pub fn into_parts(self) -> (Outline, NodeIdGen) {
        (self.outline, self.id_gen)
    }
}

/// Splits a heading line into its marker depth and title.
///
/// A heading is a run of `#` followed by whitespace (or nothing). Anything
/// else is body text.
fn heading_marker(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_end();
    let depth = trimmed.chars().take_while(|&ch| ch == '#').count();
    if depth == 0 {
        return None;
    }
    let rest = &trimmed[depth..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some((depth, rest.trim()))
}

/// Parses a Markdown heading document into an outline.
///
/// Marker depth maps to level, clamped to one past the enclosing heading
/// when the document skips levels. Body lines between headings become the
/// preceding node's description; text before the first heading has no node
/// to attach to and is dropped.
pub fn parse_outline(text: &str) -> ParsedDocument {
    let mut id_gen = NodeIdGen::new();
    let mut roots: Vec<Node> = Vec::new();
    let mut open: Vec<Node> = Vec::new();
    let mut body: Vec<String> = Vec::new();

    for line in text.lines() {
        match heading_marker(line) {
            Some((depth, title)) => {
                flush_body(&mut open, &mut body);
                let level = depth.min(open.len() + 1);
                while open.len() >= level {
                    attach_top(&mut open, &mut roots);
                }
                let mut node = Node::new(id_gen.next_id(), title, level as u32);
                node.set_parent_id(open.last().map(|parent| parent.id().clone()));
                open.push(node);
            }
            None => {
                if !open.is_empty() {
                    body.push(line.trim_end().to_owned());
                }
            }
        }
    }
    flush_body(&mut open, &mut body);
    while !open.is_empty() {
        attach_top(&mut open, &mut roots);
    }

    ParsedDocument {
        outline: Outline::new(roots),
        id_gen,
    }
}

fn attach_top(open: &mut Vec<Node>, roots: &mut Vec<Node>) {
    let node = match open.pop() {
        Some(node) => node,
        None => return,
    };
    match open.last_mut() {
        Some(parent) => parent.children_mut().push(node),
        None => roots.push(node),
    }
}

fn flush_body(open: &mut Vec<Node>, body: &mut Vec<String>) {
    if body.is_empty() {
        return;
    }
    let text = body.join("\n");
    body.clear();
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if let Some(node) = open.last_mut() {
        node.set_description(Some(text));
    }
}

/// Serializes an outline back to a Markdown heading document: marker run and
/// title, then the description as its own paragraph, depth-first, blocks
/// separated by blank lines, single trailing newline.
pub fn serialize_outline(outline: &Outline) -> String {
    let mut blocks: Vec<String> = Vec::new();
    for root in outline.roots() {
        collect_blocks(root, &mut blocks);
    }
    if blocks.is_empty() {
        return String::new();
    }
    let mut text = blocks.join("\n\n");
    text.push('\n');
    text
}

fn collect_blocks(node: &Node, blocks: &mut Vec<String>) {
    let mut block = format!("{} {}", "#".repeat(node.level() as usize), node.title());
    if let Some(description) = node.description() {
        block.push_str("\n\n");
        block.push_str(description);
    }
    blocks.push(block);
    for child in node.children() {
        collect_blocks(child, blocks);
    }
}

#[cfg(test)]
mod tests {
    use super::{heading_marker, parse_outline, serialize_outline};
    use crate::model::node::Node;

    fn titles(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(Node::title).collect()
    }

    #[test]
    fn heading_marker_requires_separating_whitespace() {
        assert_eq!(heading_marker("# Title"), Some((1, "Title")));
        assert_eq!(heading_marker("###   Deep  "), Some((3, "Deep")));
        assert_eq!(heading_marker("##"), Some((2, "")));
        assert_eq!(heading_marker("#hashtag"), None);
        assert_eq!(heading_marker("plain text"), None);
    }

    #[test]
    fn parses_nesting_and_sibling_order() {
        let doc = parse_outline("# A\n## B\n### C\n## D\n# E\n");
        let outline = doc.outline();
        assert_eq!(titles(outline.roots()), vec!["A", "E"]);
        let a = &outline.roots()[0];
        assert_eq!(titles(a.children()), vec!["B", "D"]);
        let b = &a.children()[0];
        assert_eq!(titles(b.children()), vec!["C"]);
        assert_eq!(b.children()[0].level(), 3);
        assert_eq!(b.children()[0].parent_id(), Some(b.id()));
    }

    #[test]
    fn body_lines_become_the_preceding_description() {
        let doc = parse_outline("# A\n\nfirst line\nsecond line\n\n## B\n");
        let a = &doc.outline().roots()[0];
        assert_eq!(a.description(), Some("first line\nsecond line"));
        assert_eq!(a.children()[0].description(), None);
    }

    #[test]
    fn text_before_the_first_heading_is_dropped() {
        let doc = parse_outline("stray preamble\n\n# A\n");
        let outline = doc.outline();
        assert_eq!(titles(outline.roots()), vec!["A"]);
        assert_eq!(outline.roots()[0].description(), None);
    }

    #[test]
    fn level_skips_clamp_to_one_past_the_parent() {
        let doc = parse_outline("# A\n### Skipped\n");
        let a = &doc.outline().roots()[0];
        assert_eq!(titles(a.children()), vec!["Skipped"]);
        assert_eq!(a.children()[0].level(), 2);
    }

    #[test]
    fn leading_deep_heading_becomes_a_root() {
        let doc = parse_outline("### Orphan\n# Real\n");
        let outline = doc.outline();
        assert_eq!(titles(outline.roots()), vec!["Orphan", "Real"]);
        assert_eq!(outline.roots()[0].level(), 1);
    }

    #[test]
    fn ids_are_unique_and_sequential() {
        let doc = parse_outline("# A\n## B\n# C\n");
        let outline = doc.outline();
        assert_eq!(outline.roots()[0].id().as_ref(), "n:0001");
        assert_eq!(outline.roots()[0].children()[0].id().as_ref(), "n:0002");
        assert_eq!(outline.roots()[1].id().as_ref(), "n:0003");
    }

    #[test]
    fn serializes_depth_first_with_description_paragraphs() {
        let doc = parse_outline("# A\n\nIntro text.\n\n## B\n# C\n");
        let text = serialize_outline(doc.outline());
        assert_eq!(text, "# A\n\nIntro text.\n\n## B\n\n# C\n");
    }

    #[test]
    fn canonical_documents_round_trip_exactly() {
        let original = "# Plan\n\nWhy we are doing this.\n\n## Scope\n\n### In\n\n### Out\n\n## Goals\n\n# Appendix\n";
        let doc = parse_outline(original);
        assert_eq!(serialize_outline(doc.outline()), original);
    }

    #[test]
    fn sloppy_whitespace_round_trips_up_to_normalization() {
        let sloppy = "# Plan   \nbody right after\n\n\n## Scope\n";
        let first = serialize_outline(parse_outline(sloppy).outline());
        let second = serialize_outline(parse_outline(&first).outline());
        assert_eq!(first, second);
        assert_eq!(first, "# Plan\n\nbody right after\n\n## Scope\n");
    }

    #[test]
    fn empty_input_serializes_to_empty() {
        let doc = parse_outline("");
        assert!(doc.outline().is_empty());
        assert_eq!(serialize_outline(doc.outline()), "");
    }
}
