// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;

/// Back-reference to where a node's content came from (a PDF page, a URL, a
/// pasted excerpt). Opaque to the core: stored and round-tripped, never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    kind: String,
    locator: String,
    excerpt: Option<String>,
}

impl SourceRef {
    pub fn new(kind: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            locator: locator.into(),
            excerpt: None,
        }
    }

    pub fn set_excerpt<T: Into<String>>(&mut self, excerpt: Option<T>) {
        self.excerpt = excerpt.map(Into::into);
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }
}

/// One heading card.
///
/// A node owns its children exclusively; the sibling order of `children` is
/// the document order. `level` and `parent_id` are derived structural fields
/// kept consistent by `ops` after every mutation (roots are level 1 with no
/// parent, every other node is `parent.level + 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    title: String,
    description: Option<String>,
    rich_title: Option<String>,
    rich_description: Option<String>,
    level: u32,
    parent_id: Option<NodeId>,
    children: Vec<Node>,
    collapsed: bool,
    color: Option<String>,
    stroke_weight: Option<u8>,
    width: Option<u16>,
    source: Option<SourceRef>,
}

impl Node {
    pub fn new(id: NodeId, title: impl Into<String>, level: u32) -> Self {
        debug_assert!(level >= 1, "node levels start at 1");
        Self {
            id,
            title: title.into(),
            description: None,
            rich_title: None,
            rich_description: None,
            level,
            parent_id: None,
            children: Vec::new(),
            collapsed: false,
            color: None,
            stroke_weight: None,
            width: None,
            source: None,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description<T: Into<String>>(&mut self, description: Option<T>) {
        self.description = description.map(Into::into);
    }

    pub fn rich_title(&self) -> Option<&str> {
        self.rich_title.as_deref()
    }

    pub fn set_rich_title<T: Into<String>>(&mut self, rich_title: Option<T>) {
        self.rich_title = rich_title.map(Into::into);
    }

    pub fn rich_description(&self) -> Option<&str> {
        self.rich_description.as_deref()
    }

    pub fn set_rich_description<T: Into<String>>(&mut self, rich_description: Option<T>) {
        self.rich_description = rich_description.map(Into::into);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        debug_assert!(level >= 1, "node levels start at 1");
        self.level = level;
    }

    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    pub fn set_parent_id(&mut self, parent_id: Option<NodeId>) {
        self.parent_id = parent_id;
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color<T: Into<String>>(&mut self, color: Option<T>) {
        self.color = color.map(Into::into);
    }

    pub fn stroke_weight(&self) -> Option<u8> {
        self.stroke_weight
    }

    pub fn set_stroke_weight(&mut self, stroke_weight: Option<u8>) {
        self.stroke_weight = stroke_weight;
    }

    pub fn width(&self) -> Option<u16> {
        self.width
    }

    pub fn set_width(&mut self, width: Option<u16>) {
        self.width = width;
    }

    pub fn source(&self) -> Option<&SourceRef> {
        self.source.as_ref()
    }

    pub fn set_source(&mut self, source: Option<SourceRef>) {
        self.source = source;
    }
}

/// The forest of root nodes plus a wrapping revision counter.
///
/// `rev` is bumped by every applied mutation; derived state (layout, scene)
/// caches the rev it was computed against and recomputes lazily on mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    roots: Vec<Node>,
    rev: u64,
}

impl Outline {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots, rev: 0 }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut Vec<Node> {
        &mut self.roots
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count across the whole forest.
    pub fn len(&self) -> usize {
        fn count(node: &Node) -> usize {
            1 + node.children().iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}
