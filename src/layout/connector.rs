// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Parent→children connector routing.
//!
//! Runs after card layout settles: a short horizontal elbow leaves the
//! parent's right edge, meets a vertical trunk shared by all children, and
//! one horizontal branch per child runs from the trunk to the child's left
//! edge. Pure geometry derived from `OutlineLayout`; selection-path
//! highlighting is a rendering attribute and never enters here.

use crate::model::ids::NodeId;
use crate::model::node::{Node, Outline};

use super::cards::{LayoutOptions, OutlineLayout};
use super::geometry::Point;

/// An axis-aligned line segment in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y() == self.end.y()
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x() == self.end.x()
    }
}

/// The connector geometry for one parent and its visible children.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorSet {
    parent: NodeId,
    elbow: Segment,
    trunk: Segment,
    branches: Vec<(NodeId, Segment)>,
}

impl ConnectorSet {
    pub fn parent(&self) -> &NodeId {
        &self.parent
    }

    pub fn elbow(&self) -> Segment {
        self.elbow
    }

    pub fn trunk(&self) -> Segment {
        self.trunk
    }

    pub fn branches(&self) -> &[(NodeId, Segment)] {
        &self.branches
    }
}

/// Routes connectors for every parent with visible children.
///
/// The trunk sits `trunk_offset` right of the parent card, capped just left
/// of the nearest child's left edge so it never crosses a child card.
pub fn route_connectors(
    outline: &Outline,
    layout: &OutlineLayout,
    options: &LayoutOptions,
) -> Vec<ConnectorSet> {
    let mut sets = Vec::new();
    for root in outline.roots() {
        route_subtree(root, layout, options, &mut sets);
    }
    sets
}

fn route_subtree(
    node: &Node,
    layout: &OutlineLayout,
    options: &LayoutOptions,
    sets: &mut Vec<ConnectorSet>,
) {
    if node.collapsed() || node.children().is_empty() {
        return;
    }

    if let Some(set) = route_one(node, layout, options) {
        sets.push(set);
    }
    for child in node.children() {
        route_subtree(child, layout, options, sets);
    }
}

fn route_one(node: &Node, layout: &OutlineLayout, options: &LayoutOptions) -> Option<ConnectorSet> {
    let parent_card = layout.placement(node.id())?.card();

    let mut child_cards = Vec::with_capacity(node.children().len());
    for child in node.children() {
        child_cards.push((child.id().clone(), layout.placement(child.id())?.card()));
    }
    if child_cards.is_empty() {
        return None;
    }

    let nearest_left = child_cards
        .iter()
        .map(|(_, card)| card.left())
        .fold(f64::INFINITY, f64::min);
    // Zero-gap limit: the trunk may touch, but never cross, a child's edge.
    let trunk_x = (parent_card.right() + options.trunk_offset).min(nearest_left);

    let parent_anchor = Point::new(parent_card.right(), parent_card.center_y());
    let elbow = Segment::new(parent_anchor, Point::new(trunk_x, parent_card.center_y()));

    let first_center = child_cards.first().map(|(_, card)| card.center_y())?;
    let last_center = child_cards.last().map(|(_, card)| card.center_y())?;
    let trunk = Segment::new(
        Point::new(trunk_x, first_center),
        Point::new(trunk_x, last_center),
    );

    let branches = child_cards
        .into_iter()
        .map(|(id, card)| {
            let branch = Segment::new(
                Point::new(trunk_x, card.center_y()),
                Point::new(card.left(), card.center_y()),
            );
            (id, branch)
        })
        .collect();

    Some(ConnectorSet {
        parent: node.id().clone(),
        elbow,
        trunk,
        branches,
    })
}
