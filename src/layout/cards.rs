// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::ids::NodeId;
use crate::model::node::{Node, Outline};

use super::geometry::{Point, Rect, Size};

/// Capability to measure the rendered size of one card.
///
/// This is the only seam between layout and a rendering surface. Providers
/// may be stateful behind interior mutability (a DOM-backed provider would
/// re-measure after reflow; the terminal provider wraps text per the node's
/// width override).
pub trait Measure {
    fn measure(&self, node: &Node) -> Size;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure(&self, node: &Node) -> Size {
        (**self).measure(node)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Vertical gap between sibling subtrees.
    pub child_gap: f64,
    /// Vertical gap between root subtrees.
    pub root_gap: f64,
    /// Horizontal gap between a parent card's right edge and its children.
    pub column_gap: f64,
    /// Preferred distance from a parent's right edge to the connector trunk.
    pub trunk_offset: f64,
    /// Sub-unit slack for the parent/children symmetry check.
    pub tolerance: f64,
    /// Upper bound for the fixed-point loop; geometry and content size are
    /// mutually dependent, so one pass is not always enough.
    pub max_passes: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            child_gap: 1.0,
            root_gap: 2.0,
            column_gap: 6.0,
            trunk_offset: 3.0,
            tolerance: 0.5,
            max_passes: 3,
        }
    }
}

/// Final geometry for one visible node: its card and the bounding box of its
/// whole visible subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    card: Rect,
    subtree: Rect,
}

impl CardPlacement {
    pub fn card(&self) -> Rect {
        self.card
    }

    pub fn subtree(&self) -> Rect {
        self.subtree
    }
}

/// Settled geometry for a whole outline.
///
/// `converged` reports the symmetry check of the final pass; a `false` here
/// is cosmetic (the iteration budget ran out before every parent center
/// matched its children's median), never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineLayout {
    placements: BTreeMap<NodeId, CardPlacement>,
    order: Vec<NodeId>,
    bounds: Rect,
    converged: bool,
    passes: usize,
}

impl OutlineLayout {
    pub fn placements(&self) -> &BTreeMap<NodeId, CardPlacement> {
        &self.placements
    }

    pub fn placement(&self, id: &NodeId) -> Option<&CardPlacement> {
        self.placements.get(id)
    }

    /// Visible nodes in draw order (pre-order: parents under children).
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Topmost visible card under `point`, optionally hiding one card from
    /// the test (the dragged node, during drop-intent resolution).
    pub fn card_at(&self, point: Point, exclude: Option<&NodeId>) -> Option<&NodeId> {
        self.order
            .iter()
            .filter(|id| exclude != Some(*id))
            .filter(|id| {
                self.placements
                    .get(*id)
                    .is_some_and(|placement| placement.card.contains(point))
            })
            .next_back()
    }
}

/// Computes card and subtree geometry for every visible node.
///
/// Bottom-up per subtree: children are finalized before their parent is
/// sized, the parent's card is centered on the median of its children's card
/// centers, and the whole pass reruns (bounded by `max_passes`) until two
/// consecutive passes agree within tolerance.
pub fn layout_outline<M: Measure>(
    outline: &Outline,
    measure: &M,
    options: &LayoutOptions,
) -> OutlineLayout {
    let max_passes = options.max_passes.max(1);

    let mut last = run_pass(outline, measure, options);
    let mut passes = 1;
    while passes < max_passes {
        let next = run_pass(outline, measure, options);
        passes += 1;
        let moved = placements_differ(&last.placements, &next.placements, options.tolerance);
        last = next;
        if !moved {
            break;
        }
    }

    OutlineLayout {
        placements: last.placements,
        order: last.order,
        bounds: last.bounds,
        converged: last.symmetric,
        passes,
    }
}

struct PassOutcome {
    placements: BTreeMap<NodeId, CardPlacement>,
    order: Vec<NodeId>,
    bounds: Rect,
    symmetric: bool,
}

fn run_pass<M: Measure>(outline: &Outline, measure: &M, options: &LayoutOptions) -> PassOutcome {
    let mut outcome = PassOutcome {
        placements: BTreeMap::new(),
        order: Vec::new(),
        bounds: Rect::default(),
        symmetric: true,
    };

    let mut y = 0.0;
    let mut bounds: Option<Rect> = None;
    for (index, root) in outline.roots().iter().enumerate() {
        if index > 0 {
            y += options.root_gap;
        }
        let subtree = place_subtree(root, Point::new(0.0, y), measure, options, &mut outcome);
        y = subtree.bottom();
        bounds = Some(match bounds {
            Some(acc) => acc.union(subtree),
            None => subtree,
        });
    }

    outcome.bounds = bounds.unwrap_or_default();
    outcome
}

/// Places `node`'s subtree with its top-left at `origin` and returns the
/// subtree rect. Children go through here first (strict post-order); the
/// parent card is then vertically centered against them.
fn place_subtree<M: Measure>(
    node: &Node,
    origin: Point,
    measure: &M,
    options: &LayoutOptions,
    outcome: &mut PassOutcome,
) -> Rect {
    outcome.order.push(node.id().clone());
    let card_size = measure.measure(node);

    let visible_children: &[Node] = if node.collapsed() { &[] } else { node.children() };
    if visible_children.is_empty() {
        let card = Rect::from_origin_size(origin, card_size);
        outcome
            .placements
            .insert(node.id().clone(), CardPlacement { card, subtree: card });
        return card;
    }

    // Stack child subtrees first, starting at the subtree top; if the card
    // turns out taller than the children block, the block is re-centered
    // against it afterwards by shifting the already-placed descendants.
    let child_x = origin.x() + card_size.width() + options.column_gap;
    let shift_from = outcome.order.len();
    let mut child_rects = Vec::with_capacity(visible_children.len());
    let mut child_y = origin.y();
    for (index, child) in visible_children.iter().enumerate() {
        if index > 0 {
            child_y += options.child_gap;
        }
        let rect = place_subtree(child, Point::new(child_x, child_y), measure, options, outcome);
        child_y = rect.bottom();
        child_rects.push(rect);
    }

    let block_height = child_y - origin.y();
    let subtree_height = card_size.height().max(block_height);
    if card_size.height() > block_height {
        let delta = (card_size.height() - block_height) / 2.0;
        shift_down(outcome, shift_from, delta);
        for rect in &mut child_rects {
            *rect = rect.translated(0.0, delta);
        }
    }

    // Parent center = median of the direct children's card centers, clamped
    // into the reserved subtree extent.
    let child_centers = visible_children
        .iter()
        .map(|child| {
            outcome
                .placements
                .get(child.id())
                .expect("children placed before parent")
                .card
                .center_y()
        })
        .collect::<Vec<_>>();
    let median = median_of(&child_centers);
    let half = card_size.height() / 2.0;
    let center = median.clamp(origin.y() + half, origin.y() + subtree_height - half);
    if (center - median).abs() > options.tolerance {
        outcome.symmetric = false;
    }

    let card = Rect::new(origin.x(), center - half, card_size.width(), card_size.height());
    let mut subtree = Rect::new(
        origin.x(),
        origin.y(),
        card_size.width(),
        subtree_height,
    );
    for rect in &child_rects {
        subtree = subtree.union(*rect);
    }

    outcome
        .placements
        .insert(node.id().clone(), CardPlacement { card, subtree });
    subtree
}

/// Shifts every placement recorded since `from` (an index into the draw
/// order) down by `delta`.
fn shift_down(outcome: &mut PassOutcome, from: usize, delta: f64) {
    for id in &outcome.order[from..] {
        if let Some(placement) = outcome.placements.get_mut(id) {
            placement.card = placement.card.translated(0.0, delta);
            placement.subtree = placement.subtree.translated(0.0, delta);
        }
    }
}

/// Median of card centers: midpoint element for odd counts, average of the
/// two central elements for even counts.
fn median_of(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty(), "median of empty list");
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite centers"));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

fn placements_differ(
    previous: &BTreeMap<NodeId, CardPlacement>,
    current: &BTreeMap<NodeId, CardPlacement>,
    tolerance: f64,
) -> bool {
    if previous.len() != current.len() {
        return true;
    }
    for (id, placement) in current {
        let Some(before) = previous.get(id) else {
            return true;
        };
        if rect_moved(before.card, placement.card, tolerance)
            || rect_moved(before.subtree, placement.subtree, tolerance)
        {
            return true;
        }
    }
    false
}

fn rect_moved(a: Rect, b: Rect, tolerance: f64) -> bool {
    (a.x() - b.x()).abs() > tolerance
        || (a.y() - b.y()).abs() > tolerance
        || (a.width() - b.width()).abs() > tolerance
        || (a.height() - b.height()).abs() > tolerance
}
