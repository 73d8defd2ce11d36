// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pure scene construction.
//!
//! Turns an outline plus its settled layout into drawable data: cards with
//! their wrapped text and highlight attributes, connector segments, and the
//! drag placeholder. No terminal coupling; the chrome decides how to paint.

use crate::layout::cards::{LayoutOptions, Measure, OutlineLayout};
use crate::layout::connector::{route_connectors, Segment};
use crate::layout::geometry::{Point, Rect, Size, SurfaceTransform};
use crate::model::ids::NodeId;
use crate::model::node::{Node, Outline};
use crate::query;

use super::text::{truncate_with_ellipsis, wrap_text};

const MIN_CARD_WIDTH: u16 = 8;
const DEFAULT_CARD_WIDTH: u16 = 24;
/// Border plus one cell of padding on each side.
const FRAME_COLS: usize = 4;
const FRAME_ROWS: usize = 2;
const MAX_BODY_LINES: usize = 4;

/// Measures cards in character cells: wrapped title plus body lines plus the
/// frame. Height genuinely depends on the node's wrap width, which is what
/// makes layout measurement-dependent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasure {
    default_width: u16,
}

impl Default for TextMeasure {
    fn default() -> Self {
        Self { default_width: DEFAULT_CARD_WIDTH }
    }
}

impl TextMeasure {
    pub fn new(default_width: u16) -> Self {
        Self { default_width: default_width.max(MIN_CARD_WIDTH) }
    }

    fn card_width(&self, node: &Node) -> u16 {
        node.width().unwrap_or(self.default_width).max(MIN_CARD_WIDTH)
    }
}

impl Measure for TextMeasure {
    fn measure(&self, node: &Node) -> Size {
        let width = self.card_width(node);
        let inner = usize::from(width).saturating_sub(FRAME_COLS).max(1);
        let lines = card_lines(node, inner).len();
        Size::new(f64::from(width), (lines + FRAME_ROWS) as f64)
    }
}

fn card_lines(node: &Node, inner: usize) -> Vec<String> {
    let mut lines = wrap_text(node.title(), inner);
    if let Some(description) = node.description() {
        let mut body: Vec<String> = description
            .lines()
            .filter(|line| !line.trim().is_empty())
            .flat_map(|line| wrap_text(line, inner))
            .collect();
        if body.len() > MAX_BODY_LINES {
            body.truncate(MAX_BODY_LINES);
            if let Some(last) = body.last_mut() {
                *last = truncate_with_ellipsis(&format!("{last}…"), inner);
            }
        }
        lines.append(&mut body);
    }
    lines
}

/// One drawable card with its highlight attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct CardVisual {
    id: NodeId,
    rect: Rect,
    lines: Vec<String>,
    color: Option<String>,
    stroke_weight: Option<u8>,
    selected: bool,
    in_path: bool,
    hidden_children: usize,
}

impl CardVisual {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn stroke_weight(&self) -> Option<u8> {
        self.stroke_weight
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn in_path(&self) -> bool {
        self.in_path
    }

    /// Count of directly collapsed-away children, for the card badge.
    pub fn hidden_children(&self) -> usize {
        self.hidden_children
    }
}

/// A connector segment plus its selection-path attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentVisual {
    segment: Segment,
    in_path: bool,
}

impl SegmentVisual {
    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn in_path(&self) -> bool {
        self.in_path
    }
}

/// Visual state of an in-flight drag, supplied by the chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOverlay {
    id: NodeId,
    offset: Point,
    placeholder: Option<Rect>,
}

impl DragOverlay {
    pub fn new(id: NodeId, offset: Point, placeholder: Option<Rect>) -> Self {
        Self { id, offset, placeholder }
    }
}

/// Everything the chrome needs to paint one frame, in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    cards: Vec<CardVisual>,
    segments: Vec<SegmentVisual>,
    placeholder: Option<Rect>,
    bounds: Rect,
}

impl Scene {
    /// Cards in draw order; the dragged card, if any, comes last.
    pub fn cards(&self) -> &[CardVisual] {
        &self.cards
    }

    pub fn segments(&self) -> &[SegmentVisual] {
        &self.segments
    }

    pub fn placeholder(&self) -> Option<Rect> {
        self.placeholder
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

pub fn build_scene(
    outline: &Outline,
    layout: &OutlineLayout,
    options: &LayoutOptions,
    transform: SurfaceTransform,
    selection: Option<&NodeId>,
    drag: Option<&DragOverlay>,
) -> Scene {
    let path: Vec<NodeId> = selection
        .map(|id| query::selection_path(outline, id))
        .unwrap_or_default();

    let mut cards = Vec::with_capacity(layout.order().len());
    for id in layout.order() {
        let Some(node) = query::find_node(outline, id) else {
            continue;
        };
        let Some(placement) = layout.placement(id) else {
            continue;
        };

        let mut rect = placement.card();
        if let Some(overlay) = drag {
            if &overlay.id == id {
                rect = rect.translated(overlay.offset.x(), overlay.offset.y());
            }
        }
        let inner = (rect.width() as usize).saturating_sub(FRAME_COLS).max(1);

        cards.push(CardVisual {
            id: id.clone(),
            rect: transform.rect_to_surface(rect),
            lines: card_lines(node, inner),
            color: node.color().map(str::to_owned),
            stroke_weight: node.stroke_weight(),
            selected: selection == Some(id),
            in_path: path.contains(id),
            hidden_children: if node.collapsed() { node.children().len() } else { 0 },
        });
    }

    // The dragged card tracks the pointer and must paint over everything.
    if let Some(overlay) = drag {
        if let Some(index) = cards.iter().position(|card| card.id == overlay.id) {
            let dragged = cards.remove(index);
            cards.push(dragged);
        }
    }

    let mut segments = Vec::new();
    for set in route_connectors(outline, layout, options) {
        let parent_on_path = path.contains(set.parent());
        let mut any_branch_on_path = false;
        let mut branch_visuals = Vec::with_capacity(set.branches().len());
        for (child, branch) in set.branches() {
            let on_path = parent_on_path && path.contains(child);
            any_branch_on_path |= on_path;
            branch_visuals.push(SegmentVisual {
                segment: segment_to_surface(*branch, transform),
                in_path: on_path,
            });
        }
        segments.push(SegmentVisual {
            segment: segment_to_surface(set.elbow(), transform),
            in_path: any_branch_on_path,
        });
        segments.push(SegmentVisual {
            segment: segment_to_surface(set.trunk(), transform),
            in_path: any_branch_on_path,
        });
        segments.append(&mut branch_visuals);
    }

    let placeholder = drag
        .and_then(|overlay| overlay.placeholder)
        .map(|rect| transform.rect_to_surface(rect));

    Scene {
        cards,
        segments,
        placeholder,
        bounds: transform.rect_to_surface(layout.bounds()),
    }
}

fn segment_to_surface(segment: Segment, transform: SurfaceTransform) -> Segment {
    Segment::new(
        transform.to_surface(segment.start()),
        transform.to_surface(segment.end()),
    )
}

#[cfg(test)]
mod tests {
    use super::{build_scene, DragOverlay, TextMeasure};
    use crate::layout::cards::{layout_outline, LayoutOptions, Measure};
    use crate::layout::geometry::{Point, Rect, SurfaceTransform};
    use crate::model::fixtures::{outline_abc, outline_two_roots};
    use crate::model::ids::NodeId;
    use crate::model::node::Node;
    use crate::query;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn measured_height_grows_as_wrap_width_shrinks() {
        let node = Node::new(
            nid("n:x"),
            "a fairly long card title that needs wrapping",
            1,
        );
        let wide = TextMeasure::new(48).measure(&node);
        let narrow = TextMeasure::new(12).measure(&node);
        assert!(narrow.height() > wide.height());
        assert_eq!(narrow.width(), 12.0);
    }

    #[test]
    fn width_override_feeds_measurement() {
        let mut node = Node::new(nid("n:x"), "title", 1);
        let default = TextMeasure::default().measure(&node);
        node.set_width(Some(40));
        let resized = TextMeasure::default().measure(&node);
        assert_eq!(resized.width(), 40.0);
        assert_ne!(default.width(), resized.width());
    }

    #[test]
    fn selection_marks_the_card_and_its_ancestor_path() {
        let outline = outline_two_roots();
        let options = LayoutOptions::default();
        let layout = layout_outline(&outline, &TextMeasure::default(), &options);
        let scene = build_scene(
            &outline,
            &layout,
            &options,
            SurfaceTransform::default(),
            Some(&nid("n:in")),
            None,
        );

        let by_id = |id: &str| {
            scene
                .cards()
                .iter()
                .find(|card| card.id() == &nid(id))
                .expect("card")
        };
        assert!(by_id("n:in").selected());
        assert!(by_id("n:in").in_path());
        assert!(by_id("n:scope").in_path());
        assert!(!by_id("n:scope").selected());
        assert!(by_id("n:intro").in_path());
        assert!(!by_id("n:goals").in_path());
        assert!(scene.segments().iter().any(|segment| segment.in_path()));
    }

    #[test]
    fn dragged_card_paints_last_with_its_offset() {
        let outline = outline_abc();
        let options = LayoutOptions::default();
        let layout = layout_outline(&outline, &TextMeasure::default(), &options);
        let base = layout.placement(&nid("n:b")).expect("b").card();

        let overlay = DragOverlay::new(nid("n:b"), Point::new(3.0, -2.0), None);
        let scene = build_scene(
            &outline,
            &layout,
            &options,
            SurfaceTransform::default(),
            None,
            Some(&overlay),
        );

        let last = scene.cards().last().expect("cards");
        assert_eq!(last.id(), &nid("n:b"));
        assert_eq!(last.rect(), base.translated(3.0, -2.0));
    }

    #[test]
    fn placeholder_and_bounds_are_pan_transformed() {
        let outline = outline_abc();
        let options = LayoutOptions::default();
        let layout = layout_outline(&outline, &TextMeasure::default(), &options);
        let transform = SurfaceTransform::new(Point::new(5.0, 7.0));

        let placeholder = Rect::new(0.0, 0.0, 10.0, 1.0);
        let overlay = DragOverlay::new(nid("n:b"), Point::new(0.0, 0.0), Some(placeholder));
        let scene = build_scene(&outline, &layout, &options, transform, None, Some(&overlay));

        assert_eq!(scene.placeholder(), Some(placeholder.translated(5.0, 7.0)));
        assert_eq!(scene.bounds(), layout.bounds().translated(5.0, 7.0));
    }

    #[test]
    fn collapsed_cards_report_their_hidden_children() {
        let mut outline = outline_two_roots();
        query::find_node_mut(&mut outline, &nid("n:scope"))
            .expect("scope")
            .set_collapsed(true);
        let options = LayoutOptions::default();
        let layout = layout_outline(&outline, &TextMeasure::default(), &options);
        let scene = build_scene(
            &outline,
            &layout,
            &options,
            SurfaceTransform::default(),
            None,
            None,
        );

        let scope = scene
            .cards()
            .iter()
            .find(|card| card.id() == &nid("n:scope"))
            .expect("scope card");
        assert_eq!(scope.hidden_children(), 2);
        assert!(scene.cards().iter().all(|card| card.id() != &nid("n:in")));
    }
}
