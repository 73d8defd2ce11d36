// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drag-based reparenting.
//!
//! A small pointer state machine: `Idle → Armed` on pointer-down over a
//! card, `Armed → Dragging` once movement exceeds the Manhattan threshold,
//! back to `Idle` on release or cancel. While dragging, every pointer move
//! resolves a drop intent against the last-settled layout; the structural
//! mutation happens exactly once, on release, through `ops::move_node`,
//! never from inside this module.

use crate::layout::cards::OutlineLayout;
use crate::layout::geometry::{Point, Rect};
use crate::model::ids::NodeId;
use crate::model::node::Outline;
use crate::ops::{MoveMode, MovePosition};
use crate::query;

/// Manhattan distance a pointer must travel before a press becomes a drag.
pub const DRAG_THRESHOLD: f64 = 8.0;

const PLACEHOLDER_THICKNESS: f64 = 1.0;

/// Vertical zone of a target card a dragged node may land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    SiblingBefore,
    SiblingAfter,
    Child,
}

impl DropZone {
    /// The `ops::move_node` arguments this zone commits to.
    pub fn move_args(self) -> (MoveMode, MovePosition) {
        match self {
            Self::SiblingBefore => (MoveMode::Sibling, MovePosition::Before),
            Self::SiblingAfter => (MoveMode::Sibling, MovePosition::After),
            Self::Child => (MoveMode::Child, MovePosition::Append),
        }
    }
}

/// Where the dragged node would land if released now, plus the single
/// placeholder rectangle shown for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIntent {
    target: NodeId,
    zone: DropZone,
    placeholder: Rect,
}

impl DropIntent {
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn zone(&self) -> DropZone {
        self.zone
    }

    pub fn placeholder(&self) -> Rect {
        self.placeholder
    }
}

/// What a pointer move asks the visual layer to do. Visual commits are
/// frame-coalesced by the caller (`ui::FrameFlag`), not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveFeedback {
    None,
    /// Dragged-card offset and/or placeholder changed; schedule a redraw.
    Visual,
    /// A root card is being dragged: pan the whole surface instead.
    Pan { dx: f64, dy: f64 },
}

/// What a release resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    None,
    /// Movement never exceeded the threshold: a plain click/select.
    Click(NodeId),
    /// Commit exactly this move.
    Drop {
        id: NodeId,
        target: NodeId,
        mode: MoveMode,
        position: MovePosition,
    },
    /// Dragging, but no valid intent at release: animate back, change nothing.
    Revert(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Armed {
        id: NodeId,
        is_root: bool,
        origin: Point,
    },
    Dragging {
        id: NodeId,
        origin: Point,
        offset: Point,
        intent: Option<DropIntent>,
    },
    Panning {
        last: Point,
    },
}

/// The drag-reorder state machine. One instance per interactive view.
#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    state: DragState,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self { state: DragState::Idle }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The node whose card currently tracks the pointer, if any.
    pub fn dragged(&self) -> Option<&NodeId> {
        match &self.state {
            DragState::Dragging { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Pointer delta the dragged card's visual should be offset by.
    pub fn drag_offset(&self) -> Option<Point> {
        match &self.state {
            DragState::Dragging { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn intent(&self) -> Option<&DropIntent> {
        match &self.state {
            DragState::Dragging { intent, .. } => intent.as_ref(),
            _ => None,
        }
    }

    /// Arms the controller if the pointer went down over a card.
    pub fn on_pointer_down(&mut self, point: Point, outline: &Outline, layout: &OutlineLayout) {
        self.state = match layout.card_at(point, None) {
            Some(id) => {
                let is_root = query::find_node(outline, id)
                    .map(|node| node.parent_id().is_none())
                    .unwrap_or(true);
                DragState::Armed { id: id.clone(), is_root, origin: point }
            }
            None => DragState::Idle,
        };
    }

    pub fn on_pointer_move(
        &mut self,
        point: Point,
        outline: &Outline,
        layout: &OutlineLayout,
    ) -> MoveFeedback {
        match &self.state {
            DragState::Idle => MoveFeedback::None,
            DragState::Armed { id, is_root, origin } => {
                if origin.manhattan_distance(point) <= DRAG_THRESHOLD {
                    return MoveFeedback::None;
                }
                if *is_root {
                    // Roots pan the surface; they cannot be reparented here.
                    let last = *origin;
                    self.state = DragState::Panning { last: point };
                    return MoveFeedback::Pan {
                        dx: point.x() - last.x(),
                        dy: point.y() - last.y(),
                    };
                }
                let id = id.clone();
                let origin = *origin;
                let intent = resolve_intent(&id, point, outline, layout);
                self.state = DragState::Dragging {
                    id,
                    origin,
                    offset: Point::new(point.x() - origin.x(), point.y() - origin.y()),
                    intent,
                };
                MoveFeedback::Visual
            }
            DragState::Panning { last } => {
                let delta = (point.x() - last.x(), point.y() - last.y());
                self.state = DragState::Panning { last: point };
                MoveFeedback::Pan { dx: delta.0, dy: delta.1 }
            }
            DragState::Dragging { id, origin, .. } => {
                let id = id.clone();
                let origin = *origin;
                let intent = resolve_intent(&id, point, outline, layout);
                self.state = DragState::Dragging {
                    id,
                    origin,
                    offset: Point::new(point.x() - origin.x(), point.y() - origin.y()),
                    intent,
                };
                MoveFeedback::Visual
            }
        }
    }

    pub fn on_pointer_up(&mut self, _point: Point) -> DragOutcome {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        match state {
            DragState::Idle | DragState::Panning { .. } => DragOutcome::None,
            // Below threshold the gesture was a click, not a drag.
            DragState::Armed { id, .. } => DragOutcome::Click(id),
            DragState::Dragging { id, intent, .. } => match intent {
                Some(intent) => {
                    let (mode, position) = intent.zone.move_args();
                    DragOutcome::Drop { id, target: intent.target, mode, position }
                }
                None => DragOutcome::Revert(id),
            },
        }
    }

    /// Pointer-cancel (loss of capture) behaves like a release with no valid
    /// drop: back to idle, no mutation.
    pub fn cancel(&mut self) -> DragOutcome {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        match state {
            DragState::Dragging { id, .. } => DragOutcome::Revert(id),
            _ => DragOutcome::None,
        }
    }
}

/// Resolves the drop intent for the current pointer position, or `None`
/// when there is no valid target (empty space, the dragged node itself, or
/// one of its descendants).
fn resolve_intent(
    dragged: &NodeId,
    point: Point,
    outline: &Outline,
    layout: &OutlineLayout,
) -> Option<DropIntent> {
    let candidate = layout.card_at(point, Some(dragged))?;
    let dragged_node = query::find_node(outline, dragged)?;
    if query::subtree_contains(dragged_node, candidate) {
        return None;
    }

    let card = layout.placement(candidate)?.card();
    let zone = classify_zone(card, point);
    Some(DropIntent {
        target: candidate.clone(),
        zone,
        placeholder: placeholder_rect(card, zone),
    })
}

/// Top quartile yields sibling-before, bottom quartile sibling-after, the
/// middle half child. Integer pointer rows address cell tops, so the zone
/// is taken at the cell center; a minimum-height card keeps all three
/// zones reachable.
pub fn classify_zone(card: Rect, point: Point) -> DropZone {
    let quartile = card.height() / 4.0;
    let y = point.y() + 0.5;
    if y < card.top() + quartile {
        DropZone::SiblingBefore
    } else if y >= card.bottom() - quartile {
        DropZone::SiblingAfter
    } else {
        DropZone::Child
    }
}

fn placeholder_rect(card: Rect, zone: DropZone) -> Rect {
    match zone {
        DropZone::SiblingBefore => Rect::new(
            card.left(),
            card.top() - PLACEHOLDER_THICKNESS,
            card.width(),
            PLACEHOLDER_THICKNESS,
        ),
        DropZone::SiblingAfter => {
            Rect::new(card.left(), card.bottom(), card.width(), PLACEHOLDER_THICKNESS)
        }
        DropZone::Child => Rect::new(
            card.right() + PLACEHOLDER_THICKNESS,
            card.center_y() - PLACEHOLDER_THICKNESS / 2.0,
            card.width(),
            PLACEHOLDER_THICKNESS,
        ),
    }
}
