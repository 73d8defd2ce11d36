// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural mutations of an outline.
//!
//! Every mutator takes the outline by `&mut`, runs synchronously, and fails
//! softly: operations on absent ids are no-ops reported through the return
//! value, never through panics. Invariant violations are programming errors
//! and surface as debug assertions only.

use crate::model::{Node, NodeId, NodeIdGen, Outline};
use crate::query;

/// How a moved node relates to its drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    Sibling,
    Child,
}

/// Where a sibling move lands relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePosition {
    Before,
    After,
    Append,
}

/// Shallow content/presentation patch applied by [`update_node`].
///
/// Fields left `None` are untouched; structural fields (level, parent,
/// children) are never patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rich_title: Option<String>,
    pub rich_description: Option<String>,
    pub color: Option<String>,
    pub stroke_weight: Option<u8>,
    pub width: Option<u16>,
}

/// The action channel the presentation chrome drives.
///
/// The chrome translates gestures into these; `apply_action` is the sole
/// handler and the only code path that mutates an outline at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Select { id: NodeId },
    Edit { id: NodeId, patch: NodePatch },
    Delete { id: NodeId },
    AddSibling { id: NodeId },
    AddChild { id: NodeId },
    ChangeColor { id: NodeId, color: Option<String> },
    Resize { id: NodeId, width: Option<u16> },
    Reorder { id: NodeId, target: NodeId, mode: MoveMode, position: MovePosition },
    Expand { id: NodeId },
    Collapse { id: NodeId },
}

/// What an [`apply_action`] call did.
///
/// Lookup misses and rejected structural requests (self-move, cyclic move)
/// both collapse into `NoEffect`; callers cannot tell them apart, matching
/// the mutators' shared falsy return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The outline changed; `created` names a freshly inserted node, if any.
    Applied { created: Option<NodeId> },
    /// A selection change for the chrome to adopt; the outline is untouched.
    Selected(NodeId),
    NoEffect,
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

pub fn apply_action(
    outline: &mut Outline,
    id_gen: &mut NodeIdGen,
    action: &Action,
) -> ActionOutcome {
    match action {
        Action::Select { id } => {
            if query::find_node(outline, id).is_some() {
                ActionOutcome::Selected(id.clone())
            } else {
                ActionOutcome::NoEffect
            }
        }
        Action::Edit { id, patch } => applied_if(update_node(outline, id, patch)),
        Action::Delete { id } => applied_if(remove_node(outline, id)),
        Action::AddSibling { id } => {
            // Falls back to a new root when the reference node is gone.
            let created = insert_sibling(outline, id_gen, id, "")
                .unwrap_or_else(|| insert_root(outline, id_gen, ""));
            ActionOutcome::Applied { created: Some(created) }
        }
        Action::AddChild { id } => match insert_child(outline, id_gen, id, "") {
            Some(created) => ActionOutcome::Applied { created: Some(created) },
            None => ActionOutcome::NoEffect,
        },
        Action::ChangeColor { id, color } => {
            let patch = NodePatch { color: color.clone(), ..NodePatch::default() };
            match color {
                Some(_) => applied_if(update_node(outline, id, &patch)),
                None => applied_if(clear_color(outline, id)),
            }
        }
        Action::Resize { id, width } => applied_if(set_width(outline, id, *width)),
        Action::Reorder { id, target, mode, position } => {
            applied_if(move_node(outline, id, target, *mode, *position))
        }
        Action::Expand { id } => applied_if(set_collapsed(outline, id, false)),
        Action::Collapse { id } => applied_if(set_collapsed(outline, id, true)),
    }
}

fn applied_if(changed: bool) -> ActionOutcome {
    if changed {
        ActionOutcome::Applied { created: None }
    } else {
        ActionOutcome::NoEffect
    }
}

// Extracted mutator implementation; keeps `ops::mod` focused on the public
// action surface and orchestration.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
