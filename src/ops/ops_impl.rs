// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Creates a new empty node right after `after` in its containing sequence,
/// at `after`'s level. `None` if `after` is unknown; callers that want a
/// guaranteed insert fall back to [`insert_root`].
pub fn insert_sibling(
    outline: &mut Outline,
    id_gen: &mut NodeIdGen,
    after: &NodeId,
    title: impl Into<String>,
) -> Option<NodeId> {
    if query::find_node(outline, after).is_none() {
        return None;
    }

    // Level and parent link are assigned by the placement below.
    let node = Node::new(id_gen.next_id(), title, 1);
    let id = node.id().clone();
    match place_beside(outline.roots_mut(), None, after, node, MovePosition::After) {
        Ok(()) => {
            outline.bump_rev();
            debug_assert_invariants(outline);
            Some(id)
        }
        Err(_) => None,
    }
}

/// Appends a new empty node to `parent`'s children. `None` if `parent` is
/// unknown.
pub fn insert_child(
    outline: &mut Outline,
    id_gen: &mut NodeIdGen,
    parent: &NodeId,
    title: impl Into<String>,
) -> Option<NodeId> {
    let new_id = id_gen.next_id();
    let parent_node = query::find_node_mut(outline, parent)?;
    let mut node = Node::new(new_id.clone(), title, parent_node.level() + 1);
    node.set_parent_id(Some(parent_node.id().clone()));
    parent_node.children_mut().push(node);
    outline.bump_rev();
    debug_assert_invariants(outline);
    Some(new_id)
}

/// Appends a new root node. Always succeeds.
pub fn insert_root(
    outline: &mut Outline,
    id_gen: &mut NodeIdGen,
    title: impl Into<String>,
) -> NodeId {
    let node = Node::new(id_gen.next_id(), title, 1);
    let id = node.id().clone();
    outline.roots_mut().push(node);
    outline.bump_rev();
    debug_assert_invariants(outline);
    id
}

/// Removes the node and its entire subtree from wherever it sits.
pub fn remove_node(outline: &mut Outline, id: &NodeId) -> bool {
    let removed = detach_node(outline.roots_mut(), id).is_some();
    if removed {
        outline.bump_rev();
        debug_assert_invariants(outline);
    }
    removed
}

/// Shallow-merges the given patch fields into the node's content and
/// presentation state. Structural fields are untouched by design.
pub fn update_node(outline: &mut Outline, id: &NodeId, patch: &NodePatch) -> bool {
    let Some(node) = query::find_node_mut(outline, id) else {
        return false;
    };

    if let Some(title) = &patch.title {
        node.set_title(title.clone());
    }
    if let Some(description) = &patch.description {
        node.set_description(Some(description.clone()));
    }
    if let Some(rich_title) = &patch.rich_title {
        node.set_rich_title(Some(rich_title.clone()));
    }
    if let Some(rich_description) = &patch.rich_description {
        node.set_rich_description(Some(rich_description.clone()));
    }
    if let Some(color) = &patch.color {
        node.set_color(Some(color.clone()));
    }
    if let Some(stroke_weight) = patch.stroke_weight {
        node.set_stroke_weight(Some(stroke_weight));
    }
    if let Some(width) = patch.width {
        node.set_width(Some(width));
    }

    outline.bump_rev();
    true
}

pub fn clear_color(outline: &mut Outline, id: &NodeId) -> bool {
    let Some(node) = query::find_node_mut(outline, id) else {
        return false;
    };
    node.set_color::<&str>(None);
    outline.bump_rev();
    true
}

pub fn set_width(outline: &mut Outline, id: &NodeId, width: Option<u16>) -> bool {
    let Some(node) = query::find_node_mut(outline, id) else {
        return false;
    };
    node.set_width(width);
    outline.bump_rev();
    true
}

/// Flips the node's own collapsed flag; descendants keep theirs.
pub fn toggle_collapsed(outline: &mut Outline, id: &NodeId) -> bool {
    let Some(node) = query::find_node_mut(outline, id) else {
        return false;
    };
    let collapsed = node.collapsed();
    node.set_collapsed(!collapsed);
    outline.bump_rev();
    true
}

/// Sets the collapsed flag to an explicit value; `false` when the node is
/// unknown or already in that state.
pub fn set_collapsed(outline: &mut Outline, id: &NodeId, collapsed: bool) -> bool {
    let Some(node) = query::find_node_mut(outline, id) else {
        return false;
    };
    if node.collapsed() == collapsed {
        return false;
    }
    node.set_collapsed(collapsed);
    outline.bump_rev();
    true
}

/// Relocates `id` (with its whole subtree) relative to `target`.
///
/// No-op returning `false` when `id == target`, when either end cannot be
/// located, or when `target` lies inside `id`'s subtree (the cycle guard).
/// After relocation the moved subtree's `parent_id`/`level` fields are
/// renormalized depth-first.
pub fn move_node(
    outline: &mut Outline,
    id: &NodeId,
    target: &NodeId,
    mode: MoveMode,
    position: MovePosition,
) -> bool {
    if id == target {
        return false;
    }
    let Some(moving) = query::find_node(outline, id) else {
        return false;
    };
    if query::subtree_contains(moving, target) {
        return false;
    }
    if query::find_node(outline, target).is_none() {
        return false;
    }

    let Some(node) = detach_node(outline.roots_mut(), id) else {
        return false;
    };

    let placed = match mode {
        MoveMode::Child => {
            let parent = query::find_node_mut(outline, target)
                .expect("target existence checked before detach");
            let mut node = node;
            node.set_parent_id(Some(parent.id().clone()));
            renormalize_levels(&mut node, parent.level() + 1);
            parent.children_mut().push(node);
            Ok(())
        }
        MoveMode::Sibling => place_beside(outline.roots_mut(), None, target, node, position),
    };

    debug_assert!(placed.is_ok(), "target vanished between guard and placement");
    if placed.is_err() {
        return false;
    }

    outline.bump_rev();
    debug_assert_invariants(outline);
    true
}

/// Removes and returns the node with `id` from anywhere in the forest.
fn detach_node(nodes: &mut Vec<Node>, id: &NodeId) -> Option<Node> {
    if let Some(index) = nodes.iter().position(|node| node.id() == id) {
        return Some(nodes.remove(index));
    }
    for node in nodes.iter_mut() {
        if let Some(found) = detach_node(node.children_mut(), id) {
            return Some(found);
        }
    }
    None
}

/// Inserts `node` into the sequence containing `target`, before/after the
/// target or at the end of that sequence, fixing up the moved subtree's
/// parent link and levels. Hands the node back on a miss so ownership never
/// leaks.
fn place_beside(
    nodes: &mut Vec<Node>,
    parent: Option<(NodeId, u32)>,
    target: &NodeId,
    node: Node,
    position: MovePosition,
) -> Result<(), Node> {
    if let Some(index) = nodes.iter().position(|candidate| candidate.id() == target) {
        let at = match position {
            MovePosition::Before => index,
            MovePosition::After => index + 1,
            MovePosition::Append => nodes.len(),
        };
        let (parent_id, parent_level) = match parent {
            Some((id, level)) => (Some(id), level),
            None => (None, 0),
        };
        let mut node = node;
        node.set_parent_id(parent_id);
        renormalize_levels(&mut node, parent_level + 1);
        nodes.insert(at, node);
        return Ok(());
    }

    let mut node = node;
    for candidate in nodes.iter_mut() {
        let context = (candidate.id().clone(), candidate.level());
        match place_beside(candidate.children_mut(), Some(context), target, node, position) {
            Ok(()) => return Ok(()),
            Err(returned) => node = returned,
        }
    }
    Err(node)
}

/// Depth-first level/parent renormalization of a subtree rooted at `node`.
fn renormalize_levels(node: &mut Node, level: u32) {
    node.set_level(level);
    let parent_id = node.id().clone();
    for child in node.children_mut() {
        child.set_parent_id(Some(parent_id.clone()));
        renormalize_levels(child, level + 1);
    }
}

/// Debug-build structural audit: level depth, parent back-links, id
/// uniqueness. A violation here is a bug in this module, not a runtime
/// condition, hence assertions rather than error returns.
fn debug_assert_invariants(outline: &Outline) {
    #[cfg(debug_assertions)]
    {
        use std::collections::BTreeSet;

        fn walk<'a>(node: &'a Node, expected_level: u32, seen: &mut BTreeSet<&'a str>) {
            debug_assert_eq!(node.level(), expected_level, "level mismatch at {}", node.id());
            debug_assert!(seen.insert(node.id().as_str()), "duplicate id {}", node.id());
            for child in node.children() {
                debug_assert_eq!(
                    child.parent_id(),
                    Some(node.id()),
                    "parent link mismatch at {}",
                    child.id()
                );
                walk(child, expected_level + 1, seen);
            }
        }

        let mut seen = BTreeSet::new();
        for root in outline.roots() {
            debug_assert!(root.parent_id().is_none(), "root {} has a parent link", root.id());
            walk(root, 1, &mut seen);
        }
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = outline;
    }
}
