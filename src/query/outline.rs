// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;

use crate::model::ids::NodeId;
use crate::model::node::{Node, Outline};

/// Depth-first lookup. Ids are unique across the forest, so first match wins.
pub fn find_node<'a>(outline: &'a Outline, id: &NodeId) -> Option<&'a Node> {
    fn walk<'a>(nodes: &'a [Node], id: &NodeId) -> Option<&'a Node> {
        for node in nodes {
            if node.id() == id {
                return Some(node);
            }
            if let Some(found) = walk(node.children(), id) {
                return Some(found);
            }
        }
        None
    }
    walk(outline.roots(), id)
}

pub fn find_node_mut<'a>(outline: &'a mut Outline, id: &NodeId) -> Option<&'a mut Node> {
    fn walk<'a>(nodes: &'a mut [Node], id: &NodeId) -> Option<&'a mut Node> {
        for node in nodes {
            if node.id() == id {
                return Some(node);
            }
            if let Some(found) = walk(node.children_mut(), id) {
                return Some(found);
            }
        }
        None
    }
    walk(outline.roots_mut(), id)
}

/// Ancestors of `id` ordered shallowest first, excluding the node itself.
///
/// Empty for roots and for unknown ids (lookups fail softly).
pub fn parent_chain<'a>(outline: &'a Outline, id: &NodeId) -> Vec<&'a Node> {
    fn walk<'a>(nodes: &'a [Node], id: &NodeId, chain: &mut Vec<&'a Node>) -> bool {
        for node in nodes {
            if node.id() == id {
                return true;
            }
            chain.push(node);
            if walk(node.children(), id, chain) {
                return true;
            }
            chain.pop();
        }
        false
    }

    let mut chain = Vec::new();
    if walk(outline.roots(), id, &mut chain) {
        chain
    } else {
        Vec::new()
    }
}

/// Whether `id` lies inside `node`'s subtree, the node itself included.
///
/// This is the cycle guard for moves: a node may not be dropped onto itself
/// or any of its descendants.
pub fn subtree_contains(node: &Node, id: &NodeId) -> bool {
    if node.id() == id {
        return true;
    }
    node.children().iter().any(|child| subtree_contains(child, id))
}

/// All nodes whose cards are currently visible, in pre-order.
///
/// A collapsed node is itself visible; its descendants are not.
pub fn visible_nodes(outline: &Outline) -> Vec<&Node> {
    fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Node>) {
        for node in nodes {
            out.push(node);
            if !node.collapsed() {
                walk(node.children(), out);
            }
        }
    }

    let mut out = Vec::new();
    walk(outline.roots(), &mut out);
    out
}

/// The chain from the root down to `id`, the node itself included.
///
/// This is the "in path" set used for selection highlighting; it is a pure
/// rendering attribute and never affects geometry.
pub fn selection_path(outline: &Outline, id: &NodeId) -> Vec<NodeId> {
    let mut path = parent_chain(outline, id)
        .into_iter()
        .map(|node| node.id().clone())
        .collect::<Vec<_>>();
    if find_node(outline, id).is_some() {
        path.push(id.clone());
    }
    path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSearchMode {
    Substring,
    Regex,
}

pub fn title_search<'a>(
    outline: &'a Outline,
    needle: &str,
    mode: TitleSearchMode,
    case_insensitive: bool,
) -> Result<Vec<&'a Node>, regex::Error> {
    fn collect<'a>(nodes: &'a [Node], keep: &impl Fn(&Node) -> bool, out: &mut Vec<&'a Node>) {
        for node in nodes {
            if keep(node) {
                out.push(node);
            }
            collect(node.children(), keep, out);
        }
    }

    let mut out = Vec::new();
    match mode {
        TitleSearchMode::Substring => {
            if case_insensitive {
                let needle_lower = needle.to_lowercase();
                collect(
                    outline.roots(),
                    &|node: &Node| node.title().to_lowercase().contains(&needle_lower),
                    &mut out,
                );
            } else {
                collect(outline.roots(), &|node: &Node| node.title().contains(needle), &mut out);
            }
        }
        TitleSearchMode::Regex => {
            let regex = RegexBuilder::new(needle)
                .case_insensitive(case_insensitive)
                .build()?;
            collect(outline.roots(), &|node: &Node| regex.is_match(node.title()), &mut out);
        }
    }
    Ok(out)
}
