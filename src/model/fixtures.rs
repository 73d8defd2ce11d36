// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeId;
use super::node::{Node, Outline};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn child_of(parent: &mut Node, id: &str, title: &str) -> usize {
    let mut node = Node::new(nid(id), title, parent.level() + 1);
    node.set_parent_id(Some(parent.id().clone()));
    parent.children_mut().push(node);
    parent.children().len() - 1
}

/// One root "A" with children "B" and "C", the smallest interesting forest.
pub(crate) fn outline_abc() -> Outline {
    let mut a = Node::new(nid("n:a"), "A", 1);
    child_of(&mut a, "n:b", "B");
    child_of(&mut a, "n:c", "C");
    Outline::new(vec![a])
}

/// Two roots, three levels deep, uneven branching.
pub(crate) fn outline_two_roots() -> Outline {
    let mut intro = Node::new(nid("n:intro"), "Introduction", 1);
    let scope = child_of(&mut intro, "n:scope", "Scope");
    child_of(&mut intro, "n:goals", "Goals");
    {
        let scope = &mut intro.children_mut()[scope];
        child_of(scope, "n:in", "In scope");
        child_of(scope, "n:out", "Out of scope");
    }

    let mut body = Node::new(nid("n:body"), "Body", 1);
    child_of(&mut body, "n:part1", "Part one");

    Outline::new(vec![intro, body])
}

/// A wide forest for layout/bench work: `roots` roots, each with `spread`
/// children, each of those with `spread` children of their own.
pub(crate) fn outline_grid(roots: usize, spread: usize) -> Outline {
    let mut forest = Vec::with_capacity(roots);
    for r in 0..roots {
        let mut root = Node::new(nid(&format!("n:r{r:03}")), format!("Root {r}"), 1);
        for c in 0..spread {
            let idx = child_of(&mut root, &format!("n:r{r:03}c{c:03}"), &format!("Child {r}.{c}"));
            let child = &mut root.children_mut()[idx];
            for g in 0..spread {
                child_of(child, &format!("n:r{r:03}c{c:03}g{g:03}"), &format!("Leaf {r}.{c}.{g}"));
            }
        }
        forest.push(root);
    }
    Outline::new(forest)
}
