// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::fixtures::{outline_abc, outline_two_roots};
use crate::model::{Node, NodeId, NodeIdGen, Outline};
use crate::query;

use super::{
    apply_action, insert_child, insert_root, insert_sibling, move_node, remove_node,
    set_collapsed, toggle_collapsed, update_node, Action, ActionOutcome, MoveMode, MovePosition,
    NodePatch,
};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn child_titles(outline: &Outline, id: &str) -> Vec<String> {
    query::find_node(outline, &nid(id))
        .expect("node")
        .children()
        .iter()
        .map(|node| node.title().to_owned())
        .collect()
}

fn assert_structurally_sound(outline: &Outline) {
    use std::collections::BTreeSet;

    fn walk<'a>(node: &'a Node, expected_level: u32, seen: &mut BTreeSet<&'a str>) {
        assert_eq!(node.level(), expected_level, "level of {}", node.id());
        assert!(seen.insert(node.id().as_str()), "duplicate id {}", node.id());
        for child in node.children() {
            assert_eq!(child.parent_id(), Some(node.id()), "parent of {}", child.id());
            walk(child, expected_level + 1, seen);
        }
    }

    let mut seen = BTreeSet::new();
    for root in outline.roots() {
        assert!(root.parent_id().is_none());
        walk(root, 1, &mut seen);
    }
}

#[test]
fn insert_sibling_lands_immediately_after_the_reference() {
    let mut outline = outline_abc();
    let mut id_gen = NodeIdGen::resuming_after(100);

    let created = insert_sibling(&mut outline, &mut id_gen, &nid("n:b"), "B2").expect("insert");
    assert_eq!(child_titles(&outline, "n:a"), vec!["B", "B2", "C"]);

    let node = query::find_node(&outline, &created).expect("created node");
    assert_eq!(node.level(), 2);
    assert_eq!(node.parent_id(), Some(&nid("n:a")));
    assert_structurally_sound(&outline);
}

#[test]
fn insert_sibling_of_a_root_extends_the_forest() {
    let mut outline = outline_abc();
    let mut id_gen = NodeIdGen::resuming_after(100);

    let created = insert_sibling(&mut outline, &mut id_gen, &nid("n:a"), "A2").expect("insert");
    assert_eq!(outline.roots().len(), 2);
    assert_eq!(outline.roots()[1].id(), &created);
    assert_eq!(outline.roots()[1].level(), 1);
    assert!(outline.roots()[1].parent_id().is_none());
    assert_structurally_sound(&outline);
}

#[test]
fn insert_sibling_of_unknown_reference_is_a_no_op() {
    let mut outline = outline_abc();
    let mut id_gen = NodeIdGen::resuming_after(100);
    let before = outline.clone();

    assert!(insert_sibling(&mut outline, &mut id_gen, &nid("n:gone"), "X").is_none());
    assert_eq!(outline, before);
}

#[test]
fn insert_child_appends_at_parent_level_plus_one() {
    let mut outline = outline_abc();
    let mut id_gen = NodeIdGen::resuming_after(100);

    let created = insert_child(&mut outline, &mut id_gen, &nid("n:c"), "C1").expect("insert");
    let node = query::find_node(&outline, &created).expect("created node");
    assert_eq!(node.level(), 3);
    assert_eq!(node.parent_id(), Some(&nid("n:c")));
    assert_structurally_sound(&outline);

    assert!(insert_child(&mut outline, &mut id_gen, &nid("n:gone"), "X").is_none());
}

#[test]
fn insert_root_always_succeeds() {
    let mut outline = Outline::default();
    let mut id_gen = NodeIdGen::new();

    let first = insert_root(&mut outline, &mut id_gen, "First");
    let second = insert_root(&mut outline, &mut id_gen, "Second");
    assert_ne!(first, second);
    assert_eq!(outline.roots().len(), 2);
    assert_structurally_sound(&outline);
}

#[test]
fn remove_node_takes_the_whole_subtree() {
    let mut outline = outline_two_roots();
    assert!(remove_node(&mut outline, &nid("n:scope")));
    assert!(query::find_node(&outline, &nid("n:scope")).is_none());
    assert!(query::find_node(&outline, &nid("n:in")).is_none());
    assert!(query::find_node(&outline, &nid("n:out")).is_none());
    assert_structurally_sound(&outline);

    assert!(!remove_node(&mut outline, &nid("n:scope")));
}

#[test]
fn update_node_merges_only_given_fields() {
    let mut outline = outline_abc();
    let patch = NodePatch {
        title: Some("A, renamed".to_owned()),
        color: Some("plum".to_owned()),
        ..NodePatch::default()
    };
    assert!(update_node(&mut outline, &nid("n:a"), &patch));

    let node = query::find_node(&outline, &nid("n:a")).expect("node");
    assert_eq!(node.title(), "A, renamed");
    assert_eq!(node.color(), Some("plum"));
    assert_eq!(node.description(), None);
    assert_eq!(node.level(), 1);

    assert!(!update_node(&mut outline, &nid("n:gone"), &patch));
}

#[test]
fn toggle_collapsed_leaves_descendants_alone() {
    let mut outline = outline_two_roots();
    set_collapsed(&mut outline, &nid("n:in"), true);

    assert!(toggle_collapsed(&mut outline, &nid("n:scope")));
    assert!(query::find_node(&outline, &nid("n:scope")).expect("scope").collapsed());
    assert!(query::find_node(&outline, &nid("n:in")).expect("in").collapsed());

    assert!(toggle_collapsed(&mut outline, &nid("n:scope")));
    assert!(!query::find_node(&outline, &nid("n:scope")).expect("scope").collapsed());
}

#[test]
fn move_sibling_after_reorders_within_the_parent() {
    // A(B, C); move B after C => A(C, B).
    let mut outline = outline_abc();
    assert!(move_node(
        &mut outline,
        &nid("n:b"),
        &nid("n:c"),
        MoveMode::Sibling,
        MovePosition::After
    ));
    assert_eq!(child_titles(&outline, "n:a"), vec!["C", "B"]);
    assert_structurally_sound(&outline);
}

#[test]
fn move_to_child_reparents_and_renormalizes_levels() {
    let mut outline = outline_two_roots();
    // Move the whole "Scope" subtree under "Part one" (level 2 -> level 3).
    assert!(move_node(
        &mut outline,
        &nid("n:scope"),
        &nid("n:part1"),
        MoveMode::Child,
        MovePosition::Append
    ));

    let scope = query::find_node(&outline, &nid("n:scope")).expect("scope");
    assert_eq!(scope.level(), 3);
    assert_eq!(scope.parent_id(), Some(&nid("n:part1")));
    let inner = query::find_node(&outline, &nid("n:in")).expect("in");
    assert_eq!(inner.level(), 4);
    assert_structurally_sound(&outline);
}

#[test]
fn move_sibling_before_across_parents() {
    let mut outline = outline_two_roots();
    assert!(move_node(
        &mut outline,
        &nid("n:part1"),
        &nid("n:goals"),
        MoveMode::Sibling,
        MovePosition::Before
    ));
    assert_eq!(child_titles(&outline, "n:intro"), vec!["Scope", "Part one", "Goals"]);
    let moved = query::find_node(&outline, &nid("n:part1")).expect("moved");
    assert_eq!(moved.level(), 2);
    assert_eq!(moved.parent_id(), Some(&nid("n:intro")));
    assert_structurally_sound(&outline);
}

#[test]
fn move_node_to_root_level_clears_the_parent_link() {
    let mut outline = outline_two_roots();
    assert!(move_node(
        &mut outline,
        &nid("n:scope"),
        &nid("n:body"),
        MoveMode::Sibling,
        MovePosition::After
    ));
    let scope = query::find_node(&outline, &nid("n:scope")).expect("scope");
    assert_eq!(scope.level(), 1);
    assert!(scope.parent_id().is_none());
    assert_eq!(query::find_node(&outline, &nid("n:in")).expect("in").level(), 2);
    assert_structurally_sound(&outline);
}

#[test]
fn move_rejects_self_and_descendant_targets_unchanged() {
    let mut outline = outline_two_roots();
    let before = outline.clone();

    assert!(!move_node(
        &mut outline,
        &nid("n:scope"),
        &nid("n:scope"),
        MoveMode::Sibling,
        MovePosition::After
    ));
    assert_eq!(outline, before);

    // "n:in" is a descendant of "n:scope": the cycle guard must refuse.
    assert!(!move_node(
        &mut outline,
        &nid("n:scope"),
        &nid("n:in"),
        MoveMode::Child,
        MovePosition::Append
    ));
    assert_eq!(outline, before);

    assert!(!move_node(
        &mut outline,
        &nid("n:gone"),
        &nid("n:scope"),
        MoveMode::Sibling,
        MovePosition::After
    ));
    assert!(!move_node(
        &mut outline,
        &nid("n:scope"),
        &nid("n:gone"),
        MoveMode::Sibling,
        MovePosition::After
    ));
    assert_eq!(outline, before);
}

#[test]
fn invariants_hold_across_a_mixed_edit_sequence() {
    let mut outline = outline_two_roots();
    let mut id_gen = NodeIdGen::resuming_after(100);

    let a = insert_child(&mut outline, &mut id_gen, &nid("n:goals"), "Nested").expect("insert");
    assert_structurally_sound(&outline);
    insert_sibling(&mut outline, &mut id_gen, &a, "Nested 2").expect("insert");
    assert_structurally_sound(&outline);
    assert!(move_node(&mut outline, &nid("n:goals"), &nid("n:body"), MoveMode::Child, MovePosition::Append));
    assert_structurally_sound(&outline);
    assert!(remove_node(&mut outline, &nid("n:scope")));
    assert_structurally_sound(&outline);
    assert!(move_node(&mut outline, &a, &nid("n:intro"), MoveMode::Sibling, MovePosition::Before));
    assert_structurally_sound(&outline);
}

#[test]
fn apply_action_routes_to_the_mutators() {
    let mut outline = outline_abc();
    let mut id_gen = NodeIdGen::resuming_after(100);
    let rev_before = outline.rev();

    let outcome = apply_action(
        &mut outline,
        &mut id_gen,
        &Action::Reorder {
            id: nid("n:b"),
            target: nid("n:c"),
            mode: MoveMode::Sibling,
            position: MovePosition::After,
        },
    );
    assert!(outcome.is_applied());
    assert_eq!(child_titles(&outline, "n:a"), vec!["C", "B"]);
    assert!(outline.rev() > rev_before);

    let outcome = apply_action(&mut outline, &mut id_gen, &Action::Select { id: nid("n:b") });
    assert_eq!(outcome, ActionOutcome::Selected(nid("n:b")));

    let outcome = apply_action(&mut outline, &mut id_gen, &Action::Delete { id: nid("n:gone") });
    assert_eq!(outcome, ActionOutcome::NoEffect);
}

#[test]
fn add_sibling_action_falls_back_to_a_new_root() {
    let mut outline = outline_abc();
    let mut id_gen = NodeIdGen::resuming_after(100);

    let outcome = apply_action(&mut outline, &mut id_gen, &Action::AddSibling { id: nid("n:gone") });
    let ActionOutcome::Applied { created: Some(created) } = outcome else {
        panic!("expected a created node");
    };
    let node = query::find_node(&outline, &created).expect("created node");
    assert_eq!(node.level(), 1);
    assert!(node.parent_id().is_none());
}

#[test]
fn expand_and_collapse_actions_are_idempotent_at_the_outcome_level() {
    let mut outline = outline_abc();
    let mut id_gen = NodeIdGen::new();

    let outcome = apply_action(&mut outline, &mut id_gen, &Action::Collapse { id: nid("n:a") });
    assert!(outcome.is_applied());
    let outcome = apply_action(&mut outline, &mut id_gen, &Action::Collapse { id: nid("n:a") });
    assert_eq!(outcome, ActionOutcome::NoEffect);
    let outcome = apply_action(&mut outline, &mut id_gen, &Action::Expand { id: nid("n:a") });
    assert!(outcome.is_applied());
}
