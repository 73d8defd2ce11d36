// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use ramify::format::ParsedDocument;
use ramify::layout::OutlineLayout;
use ramify::model::{Node, NodeId, Outline};

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }

    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

pub fn checksum_outline(outline: &Outline) -> u64 {
    fn walk(node: &Node, acc: u64) -> u64 {
        let mut acc = acc
            .wrapping_mul(131)
            .wrapping_add(node.title().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.level() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node.children().len() as u64);
        if let Some(description) = node.description() {
            acc = acc.wrapping_mul(131).wrapping_add(description.len() as u64);
        }
        for child in node.children() {
            acc = walk(child, acc);
        }
        acc
    }

    let mut acc = 0u64;
    for root in outline.roots() {
        acc = walk(root, acc);
    }
    acc
}

pub fn checksum_layout(layout: &OutlineLayout) -> u64 {
    let mut acc = 0u64;
    for (id, placement) in layout.placements() {
        let card = placement.card();
        acc = acc.wrapping_mul(131).wrapping_add(id.as_ref().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(card.left().to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(card.top().to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(card.height().to_bits());
    }
    acc
}

/// Every node id in document order, for driving edit batches.
pub fn node_ids(outline: &Outline) -> Vec<NodeId> {
    fn walk(node: &Node, out: &mut Vec<NodeId>) {
        out.push(node.id().clone());
        for child in node.children() {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    for root in outline.roots() {
        walk(root, &mut out);
    }
    out
}

pub mod outline {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        pub roots: usize,
        pub children_per_node: usize,
        pub depth: usize,
        pub title_len: usize,
        pub with_bodies: bool,
    }

    impl Params {
        pub const fn new(
            roots: usize,
            children_per_node: usize,
            depth: usize,
            title_len: usize,
            with_bodies: bool,
        ) -> Self {
            Self {
                roots,
                children_per_node,
                depth,
                title_len,
                with_bodies,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        MediumWide,
        DeepNarrow,
        LargeLongTitles,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::MediumWide => "medium_wide",
                Self::DeepNarrow => "deep_narrow",
                Self::LargeLongTitles => "large_long_titles",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(2, 3, 3, 12, false),
                Self::MediumWide => Params::new(4, 6, 3, 12, true),
                Self::DeepNarrow => Params::new(1, 2, 6, 12, false),
                Self::LargeLongTitles => Params::new(6, 5, 4, 64, true),
            }
        }
    }

    fn push_subtree(out: &mut String, params: Params, level: usize, path: &mut Vec<usize>) {
        let base = {
            let mut name = String::from("Card");
            for part in path.iter() {
                name.push('_');
                name.push_str(&format!("{part:02}"));
            }
            name
        };
        let title = ascii_repeat_to_len(&base, 'x', params.title_len);

        out.push_str(&"#".repeat(level));
        out.push(' ');
        out.push_str(&title);
        out.push('\n');
        if params.with_bodies {
            out.push('\n');
            out.push_str(&format!("Body text for {base}.\n"));
        }
        out.push('\n');

        if level >= params.depth {
            return;
        }
        for idx in 0..params.children_per_node {
            path.push(idx);
            push_subtree(out, params, level + 1, path);
            path.pop();
        }
    }

    /// Deterministic Markdown document: a full tree of headings, heading
    /// levels 1..=depth, stable titles.
    pub fn markdown(params: Params) -> String {
        assert!(params.roots >= 1, "roots must be >= 1");
        assert!(params.depth >= 1 && params.depth <= 6, "depth must be 1..=6");

        let mut out = String::new();
        for idx in 0..params.roots {
            let mut path = vec![idx];
            push_subtree(&mut out, params, 1, &mut path);
        }
        out
    }

    pub fn document(case: Case) -> ParsedDocument {
        ramify::format::parse_outline(&markdown(case.params()))
    }

    pub fn fixture(case: Case) -> String {
        markdown(case.params())
    }
}
