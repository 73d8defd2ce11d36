// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::ids::NodeId;
use crate::model::node::Node;

use super::cards::Measure;
use super::geometry::Size;

/// Deterministic measurement provider for layout/drag tests: a default card
/// size plus per-node overrides, no rendering surface involved.
#[derive(Debug, Clone)]
pub(crate) struct FixedMeasure {
    default: Size,
    overrides: BTreeMap<NodeId, Size>,
}

impl FixedMeasure {
    pub(crate) fn new(default: Size) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    pub(crate) fn set(&mut self, id: NodeId, size: Size) {
        self.overrides.insert(id, size);
    }
}

impl Measure for FixedMeasure {
    fn measure(&self, node: &Node) -> Size {
        self.overrides.get(node.id()).copied().unwrap_or(self.default)
    }
}
