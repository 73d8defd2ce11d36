// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over an outline.
//!
//! Queries provide derived views (lookups, ancestor chains, visibility) that
//! power the layout engine, the drag controller, and the UI.

pub mod outline;

pub use outline::{
    find_node, find_node_mut, parent_chain, selection_path, subtree_contains, title_search,
    visible_nodes, TitleSearchMode,
};
