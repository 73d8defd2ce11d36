// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ramify: terminal outline card-map editor.
//!
//! A Markdown heading hierarchy becomes a tree of visual cards; structural
//! edits flow through `ops`, geometry through `layout`, and the Markdown
//! serialization stays derivable via `format`.

pub mod drag;
pub mod format;
pub mod layout;
pub mod model;
pub mod ops;
pub mod query;
pub mod render;
pub mod store;
pub mod tui;
pub mod ui;
