// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scene construction and text helpers for the terminal chrome.

pub mod scene;
pub(crate) mod text;

pub use scene::{build_scene, CardVisual, DragOverlay, Scene, SegmentVisual, TextMeasure};
