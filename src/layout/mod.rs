// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Card layout for outlines.
//!
//! `cards` sizes and positions every visible subtree; `connector` derives the
//! trunk/branch line geometry from positions `cards` has already assigned.
//! Both are pure functions of an outline plus a measurement provider, so they
//! run (and are tested) without any terminal attached.

pub mod cards;
pub mod connector;
pub mod geometry;
#[cfg(test)]
pub(crate) mod test_support;

pub use cards::{layout_outline, CardPlacement, LayoutOptions, Measure, OutlineLayout};
pub use connector::{route_connectors, ConnectorSet, Segment};
pub use geometry::{Point, Rect, Size, SurfaceTransform};
