// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: the outline forest and its nodes.
//!
//! Structural invariants (level depth, parent back-links, id uniqueness,
//! acyclicity) are maintained by `crate::ops`; the model itself is plain
//! owned data.

pub(crate) mod fixtures;
pub mod ids;
pub mod node;

pub use ids::{Id, IdError, NodeId, NodeIdGen};
pub use node::{Node, Outline, SourceRef};
