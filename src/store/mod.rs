// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document persistence: the Markdown file plus its presentation sidecar.

pub mod sidecar;

pub use sidecar::{DocumentStore, NodeMeta, StoreError, WriteDurability};
