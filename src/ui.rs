// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared UI state for cross-component coordination.
//!
//! Selection and pan live here so the chrome, the drag controller, and the
//! scene builder all read one source of truth. Layout recomputes are
//! coalesced through `FrameFlag`: any number of invalidations between two
//! frames collapse into a single recompute.

use crate::layout::geometry::Point;
use crate::model::ids::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    rev: u64,
    selection: Option<NodeId>,
    pan: Point,
}

impl Default for UiState {
    fn default() -> Self {
        Self { rev: 0, selection: None, pan: Point::new(0.0, 0.0) }
    }
}

impl UiState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn set_selection(&mut self, selection: Option<NodeId>) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.pan = self.pan.offset(dx, dy);
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn set_pan(&mut self, pan: Point) {
        if self.pan == pan {
            return;
        }
        self.pan = pan;
        self.rev = self.rev.wrapping_add(1);
    }
}

/// Dirty + scheduled pair for frame-coalesced recomputes.
///
/// `invalidate` marks work pending and reports whether a frame callback
/// still needs to be scheduled; `run_frame` consumes one scheduled frame and
/// reports whether the expensive recompute must actually run. Repeated
/// invalidations between frames cost one recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameFlag {
    dirty: bool,
    scheduled: bool,
}

impl FrameFlag {
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Returns true exactly when the caller must schedule a frame callback.
    #[must_use]
    pub fn invalidate(&mut self) -> bool {
        self.dirty = true;
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Returns true when the recompute should run this frame.
    #[must_use]
    pub fn run_frame(&mut self) -> bool {
        self.scheduled = false;
        std::mem::take(&mut self.dirty)
    }
}
