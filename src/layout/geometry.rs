// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Float geometry in layout units.
//!
//! For the terminal surface a unit is one character cell, but nothing in
//! here assumes that.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Manhattan distance, the metric the drag threshold uses.
    pub fn manhattan_distance(self, other: Self) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x(), origin.y(), size.width(), size.height())
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x() >= self.left()
            && point.x() < self.right()
            && point.y() >= self.top()
            && point.y() < self.bottom()
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }

    /// Smallest rect covering both.
    pub fn union(self, other: Self) -> Self {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }
}

/// Maps card-local/layout coordinates into the shared drawing-surface space.
///
/// The surface may be panned (and cards carry their own local origins on
/// some backends), so everything that draws goes through this transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceTransform {
    offset: Point,
}

impl SurfaceTransform {
    pub fn new(offset: Point) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn to_surface(&self, point: Point) -> Point {
        point.offset(self.offset.x(), self.offset.y())
    }

    pub fn rect_to_surface(&self, rect: Rect) -> Rect {
        rect.translated(self.offset.x(), self.offset.y())
    }

    pub fn from_surface(&self, point: Point) -> Point {
        point.offset(-self.offset.x(), -self.offset.y())
    }
}
