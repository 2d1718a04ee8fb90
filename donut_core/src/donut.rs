// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The published geometry of a rendered donut.

use kurbo::{Circle, Point};

/// Center and radii of the annulus currently drawn by a chart instance.
///
/// A chart creates this empty, then replaces it wholesale on every layout pass. Hit-testing and
/// selection only ever read it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DonutGeometry {
    /// Annulus center in drawing surface pixels.
    pub center: Point,
    /// Outer radius in pixels.
    pub outer_radius: f64,
    /// Inner (hole) radius in pixels; `0 <= inner_radius < outer_radius` for a non-empty donut.
    pub inner_radius: f64,
}

impl DonutGeometry {
    /// Creates a geometry from a center point and radii.
    pub fn new(center: impl Into<Point>, outer_radius: f64, inner_radius: f64) -> Self {
        Self {
            center: center.into(),
            outer_radius,
            inner_radius,
        }
    }

    /// The disk bounded by the outer radius.
    pub fn outer_circle(&self) -> Circle {
        Circle::new(self.center, self.outer_radius)
    }

    /// Returns `true` if nothing has been laid out yet (or the surface was too small to draw).
    pub fn is_empty(&self) -> bool {
        self.outer_radius <= 0.0
    }

    /// Returns `true` if `p` lies in the ring between the two radii (inclusive).
    pub fn ring_contains(&self, p: Point) -> bool {
        let d2 = (p - self.center).hypot2();
        d2 >= self.inner_radius * self.inner_radius && d2 <= self.outer_radius * self.outer_radius
    }
}
