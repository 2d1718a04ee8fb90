// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector (arc) shape generation.
//!
//! A donut wedge is the region of a circle between two radii and two angles, which is exactly a
//! `kurbo::CircleSegment`.

use kurbo::{BezPath, Circle, Point, Rect, Shape};
use peniko::Color;

use crate::record::SectorId;

/// A drawable donut wedge.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorShape {
    /// Join key of the sector.
    pub id: SectorId,
    /// Position in render order.
    pub render_index: usize,
    /// Outline of the wedge.
    pub path: BezPath,
    /// Axis-aligned bounding box of the wedge, or `None` for a zero-width wedge.
    ///
    /// Drag selection tests against this box.
    pub bounds: Option<Rect>,
    /// Fill color.
    pub fill: Color,
    /// Rendering order hint.
    pub z_index: i32,
}

/// A sector (arc slice) description.
///
/// Angles are in radians, clockwise from the positive x axis in screen coordinates.
#[derive(Clone, Debug)]
pub struct SectorMarkSpec {
    /// Join key of the sector.
    pub id: SectorId,
    /// Position in render order.
    pub render_index: usize,
    /// Center in surface coordinates.
    pub center: Point,
    /// Inner radius (0 for a pie slice).
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Fill color.
    pub fill: Color,
    /// Curve flattening tolerance when converting the sector to a `BezPath`.
    pub tolerance: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl SectorMarkSpec {
    /// Creates a new sector spec.
    pub fn new(
        id: SectorId,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Self {
            id,
            render_index: 0,
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill: Color::TRANSPARENT,
            tolerance: 0.1,
            z_index: crate::z_order::SECTORS,
        }
    }

    /// Sets the render index.
    pub fn with_render_index(mut self, render_index: usize) -> Self {
        self.render_index = render_index;
        self
    }

    /// Sets the fill color.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Sets the curve flattening tolerance used for `BezPath` conversion.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Angular sweep of the wedge.
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).max(0.0)
    }

    /// Generates the shape for this spec.
    pub fn shape(&self) -> SectorShape {
        let circle = Circle::new(self.center, self.outer_radius);
        let sweep = self.sweep();
        let segment = circle.segment(self.inner_radius, self.start_angle, sweep);
        let path: BezPath = segment.path_elements(self.tolerance).collect();
        let bounds = (sweep > 0.0 && self.outer_radius > 0.0).then(|| path.bounding_box());

        SectorShape {
            id: self.id.clone(),
            render_index: self.render_index,
            path,
            bounds,
            fill: self.fill,
            z_index: self.z_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn quarter_wedge_has_quadrant_bounds() {
        let shape = SectorMarkSpec::new(
            SectorId::new("a"),
            Point::new(100.0, 100.0),
            40.0,
            80.0,
            0.0,
            FRAC_PI_2,
        )
        .with_fill(css::TOMATO)
        .shape();

        let b = shape.bounds.expect("non-empty wedge");
        let eps = 1e-3;
        assert!((b.x0 - 100.0).abs() < eps, "x0 {b:?}");
        assert!((b.y0 - 100.0).abs() < eps, "y0 {b:?}");
        assert!((b.x1 - 180.0).abs() < eps, "x1 {b:?}");
        assert!((b.y1 - 180.0).abs() < eps, "y1 {b:?}");
        assert_eq!(shape.fill, css::TOMATO);
    }

    #[test]
    fn zero_sweep_has_no_bounds() {
        let shape =
            SectorMarkSpec::new(SectorId::new("a"), Point::ZERO, 5.0, 10.0, 1.0, 1.0).shape();
        assert_eq!(shape.bounds, None);
    }
}
