// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangle and circle primitives.
//!
//! Every function here is pure and works in the drawing surface's pixel space. Rectangles are
//! `kurbo::Rect` values and are assumed to be normalized (`x0 <= x1`, `y0 <= y1`), which is what
//! [`Rect::from_points`] and [`Rect::from_origin_size`] with non-negative sizes produce.

use kurbo::{Circle, Point, Rect};

use crate::DonutGeometry;

/// Returns `true` if the two rectangles share some interior area.
///
/// This is the separating-axis test for axis-aligned boxes: the rectangles overlap unless one is
/// entirely to the left, right, above, or below the other. Touching edges do not count.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    !(a.x0 >= b.x1 || a.y0 >= b.y1 || a.x1 <= b.x0 || a.y1 <= b.y0)
}

/// Returns the point of `rect` closest to `p`.
pub fn clamp_point(p: Point, rect: Rect) -> Point {
    // Not `f64::clamp`: it panics when the bounds are NaN or inverted.
    Point::new(p.x.min(rect.x1).max(rect.x0), p.y.min(rect.y1).max(rect.y0))
}

/// Returns `true` if `rect` touches the disk described by `circle`.
///
/// The circle center is clamped onto the rectangle to find the rectangle point closest to it;
/// the shapes collide when that point lies within `circle.radius` (inclusive).
pub fn rect_circle_collides(rect: Rect, circle: Circle) -> bool {
    let closest = clamp_point(circle.center, rect);
    let d = circle.center - closest;
    d.hypot2() <= circle.radius * circle.radius
}

/// Returns the overlap region of two rectangles.
///
/// Returns `None` when [`rects_overlap`] is `false`, so callers never see a zero or negative area
/// "intersection".
pub fn overlap_rect(a: Rect, b: Rect) -> Option<Rect> {
    rects_overlap(a, b).then(|| a.intersect(b))
}

/// Returns `true` if every point of `rect` lies within the donut's empty center.
///
/// The farthest corner of `rect` from the donut center is compared against `inner_radius²`; if
/// that corner is inside the hole then so is the whole rectangle.
pub fn rect_inside_hole(rect: Rect, geometry: &DonutGeometry) -> bool {
    let c = geometry.center;
    let dx = (c.x - rect.x0).max(rect.x1 - c.x);
    let dy = (c.y - rect.y0).max(rect.y1 - c.y);
    geometry.inner_radius * geometry.inner_radius >= dx * dx + dy * dy
}
