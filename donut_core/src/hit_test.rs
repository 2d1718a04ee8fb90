// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deciding whether a dragged rectangle really selects a donut sector.
//!
//! Sectors are tested through their axis-aligned bounding boxes, which over-approximate the
//! wedge. Two false positives are filtered out: a drag rectangle that never reaches the donut's
//! outer disk, and one whose overlap with the bounding box lies entirely inside the empty hole.

use kurbo::Rect;

use crate::DonutGeometry;
use crate::geometry::{overlap_rect, rect_circle_collides, rect_inside_hole, rects_overlap};

/// Returns `true` if `drag` selects the sector whose bounding box is `sector_bounds`.
///
/// The checks short-circuit in order:
/// 1. the drag rectangle overlaps the sector's bounding box,
/// 2. the drag rectangle touches the outer disk,
/// 3. the *overlap* of the two rectangles is not wholly inside the hole.
///
/// The hole test must run on the overlap rather than on `drag` itself: a large drag can span both
/// the hole and a visible wedge.
pub fn sector_is_selected(drag: Rect, sector_bounds: Rect, geometry: &DonutGeometry) -> bool {
    if !rects_overlap(drag, sector_bounds) {
        return false;
    }
    if !rect_circle_collides(drag, geometry.outer_circle()) {
        return false;
    }
    let Some(overlap) = overlap_rect(drag, sector_bounds) else {
        return false;
    };
    !rect_inside_hole(overlap, geometry)
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    fn geometry() -> DonutGeometry {
        DonutGeometry::new(Point::new(100.0, 100.0), 80.0, 40.0)
    }

    #[test]
    fn drag_inside_hole_selects_nothing() {
        // Bounding box of the upper-left quadrant wedge reaches the center.
        let sector = Rect::new(20.0, 20.0, 100.0, 100.0);
        let drag = Rect::from_origin_size((90.0, 90.0), (10.0, 10.0));
        assert!(!sector_is_selected(drag, sector, &geometry()));
    }

    #[test]
    fn drag_across_a_wedge_selects_it() {
        let sector = Rect::from_origin_size((150.0, 80.0), (40.0, 40.0));
        let drag = Rect::from_origin_size((140.0, 70.0), (60.0, 60.0));
        assert!(sector_is_selected(drag, sector, &geometry()));
    }

    #[test]
    fn drag_outside_the_disk_selects_nothing() {
        // Overlaps the corner of the bounding box but never reaches the outer circle.
        let sector = Rect::new(100.0, 100.0, 180.0, 180.0);
        let drag = Rect::new(170.0, 170.0, 185.0, 185.0);
        assert!(!sector_is_selected(drag, sector, &geometry()));
    }

    #[test]
    fn large_drag_spanning_hole_and_wedge_selects() {
        let sector = Rect::new(100.0, 20.0, 180.0, 100.0);
        let drag = Rect::new(95.0, 50.0, 200.0, 105.0);
        assert!(sector_is_selected(drag, sector, &geometry()));
    }

    #[test]
    fn disjoint_rectangles_select_nothing() {
        let sector = Rect::new(100.0, 20.0, 180.0, 100.0);
        let drag = Rect::new(20.0, 120.0, 60.0, 160.0);
        assert!(!sector_is_selected(drag, sector, &geometry()));
    }
}
