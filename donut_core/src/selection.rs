// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle drag-selection as an explicit state machine.
//!
//! The controller is advanced by discrete pointer events and never touches a marking store
//! itself. A finished gesture is returned as a [`Gesture`], and [`Gesture::resolve`] turns it into
//! a [`SelectionOutcome`] that the owning chart applies.
//!
//! Pointer capture is global: a pointer-up delivered from anywhere (including outside the drawing
//! surface) ends the drag, so the controller does no bounds checking of its own.

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::DonutGeometry;
use crate::hit_test::sector_is_selected;

/// Default click tolerance, in pixels per axis.
pub const DEFAULT_CLICK_THRESHOLD: f64 = 2.0;

/// Indices of the sectors hit by a drag rectangle, in render order.
pub type SectorHits = SmallVec<[usize; 8]>;

/// Pointer button identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary (usually left) button.
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Middle button or wheel press.
    Middle,
}

/// What the pointer was over when it was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// A rendered sector, identified by the chart's index for it.
    Sector(usize),
    /// Anything else: empty chart area, the hole, or outside the surface.
    Background,
}

/// Drag gesture state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Primary button held since `start`.
    Dragging {
        /// Where the button went down.
        start: Point,
        /// Most recent pointer position.
        current: Point,
        /// Donut geometry captured when the drag began.
        ///
        /// A resize during the drag does not refresh this; the rectangle is evaluated against the
        /// geometry the user started dragging over.
        geometry: DonutGeometry,
    },
}

/// A completed pointer gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// A click released over a sector. The sector's own click handler does the marking.
    SectorClick,
    /// A click released over empty space.
    EmptyClick,
    /// A real drag.
    Drag {
        /// Normalized drag rectangle.
        rect: Rect,
        /// Geometry captured at drag start.
        geometry: DonutGeometry,
    },
}

/// What the chart should do with the marking store after a gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Leave marking alone.
    Nothing,
    /// Clear every mark.
    ClearAll,
    /// Mark the listed sectors in replace mode.
    Mark(SectorHits),
}

impl Gesture {
    /// Resolves this gesture against the bounding boxes of the currently rendered sectors.
    pub fn resolve(self, sector_bounds: impl IntoIterator<Item = Rect>) -> SelectionOutcome {
        match self {
            Self::SectorClick => SelectionOutcome::Nothing,
            Self::EmptyClick => SelectionOutcome::ClearAll,
            Self::Drag { rect, geometry } => {
                let hits = select_sectors(rect, sector_bounds, &geometry);
                tracing::debug!(hits = hits.len(), "drag selection resolved");
                if hits.is_empty() {
                    SelectionOutcome::Nothing
                } else {
                    SelectionOutcome::Mark(hits)
                }
            }
        }
    }
}

/// Returns the indices of every sector bounding box that `drag` selects.
pub fn select_sectors(
    drag: Rect,
    sector_bounds: impl IntoIterator<Item = Rect>,
    geometry: &DonutGeometry,
) -> SectorHits {
    sector_bounds
        .into_iter()
        .enumerate()
        .filter(|(_, bounds)| sector_is_selected(drag, *bounds, geometry))
        .map(|(i, _)| i)
        .collect()
}

/// The axis-aligned rectangle spanning two points, with non-negative width and height.
pub fn drag_rect(start: Point, current: Point) -> Rect {
    Rect::from_points(start, current)
}

/// Drag-selection state machine: `Idle -> Dragging -> Idle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionController {
    state: DragState,
    click_threshold: f64,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    /// Creates an idle controller with the default click threshold.
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
        }
    }

    /// Sets the per-axis distance below which a press/release pair is a click.
    pub fn with_click_threshold(mut self, threshold: f64) -> Self {
        self.click_threshold = threshold.max(0.0);
        self
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The rectangle to draw for the drag in progress, if any.
    pub fn drag_rect(&self) -> Option<Rect> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { start, current, .. } => Some(drag_rect(start, current)),
        }
    }

    /// Handles a pointer press. Only the primary button starts a drag.
    ///
    /// A press while already dragging restarts the gesture from `pos`. Returns `true` if a drag
    /// started.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        pos: Point,
        geometry: DonutGeometry,
    ) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.state = DragState::Dragging {
            start: pos,
            current: pos,
            geometry,
        };
        true
    }

    /// Handles pointer motion, returning the updated drag rectangle while dragging.
    pub fn pointer_move(&mut self, pos: Point) -> Option<Rect> {
        match &mut self.state {
            DragState::Idle => None,
            DragState::Dragging { start, current, .. } => {
                *current = pos;
                Some(drag_rect(*start, pos))
            }
        }
    }

    /// Handles a pointer release and returns the completed gesture.
    ///
    /// Returns `None` if no drag was in progress.
    pub fn pointer_up(&mut self, pos: Point, target: PointerTarget) -> Option<Gesture> {
        let DragState::Dragging {
            start, geometry, ..
        } = core::mem::take(&mut self.state)
        else {
            return None;
        };

        let is_click = (pos.x - start.x).abs() < self.click_threshold
            && (pos.y - start.y).abs() < self.click_threshold;
        let gesture = if is_click {
            match target {
                PointerTarget::Sector(_) => Gesture::SectorClick,
                PointerTarget::Background => Gesture::EmptyClick,
            }
        } else {
            Gesture::Drag {
                rect: drag_rect(start, pos),
                geometry,
            }
        };
        Some(gesture)
    }

    /// Abandons any drag in progress without producing a gesture.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> DonutGeometry {
        DonutGeometry::new(Point::new(100.0, 100.0), 80.0, 40.0)
    }

    #[test]
    fn only_primary_button_starts_a_drag() {
        let mut c = SelectionController::new();
        assert!(!c.pointer_down(PointerButton::Secondary, Point::ZERO, geometry()));
        assert!(!c.pointer_down(PointerButton::Middle, Point::ZERO, geometry()));
        assert_eq!(c.state(), DragState::Idle);
        assert!(c.pointer_down(PointerButton::Primary, Point::ZERO, geometry()));
        assert!(c.is_dragging());
    }

    #[test]
    fn pointer_down_materializes_a_zero_size_rect() {
        let mut c = SelectionController::new();
        c.pointer_down(PointerButton::Primary, Point::new(5.0, 6.0), geometry());
        let rect = c.drag_rect().expect("dragging");
        assert_eq!(rect, Rect::new(5.0, 6.0, 5.0, 6.0));
    }

    #[test]
    fn move_normalizes_negative_extent() {
        let mut c = SelectionController::new();
        c.pointer_down(PointerButton::Primary, Point::new(50.0, 50.0), geometry());
        let rect = c.pointer_move(Point::new(20.0, 80.0)).expect("dragging");
        assert_eq!(rect, Rect::new(20.0, 50.0, 50.0, 80.0));
        assert!(rect.width() >= 0.0 && rect.height() >= 0.0, "normalized");
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut c = SelectionController::new();
        assert_eq!(c.pointer_move(Point::new(1.0, 1.0)), None);
        assert_eq!(c.pointer_up(Point::new(1.0, 1.0), PointerTarget::Background), None);
    }

    #[test]
    fn click_on_background_clears_and_on_sector_does_nothing() {
        let mut c = SelectionController::new();
        c.pointer_down(PointerButton::Primary, Point::new(10.0, 10.0), geometry());
        let g = c.pointer_up(Point::new(11.0, 11.5), PointerTarget::Background);
        assert_eq!(g, Some(Gesture::EmptyClick));
        assert_eq!(g.map(|g| g.resolve([Rect::ZERO; 0])), Some(SelectionOutcome::ClearAll));
        assert_eq!(c.state(), DragState::Idle);

        c.pointer_down(PointerButton::Primary, Point::new(10.0, 10.0), geometry());
        let g = c.pointer_up(Point::new(10.0, 10.0), PointerTarget::Sector(3));
        assert_eq!(g, Some(Gesture::SectorClick));
        assert_eq!(g.map(|g| g.resolve([Rect::ZERO; 0])), Some(SelectionOutcome::Nothing));
    }

    #[test]
    fn motion_on_one_axis_is_a_drag() {
        let mut c = SelectionController::new();
        c.pointer_down(PointerButton::Primary, Point::new(10.0, 10.0), geometry());
        let g = c.pointer_up(Point::new(40.0, 10.5), PointerTarget::Background);
        assert!(matches!(g, Some(Gesture::Drag { .. })), "got {g:?}");
    }

    #[test]
    fn drag_marks_matching_sectors_in_order() {
        let mut c = SelectionController::new();
        c.pointer_down(PointerButton::Primary, Point::new(140.0, 70.0), geometry());
        c.pointer_move(Point::new(170.0, 100.0));
        let g = c
            .pointer_up(Point::new(200.0, 130.0), PointerTarget::Background)
            .expect("gesture");
        let bounds = [
            Rect::new(20.0, 20.0, 100.0, 100.0),
            Rect::from_origin_size((150.0, 80.0), (40.0, 40.0)),
            Rect::new(100.0, 100.0, 180.0, 180.0),
        ];
        let SelectionOutcome::Mark(hits) = g.resolve(bounds) else {
            panic!("expected a mark outcome");
        };
        assert_eq!(&hits[..], &[1, 2]);
    }

    #[test]
    fn drag_missing_every_sector_does_nothing() {
        let mut c = SelectionController::new();
        c.pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), geometry());
        let g = c
            .pointer_up(Point::new(10.0, 10.0), PointerTarget::Background)
            .expect("gesture");
        assert_eq!(
            g.resolve([Rect::new(20.0, 20.0, 100.0, 100.0)]),
            SelectionOutcome::Nothing
        );
    }

    #[test]
    fn drag_uses_geometry_captured_at_start() {
        let mut c = SelectionController::new();
        c.pointer_down(PointerButton::Primary, Point::new(140.0, 70.0), geometry());
        // A resize happening now is not seen by the drag.
        let g = c
            .pointer_up(Point::new(200.0, 130.0), PointerTarget::Background)
            .expect("gesture");
        let Gesture::Drag { geometry: g, .. } = g else {
            panic!("expected a drag");
        };
        assert_eq!(g, geometry());
    }

    #[test]
    fn second_press_restarts_the_gesture() {
        let mut c = SelectionController::new();
        c.pointer_down(PointerButton::Primary, Point::new(0.0, 0.0), geometry());
        c.pointer_move(Point::new(50.0, 50.0));
        c.pointer_down(PointerButton::Primary, Point::new(60.0, 60.0), geometry());
        assert_eq!(c.drag_rect(), Some(Rect::new(60.0, 60.0, 60.0, 60.0)));
    }
}
