// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart instance: data in, frames and marking calls out.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::TAU;

use donut_core::{
    DonutGeometry, PointerButton, PointerTarget, SectorHits, SelectionController, SelectionOutcome,
};
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::chart_spec::DonutChartSpec;
use crate::error::ChartError;
use crate::label::{LabelShape, center_label, sector_label};
use crate::layout::DonutLayout;
use crate::model::SectorModelBuilder;
use crate::record::{AxisLabels, SectorId, SectorRecord};
use crate::sector_mark::{SectorMarkSpec, SectorShape};
use crate::source::{AxisInfo, DataView, MarkMode};
use crate::transition::{Phase, SectorState, Transition};
use crate::z_order;

/// Result of a successful [`DonutChart::render`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// New data was laid out and a transition started.
    Rendered {
        /// Number of sectors in the new layout.
        sectors: usize,
    },
    /// The data was not ready or had no leaves; the previous render stays on screen.
    Retained,
}

/// One wedge in a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSector {
    /// The drawable wedge.
    pub shape: SectorShape,
    /// Record index, or `None` for a sector that is fading out.
    pub record: Option<usize>,
    /// How the sector takes part in the running transition.
    pub phase: Phase,
}

/// The drag-selection rectangle as drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionRectShape {
    /// Rectangle in surface coordinates.
    pub rect: Rect,
    /// Outline color.
    pub stroke: Color,
    /// Fill color.
    pub fill: Color,
    /// Rendering order hint.
    pub z_index: i32,
}

/// Everything needed to draw the chart at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct DonutFrame {
    /// Size of the drawing area (the surface minus the margin).
    pub size: Size,
    /// Donut geometry the frame was drawn with.
    pub geometry: DonutGeometry,
    /// Wedges, in render order.
    pub sectors: Vec<FrameSector>,
    /// Sector labels.
    pub labels: Vec<LabelShape>,
    /// Total of the center axis, drawn in the hole.
    pub center_label: Option<LabelShape>,
    /// The live drag rectangle, if a drag is in progress.
    pub selection: Option<SelectionRectShape>,
}

/// An interactive donut chart bound to a host data view.
///
/// The chart owns its geometry and selection state. A host forwards data changes, resizes and
/// pointer events, and draws the [`DonutFrame`]s it asks for.
#[derive(Debug)]
pub struct DonutChart {
    spec: DonutChartSpec,
    surface: Size,
    records: Vec<SectorRecord>,
    layout: DonutLayout,
    transition: Transition,
    drawn: HashMap<SectorId, SectorState>,
    view: Option<Rc<dyn DataView>>,
    axis_labels: AxisLabels,
    selection: SelectionController,
}

impl Default for DonutChart {
    fn default() -> Self {
        Self::new(DonutChartSpec::default())
    }
}

impl DonutChart {
    /// Creates an empty chart.
    pub fn new(spec: DonutChartSpec) -> Self {
        let selection = SelectionController::new().with_click_threshold(spec.click_threshold);
        Self {
            spec,
            surface: Size::ZERO,
            records: Vec::new(),
            layout: DonutLayout::default(),
            transition: Transition::default(),
            drawn: HashMap::new(),
            view: None,
            axis_labels: AxisLabels::default(),
            selection,
        }
    }

    /// Configuration.
    pub fn spec(&self) -> &DonutChartSpec {
        &self.spec
    }

    /// Records of the current render, in data order.
    pub fn records(&self) -> &[SectorRecord] {
        &self.records
    }

    /// The current layout.
    pub fn layout(&self) -> &DonutLayout {
        &self.layout
    }

    /// The published donut geometry. Empty until the first render.
    pub fn geometry(&self) -> DonutGeometry {
        self.layout.geometry
    }

    /// The running transition.
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// The drag-selection state machine.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Sum of the center axis over the rendered sectors.
    pub fn center_total(&self) -> f64 {
        self.records.iter().map(|r| r.center_sum).sum()
    }

    /// Renders a new data view on a surface of the given size.
    ///
    /// On error, or when the outcome is [`RenderOutcome::Retained`], the previous render is left
    /// untouched.
    pub fn render(
        &mut self,
        view: Rc<dyn DataView>,
        surface: Size,
    ) -> Result<RenderOutcome, ChartError> {
        let errors = view.errors();
        if !errors.is_empty() {
            return Err(ChartError::DataView(errors));
        }

        let Some(leaves) = view.leaves() else {
            tracing::debug!("data view not ready; keeping previous render");
            return Ok(RenderOutcome::Retained);
        };

        let size_axis = require_axis(&*view, &self.spec.axes.size)?;
        let center_axis = require_axis(&*view, &self.spec.axes.center)?;

        if leaves.is_empty() {
            tracing::debug!("data view has no leaves; keeping previous render");
            return Ok(RenderOutcome::Retained);
        }

        self.records = SectorModelBuilder::new(&size_axis.name, &center_axis.name).build(&leaves);
        self.axis_labels = AxisLabels {
            size: size_axis.display_name,
            color: view
                .axis_display_name(&self.spec.axes.color)
                .unwrap_or_else(|| self.spec.axes.color.clone()),
        };
        self.view = Some(view);
        self.surface = surface;
        self.relayout();

        Ok(RenderOutcome::Rendered {
            sectors: self.records.len(),
        })
    }

    /// Recomputes geometry for a new surface size and re-lays out the current records.
    pub fn resize(&mut self, surface: Size) {
        self.surface = surface;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = DonutLayout::arrange(&self.spec.layout, self.surface, &mut self.records);
        tracing::debug!(
            width = self.surface.width,
            height = self.surface.height,
            outer_radius = self.layout.geometry.outer_radius,
            "donut geometry updated"
        );

        let target: Vec<_> = self
            .layout
            .arcs
            .iter()
            .map(|span| (span.clone(), self.records[span.record].color))
            .collect();
        self.transition = Transition::between(&self.drawn, &target, self.spec.transition_ms);
        self.drawn = self.transition.settled();
    }

    /// Evaluates the chart at `progress` through the running transition.
    ///
    /// `progress` is clamped to `[0, 1]`; use [`Transition::progress`] to derive it from a clock.
    pub fn frame(&self, progress: f64) -> DonutFrame {
        let geometry = self.layout.geometry;
        let labels_spec = &self.spec.labels;

        let mut sectors = Vec::new();
        let mut labels = Vec::new();
        for (entry, state) in self.transition.frame(progress) {
            let (a0, a1) = state.padded();
            let shape = SectorMarkSpec::new(
                state.id.clone(),
                geometry.center,
                geometry.inner_radius,
                geometry.outer_radius,
                a0,
                a1,
            )
            .with_render_index(entry.render_index)
            .with_fill(state.fill)
            .with_tolerance(self.spec.tolerance)
            .shape();

            if let Some(record) = entry.record.and_then(|i| self.records.get(i))
                && shape.bounds.is_some()
                && let Some(label) = sector_label(labels_spec, &geometry, record, state.mid_angle())
            {
                labels.push(label);
            }

            sectors.push(FrameSector {
                shape,
                record: entry.record,
                phase: entry.phase,
            });
        }

        DonutFrame {
            size: self.drawing_size(),
            geometry,
            sectors,
            labels,
            center_label: center_label(labels_spec, &geometry, &self.records),
            selection: self.selection.drag_rect().map(|rect| SelectionRectShape {
                rect,
                stroke: self.spec.selection_stroke,
                fill: self.spec.selection_fill,
                z_index: z_order::SELECTION_RECT,
            }),
        }
    }

    fn drawing_size(&self) -> Size {
        let margin = self.spec.layout.margin.max(0.0);
        Size::new(
            (self.surface.width - margin).max(0.0),
            (self.surface.height - margin).max(0.0),
        )
    }

    /// Bounding boxes of the laid-out wedges, paired with their record index.
    ///
    /// Zero-width wedges have no box and cannot be drag-selected.
    pub fn sector_bounds(&self) -> Vec<(usize, Rect)> {
        let geometry = self.layout.geometry;
        self.layout
            .arcs
            .iter()
            .filter_map(|span| {
                let (a0, a1) = span.padded();
                SectorMarkSpec::new(
                    span.id.clone(),
                    geometry.center,
                    geometry.inner_radius,
                    geometry.outer_radius,
                    a0,
                    a1,
                )
                .with_tolerance(self.spec.tolerance)
                .shape()
                .bounds
                .map(|b| (span.record, b))
            })
            .collect()
    }

    /// Record index of the wedge under `pos`, if any.
    pub fn sector_at(&self, pos: Point) -> Option<usize> {
        let geometry = self.layout.geometry;
        if geometry.is_empty() || !geometry.ring_contains(pos) {
            return None;
        }
        let d = pos - geometry.center;
        let angle = d.y.atan2(d.x);
        self.layout.arcs.iter().find_map(|span| {
            let (a0, a1) = span.padded();
            let sweep = a1 - a0;
            (sweep > 0.0 && (angle - a0).rem_euclid(TAU) <= sweep).then_some(span.record)
        })
    }

    /// Tooltip text of the wedge under `pos`.
    pub fn tooltip_at(&self, pos: Point) -> Option<String> {
        let index = self.sector_at(pos)?;
        self.records
            .get(index)
            .map(|record| record.tooltip(&self.axis_labels))
    }

    /// Handles a pointer press. Returns `true` if a drag started.
    pub fn pointer_down(&mut self, button: PointerButton, pos: Point) -> bool {
        self.selection.pointer_down(button, pos, self.layout.geometry)
    }

    /// Handles pointer motion, returning the live drag rectangle.
    pub fn pointer_move(&mut self, pos: Point) -> Option<Rect> {
        self.selection.pointer_move(pos)
    }

    /// Handles a pointer release anywhere, applying the resulting selection.
    ///
    /// Sectors hit by a drag are always marked with [`MarkMode::Replace`]; only a direct
    /// [`DonutChart::click_sector`] can toggle. A click on empty space clears all marking. A
    /// click on a sector does nothing here, since its own click handler marks it. The returned
    /// outcome lists record indices.
    pub fn pointer_up(&mut self, pos: Point) -> SelectionOutcome {
        let target = match self.sector_at(pos) {
            Some(index) => PointerTarget::Sector(index),
            None => PointerTarget::Background,
        };
        let Some(gesture) = self.selection.pointer_up(pos, target) else {
            return SelectionOutcome::Nothing;
        };

        let candidates = self.sector_bounds();
        let outcome = match gesture.resolve(candidates.iter().map(|(_, bounds)| *bounds)) {
            SelectionOutcome::Mark(hits) => SelectionOutcome::Mark(
                hits.into_iter()
                    .filter_map(|i| candidates.get(i).map(|(record, _)| *record))
                    .collect::<SectorHits>(),
            ),
            other => other,
        };

        match &outcome {
            SelectionOutcome::Nothing => {}
            SelectionOutcome::ClearAll => {
                if let Some(view) = &self.view {
                    view.clear_marking();
                }
            }
            SelectionOutcome::Mark(records) => {
                for record in records.iter().filter_map(|&i| self.records.get(i)) {
                    record.mark(MarkMode::Replace);
                }
            }
        }
        outcome
    }

    /// Abandons a drag in progress, for example when the host loses pointer capture.
    pub fn cancel_drag(&mut self) {
        self.selection.cancel();
    }

    /// Marks one sector directly, as a click on its shape does.
    ///
    /// Returns `false` if `index` is not a current record.
    pub fn click_sector(&self, index: usize, modifier: bool) -> bool {
        let Some(record) = self.records.get(index) else {
            return false;
        };
        record.mark(if modifier {
            MarkMode::ToggleOrAdd
        } else {
            MarkMode::Replace
        });
        true
    }
}

fn require_axis(view: &dyn DataView, name: &str) -> Result<AxisInfo, ChartError> {
    view.continuous_axis(name).ok_or_else(|| ChartError::MissingAxis {
        axis: String::from(name),
    })
}
