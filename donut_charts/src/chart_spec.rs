// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart-level configuration.

extern crate alloc;

use alloc::string::String;

use donut_core::DEFAULT_CLICK_THRESHOLD;
use peniko::Color;
use peniko::color::palette::css;

use crate::label::LabelOptions;
use crate::layout::DonutLayoutSpec;
use crate::transition::DEFAULT_DURATION_MS;

/// Names of the data view axes the chart reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisNames {
    /// Continuous axis that sizes the wedges.
    pub size: String,
    /// Continuous axis summed into the center label.
    pub center: String,
    /// Categorical axis that defines the wedges.
    pub color: String,
}

impl Default for AxisNames {
    fn default() -> Self {
        Self {
            size: String::from("Sector size by"),
            center: String::from("Center value by"),
            color: String::from("Color"),
        }
    }
}

/// Configuration of a [`DonutChart`](crate::DonutChart).
#[derive(Clone, Debug, PartialEq)]
pub struct DonutChartSpec {
    /// Layout of the ring.
    pub layout: DonutLayoutSpec,
    /// Sector and center labels.
    pub labels: LabelOptions,
    /// Axes read from the data view.
    pub axes: AxisNames,
    /// Duration of the enter/update/exit transition.
    pub transition_ms: u32,
    /// Per-axis pointer travel below which a press/release pair is a click.
    pub click_threshold: f64,
    /// Stroke of the drag-selection rectangle.
    pub selection_stroke: Color,
    /// Fill of the drag-selection rectangle.
    pub selection_fill: Color,
    /// Curve flattening tolerance for wedge outlines.
    pub tolerance: f64,
}

impl Default for DonutChartSpec {
    fn default() -> Self {
        Self {
            layout: DonutLayoutSpec::default(),
            labels: LabelOptions::default(),
            axes: AxisNames::default(),
            transition_ms: DEFAULT_DURATION_MS,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            selection_stroke: css::DIM_GRAY,
            selection_fill: css::DIM_GRAY.with_alpha(0.15),
            tolerance: 0.1,
        }
    }
}

impl DonutChartSpec {
    /// Sets the layout.
    pub fn with_layout(mut self, layout: DonutLayoutSpec) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the label options.
    pub fn with_labels(mut self, labels: LabelOptions) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the axis names.
    pub fn with_axes(mut self, axes: AxisNames) -> Self {
        self.axes = axes;
        self
    }

    /// Sets the transition duration.
    pub fn with_transition_ms(mut self, ms: u32) -> Self {
        self.transition_ms = ms;
        self
    }

    /// Sets the click threshold.
    pub fn with_click_threshold(mut self, threshold: f64) -> Self {
        self.click_threshold = threshold;
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.labels.font_size = font_size;
        self
    }

    /// Sets the selection rectangle stroke.
    pub fn with_selection_stroke(mut self, stroke: Color) -> Self {
        self.selection_stroke = stroke;
        self
    }
}
