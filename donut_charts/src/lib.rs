// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive donut charts on top of `donut_core`.
//!
//! This crate turns a host's hierarchical data into a drawable, selectable donut:
//! - **Model**: leaf groups are aggregated into percentage-weighted [`SectorRecord`]s.
//! - **Layout**: records become angular spans on a ring sized to the drawing surface.
//! - **Marks**: spans become `kurbo` wedge paths and positioned labels, tweened between renders
//!   by an id-keyed [`Transition`].
//! - **Interaction**: [`DonutChart`] drives the `donut_core` drag-selection state machine and
//!   forwards the resulting marking to the host.
//!
//! Text shaping and painting are out of scope; label marks store unshaped strings.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod chart;
mod chart_spec;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod label;
mod layout;
mod model;
mod record;
mod sector_mark;
mod source;
mod transition;
mod z_order;

pub use chart::{DonutChart, DonutFrame, FrameSector, RenderOutcome, SelectionRectShape};
pub use chart_spec::{AxisNames, DonutChartSpec};
pub use error::{ChartError, DATA_VIEW_CATEGORY, ReadError};
pub use label::{
    LabelOptions, LabelPosition, LabelShape, LabelVisibility, TextAnchor, center_label,
    sector_label,
};
pub use layout::{ArcSpan, CircleType, DonutLayout, DonutLayoutSpec, SortOrder, pie};
pub use model::{SectorModelBuilder, sum_value, total_abs_sum};
pub use record::{AxisLabels, SectorId, SectorRecord};
pub use sector_mark::{SectorMarkSpec, SectorShape};
pub use source::{AxisInfo, DataView, LeafGroup, MarkMode, MarkingStore};
pub use transition::{DEFAULT_DURATION_MS, Phase, SectorState, Transition, TransitionEntry};
pub use z_order::*;

pub use donut_core::{
    DonutGeometry, DragState, PointerButton, PointerTarget, SectorHits, SelectionOutcome,
};
