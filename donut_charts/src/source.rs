// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host data source and marking store, seen from the chart.
//!
//! A host (a BI tool, a dashboard, a test) implements these traits over its own data. The chart
//! reads them once per render pass and calls back into them for marking. Marking calls are
//! fire-and-forget: the host may apply them asynchronously and the chart never caches their
//! results.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use peniko::Color;

use crate::error::ReadError;

/// How a mark request combines with the existing marking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkMode {
    /// Replace the current marking with the given rows.
    #[default]
    Replace,
    /// Toggle the given rows, adding them to the current marking.
    ToggleOrAdd,
}

/// One terminal category of the hierarchy: the rows behind a single donut wedge.
///
/// Row access mirrors a columnar table accessor: rows are addressed by index and values are read
/// per named axis.
pub trait LeafGroup: Debug {
    /// Stable identity key of the category, unique within one data view.
    fn key(&self) -> &str;

    /// Position of this leaf in the source hierarchy.
    fn leaf_index(&self) -> usize;

    /// Display text of the grouping key.
    fn formatted_value(&self) -> String;

    /// Number of contributing rows.
    fn row_count(&self) -> usize;

    /// Reads a row's value on a continuous axis.
    ///
    /// `Ok(None)` is a missing (null) reading and counts as zero.
    fn continuous(&self, row: usize, axis: &str) -> Result<Option<f64>, ReadError>;

    /// Resolved display color of a row.
    fn row_color(&self, row: usize) -> Option<Color>;

    /// Number of rows in this leaf that are currently marked.
    fn marked_row_count(&self) -> usize;

    /// Marks every row of this leaf.
    fn mark(&self, mode: MarkMode);
}

/// Write access to the host's marking state that is not tied to one leaf.
pub trait MarkingStore {
    /// Clears all marking.
    fn clear_marking(&self);
}

/// Metadata for a continuous axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisInfo {
    /// Axis name, as used for [`LeafGroup::continuous`].
    pub name: String,
    /// Human-readable name of the expression on the axis.
    pub display_name: String,
}

/// A snapshot of the host's data, valid for one render pass.
pub trait DataView: MarkingStore + Debug {
    /// Errors the host found while preparing the data. Empty when the data is usable.
    fn errors(&self) -> Vec<String>;

    /// Leaf groups of the color hierarchy, in hierarchy order.
    ///
    /// `None` means the read was aborted (for example because the document changed mid-fetch);
    /// the previous render stays valid.
    fn leaves(&self) -> Option<Vec<Rc<dyn LeafGroup>>>;

    /// Looks up a continuous axis. `None` means the axis carries no data.
    fn continuous_axis(&self, name: &str) -> Option<AxisInfo>;

    /// Display name of a categorical axis, used in tooltips.
    fn axis_display_name(&self, name: &str) -> Option<String>;
}
