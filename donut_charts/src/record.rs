// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-sector records produced by the model builder.

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;

use peniko::Color;

use crate::format::format_number;
use crate::source::{LeafGroup, MarkMode};

/// Stable identity of a sector: the category key of its leaf.
///
/// Consecutive renders join sectors on this key, so a wedge animates from where it was even if
/// categories were inserted, removed or reordered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectorId(String);

impl SectorId {
    /// Creates an id from a category key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The underlying key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SectorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display names used when composing a sector's tooltip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisLabels {
    /// Display name of the sector size expression.
    pub size: String,
    /// Display name of the color (category) expression.
    pub color: String,
}

/// One donut sector, built from one leaf group.
#[derive(Clone, Debug)]
pub struct SectorRecord {
    /// Stable join key.
    pub id: SectorId,
    /// Position in the laid-out order; assigned by the layout engine.
    pub render_index: usize,
    /// Signed sum of the size axis over the leaf's rows.
    pub value: f64,
    /// `value.abs()`; the wedge's angular weight.
    pub abs_value: f64,
    /// `value / total_abs_sum * 100`, unrounded; displays round it to one decimal. Zero when the
    /// total is zero.
    pub percentage: f64,
    /// `percentage.abs()`.
    pub abs_percentage: f64,
    /// Sum of the center axis over the leaf's rows; only feeds the center label.
    pub center_sum: f64,
    /// Fill color: the first row's color, or transparent for a leaf without rows.
    pub color: Color,
    /// Display text of the category.
    pub category_label: String,
    leaf: Rc<dyn LeafGroup>,
}

impl SectorRecord {
    pub(crate) fn new(
        leaf: Rc<dyn LeafGroup>,
        value: f64,
        percentage: f64,
        center_sum: f64,
        color: Color,
    ) -> Self {
        Self {
            id: SectorId::new(leaf.key()),
            render_index: leaf.leaf_index(),
            value,
            abs_value: value.abs(),
            percentage,
            abs_percentage: percentage.abs(),
            center_sum,
            color,
            category_label: leaf.formatted_value(),
            leaf,
        }
    }

    /// Marks this sector's rows in the host's marking store.
    pub fn mark(&self, mode: MarkMode) {
        self.leaf.mark(mode);
    }

    /// Number of this sector's rows that are currently marked, read from the host on demand.
    pub fn marked_row_count(&self) -> usize {
        self.leaf.marked_row_count()
    }

    /// Returns `true` if the sector has no contributing rows.
    pub fn is_empty(&self) -> bool {
        self.leaf.row_count() == 0
    }

    /// Tooltip text: ratio, size value and category.
    pub fn tooltip(&self, labels: &AxisLabels) -> String {
        format!(
            "Ratio: {}%\n{}: {}\n{}: {}\n",
            format_number(self.percentage, 1),
            labels.size,
            format_number(self.value, 2),
            labels.color,
            self.category_label,
        )
    }
}
