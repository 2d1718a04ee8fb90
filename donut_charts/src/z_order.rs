// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for donut chart output.
//!
//! Every shape the chart emits carries an explicit `z_index`. Renderers should sort by
//! `(z_index, render_index)` for a deterministic tie-break.

/// Sector wedges.
pub const SECTORS: i32 = 0;
/// Sector labels drawn above the wedges.
pub const SECTOR_LABELS: i32 = 40;
/// The label in the donut's hole.
pub const CENTER_LABEL: i32 = 50;

/// The drag-selection rectangle, above everything else.
pub const SELECTION_RECT: i32 = 90;
