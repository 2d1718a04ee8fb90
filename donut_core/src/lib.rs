// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry and interaction core for donut charts.
//!
//! This crate carries the parts of a donut chart that do not depend on where the data comes
//! from or how it is drawn:
//! - **Geometry primitives**: rectangle overlap, rectangle/circle collision, overlap regions and
//!   the "inside the hole" test.
//! - **Annulus hit-testing**: deciding whether a drag rectangle really selects a sector, given
//!   only the sector's bounding box and the current [`DonutGeometry`].
//! - **Drag selection**: an explicit `Idle -> Dragging -> Idle` state machine that turns pointer
//!   events into click/drag gestures and marking outcomes.
//!
//! Everything here is pure state; marking stores, data sources and renderers live downstream.

#![no_std]

mod donut;
pub mod geometry;
mod hit_test;
mod selection;

pub use donut::DonutGeometry;
pub use hit_test::sector_is_selected;
pub use selection::{
    DEFAULT_CLICK_THRESHOLD, DragState, Gesture, PointerButton, PointerTarget, SectorHits,
    SelectionController, SelectionOutcome, drag_rect, select_sectors,
};
