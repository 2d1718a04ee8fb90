// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Donut layout: surface size to [`DonutGeometry`], sector records to angular spans.
//!
//! Angles are in radians, measured clockwise from the positive x axis in screen (y-down)
//! coordinates, matching `kurbo::Circle::segment`. A whole donut starts at 12 o'clock.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, PI, TAU};

use donut_core::DonutGeometry;
use kurbo::{Point, Size};

use crate::record::{SectorId, SectorRecord};

/// Whether the donut is a full ring or the upper half of one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CircleType {
    /// Full circle, starting at 12 o'clock.
    #[default]
    Whole,
    /// Upper half circle, from 9 o'clock to 3 o'clock.
    Semi,
}

impl CircleType {
    /// Start angle and total sweep.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Whole => (-FRAC_PI_2, TAU),
            Self::Semi => (-PI, PI),
        }
    }
}

/// Optional ordering of sectors by magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest `abs_value` first.
    Ascending,
    /// Largest `abs_value` first.
    Descending,
}

/// Layout inputs for a donut chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonutLayoutSpec {
    /// Margin removed from the surface size, and again from the radius.
    pub margin: f64,
    /// Inner radius as a fraction of the outer radius, in `[0, 1)`.
    pub inner_radius_ratio: f64,
    /// Gap budget in radians; each wedge gets `pad_angle_total / sector_count`.
    pub pad_angle_total: f64,
    /// Full or half ring.
    pub circle: CircleType,
    /// Optional magnitude ordering. `None` keeps the data order.
    pub sort: Option<SortOrder>,
}

impl Default for DonutLayoutSpec {
    fn default() -> Self {
        Self {
            margin: 40.0,
            inner_radius_ratio: 0.5,
            pad_angle_total: 0.1,
            circle: CircleType::Whole,
            sort: None,
        }
    }
}

impl DonutLayoutSpec {
    /// Sets the surface/radius margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the inner radius ratio.
    pub fn with_inner_radius_ratio(mut self, ratio: f64) -> Self {
        self.inner_radius_ratio = ratio;
        self
    }

    /// Sets the total pad angle.
    pub fn with_pad_angle_total(mut self, pad: f64) -> Self {
        self.pad_angle_total = pad;
        self
    }

    /// Sets the circle type.
    pub fn with_circle(mut self, circle: CircleType) -> Self {
        self.circle = circle;
        self
    }

    /// Sets the magnitude ordering.
    pub fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Computes the donut geometry for a drawing surface.
    pub fn geometry(&self, surface: Size) -> DonutGeometry {
        let margin = self.margin.max(0.0);
        let w = (surface.width - margin).max(0.0);
        let h = (surface.height - margin).max(0.0);
        let outer = (0.5 * w.min(h) - margin).max(0.0);
        let ratio = self.inner_radius_ratio.clamp(0.0, 0.99);
        DonutGeometry::new(Point::new(0.5 * w, 0.5 * h), outer, outer * ratio)
    }

    /// Per-wedge pad angle for `count` sectors.
    pub fn pad_angle(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        self.pad_angle_total.max(0.0) / count as f64
    }
}

/// The angular extent assigned to one sector.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcSpan {
    /// Join key of the sector.
    pub id: SectorId,
    /// Index of the sector in the record list.
    pub record: usize,
    /// Start angle (radians).
    pub start_angle: f64,
    /// End angle (radians), `>= start_angle`.
    pub end_angle: f64,
    /// Gap removed from the drawn wedge, split between both ends.
    pub pad_angle: f64,
}

impl ArcSpan {
    /// Drawn start/end angles after removing the pad.
    ///
    /// A span thinner than its pad collapses to zero width at its middle.
    pub fn padded(&self) -> (f64, f64) {
        pad_span(self.start_angle, self.end_angle, self.pad_angle)
    }
}

pub(crate) fn pad_span(start: f64, end: f64, pad: f64) -> (f64, f64) {
    if end - start <= pad {
        let mid = 0.5 * (start + end);
        return (mid, mid);
    }
    let half = 0.5 * pad;
    (start + half, end - half)
}

/// Output of a layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DonutLayout {
    /// Donut center and radii.
    pub geometry: DonutGeometry,
    /// Angular spans in render order.
    pub arcs: Vec<ArcSpan>,
}

impl DonutLayout {
    /// Lays out `records` on a surface of the given size.
    ///
    /// Assigns each record's `render_index`. Angles are weighted by `abs_value`, so sectors of
    /// opposite sign and equal magnitude get equal wedges.
    pub fn arrange(spec: &DonutLayoutSpec, surface: Size, records: &mut [SectorRecord]) -> Self {
        Self {
            geometry: spec.geometry(surface),
            arcs: pie(spec, records),
        }
    }
}

/// Computes angular spans for `records`, assigning `render_index` in laid-out order.
pub fn pie(spec: &DonutLayoutSpec, records: &mut [SectorRecord]) -> Vec<ArcSpan> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    match spec.sort {
        None => {}
        Some(SortOrder::Ascending) => {
            order.sort_by(|&a, &b| records[a].abs_value.total_cmp(&records[b].abs_value));
        }
        Some(SortOrder::Descending) => {
            order.sort_by(|&a, &b| records[b].abs_value.total_cmp(&records[a].abs_value));
        }
    }

    let total: f64 = records.iter().map(|r| r.abs_value).sum();
    let (start, sweep) = spec.circle.range();
    let pad_angle = spec.pad_angle(records.len());

    let mut a0 = start;
    let mut arcs = Vec::with_capacity(records.len());
    for (position, index) in order.into_iter().enumerate() {
        let record = &mut records[index];
        record.render_index = position;
        let frac = if total > 0.0 {
            record.abs_value / total
        } else {
            0.0
        };
        let a1 = a0 + frac * sweep;
        arcs.push(ArcSpan {
            id: record.id.clone(),
            record: index,
            start_angle: a0,
            end_angle: a1,
            pad_angle,
        });
        a0 = a1;
    }
    arcs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_subtracts_margin_twice() {
        let spec = DonutLayoutSpec::default();
        let g = spec.geometry(Size::new(440.0, 340.0));
        // Drawing area 400x300, radius 150 - 40.
        assert_eq!(g.center, Point::new(200.0, 150.0));
        assert_eq!(g.outer_radius, 110.0);
        assert_eq!(g.inner_radius, 55.0);
    }

    #[test]
    fn tiny_surface_gives_empty_geometry() {
        let g = DonutLayoutSpec::default().geometry(Size::new(60.0, 60.0));
        assert!(g.is_empty());
        assert_eq!(g.inner_radius, 0.0);
    }

    #[test]
    fn pad_shrinks_with_sector_count() {
        let spec = DonutLayoutSpec::default();
        assert!(spec.pad_angle(2) > spec.pad_angle(10));
        assert_eq!(spec.pad_angle(0), 0.0);
    }

    #[test]
    fn padded_span_collapses_when_thinner_than_pad() {
        let span = ArcSpan {
            id: SectorId::new("a"),
            record: 0,
            start_angle: 1.0,
            end_angle: 1.01,
            pad_angle: 0.05,
        };
        let (m0, m1) = span.padded();
        assert_eq!(m0, m1);
        assert!((m0 - 1.005).abs() < 1e-12, "collapsed to {m0}");

        let wide = ArcSpan {
            end_angle: 2.0,
            ..span
        };
        let (a0, a1) = wide.padded();
        assert!((a0 - 1.025).abs() < 1e-12 && (a1 - 1.975).abs() < 1e-12, "{a0} {a1}");
    }

    #[test]
    fn semi_circle_covers_upper_half() {
        let (start, sweep) = CircleType::Semi.range();
        assert_eq!(start, -PI);
        assert_eq!(start + sweep, 0.0);
    }
}
