// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector and center labels.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use donut_core::DonutGeometry;
use kurbo::Point;
use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::format::format_number;
use crate::record::{SectorId, SectorRecord};
use crate::z_order;

/// Which sectors get a label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelVisibility {
    /// Every sector.
    #[default]
    All,
    /// Only sectors with at least one marked row.
    Marked,
    /// No sector labels.
    None,
}

/// Where sector labels are placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelPosition {
    /// On the ring, halfway between the radii.
    #[default]
    Inside,
    /// Just outside the outer radius.
    Outside,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Label configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelOptions {
    /// Which sectors are labeled.
    pub visible: LabelVisibility,
    /// Include the sector percentage.
    pub show_percentage: bool,
    /// Include the sector value.
    pub show_value: bool,
    /// Include the category text.
    pub show_category: bool,
    /// Label placement.
    pub position: LabelPosition,
    /// Font size in surface pixels.
    pub font_size: f64,
    /// Text color.
    pub fill: Color,
    /// Show the center-axis total in the donut's hole.
    pub show_center: bool,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            visible: LabelVisibility::All,
            show_percentage: true,
            show_value: false,
            show_category: false,
            position: LabelPosition::Inside,
            font_size: 12.0,
            fill: Color::BLACK,
            show_center: true,
        }
    }
}

impl LabelOptions {
    /// Sets label visibility.
    pub fn with_visible(mut self, visible: LabelVisibility) -> Self {
        self.visible = visible;
        self
    }

    /// Chooses which parts make up the label text.
    pub fn with_parts(mut self, percentage: bool, value: bool, category: bool) -> Self {
        self.show_percentage = percentage;
        self.show_value = value;
        self.show_category = category;
        self
    }

    /// Sets label placement.
    pub fn with_position(mut self, position: LabelPosition) -> Self {
        self.position = position;
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the text color.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Enables or disables the center label.
    pub fn with_center(mut self, show_center: bool) -> Self {
        self.show_center = show_center;
        self
    }

    /// Label text for a record, or `None` if it should not be labeled.
    pub fn text(&self, record: &SectorRecord) -> Option<String> {
        match self.visible {
            LabelVisibility::None => return None,
            LabelVisibility::Marked if record.marked_row_count() == 0 => return None,
            LabelVisibility::All | LabelVisibility::Marked => {}
        }

        let mut parts: Vec<String> = Vec::new();
        if self.show_category {
            parts.push(record.category_label.clone());
        }
        if self.show_value {
            parts.push(format_number(record.value, 2));
        }
        if self.show_percentage {
            let mut p = format_number(record.percentage, 1);
            p.push('%');
            parts.push(p);
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }

    /// Positions a sector label at `angle` on the donut.
    pub fn place(&self, geometry: &DonutGeometry, angle: f64) -> (Point, TextAnchor) {
        let (cos, sin) = (angle.cos(), angle.sin());
        match self.position {
            LabelPosition::Inside => {
                let r = 0.5 * (geometry.inner_radius + geometry.outer_radius);
                (point_at(geometry.center, r, cos, sin), TextAnchor::Middle)
            }
            LabelPosition::Outside => {
                let r = geometry.outer_radius + 0.5 * self.font_size + 4.0;
                let anchor = if cos.abs() < 1e-6 {
                    TextAnchor::Middle
                } else if cos > 0.0 {
                    TextAnchor::Start
                } else {
                    TextAnchor::End
                };
                (point_at(geometry.center, r, cos, sin), anchor)
            }
        }
    }
}

fn point_at(center: Point, r: f64, cos: f64, sin: f64) -> Point {
    Point::new(center.x + r * cos, center.y + r * sin)
}

/// A positioned piece of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelShape {
    /// Sector the label belongs to; `None` for the center label.
    pub id: Option<SectorId>,
    /// Anchor position in surface coordinates (vertically centered).
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Font size.
    pub font_size: f64,
    /// Text color.
    pub fill: Color,
    /// Rendering order hint.
    pub z_index: i32,
}

/// Builds the label for one sector drawn at `mid_angle`.
pub fn sector_label(
    options: &LabelOptions,
    geometry: &DonutGeometry,
    record: &SectorRecord,
    mid_angle: f64,
) -> Option<LabelShape> {
    let text = options.text(record)?;
    let (pos, anchor) = options.place(geometry, mid_angle);
    Some(LabelShape {
        id: Some(record.id.clone()),
        pos,
        text,
        anchor,
        font_size: options.font_size,
        fill: options.fill,
        z_index: z_order::SECTOR_LABELS,
    })
}

/// Builds the center label: the total of the center axis over `records`.
pub fn center_label(
    options: &LabelOptions,
    geometry: &DonutGeometry,
    records: &[SectorRecord],
) -> Option<LabelShape> {
    if !options.show_center || records.is_empty() || geometry.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|r| r.center_sum).sum();
    Some(LabelShape {
        id: None,
        pos: geometry.center,
        text: format_number(total, 2),
        anchor: TextAnchor::Middle,
        font_size: 1.5 * options.font_size,
        fill: options.fill,
        z_index: z_order::CENTER_LABEL,
    })
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use super::*;

    fn geometry() -> DonutGeometry {
        DonutGeometry::new(Point::new(100.0, 100.0), 80.0, 40.0)
    }

    #[test]
    fn inside_labels_sit_mid_ring() {
        let (p, anchor) = LabelOptions::default().place(&geometry(), 0.0);
        assert!((p.x - 160.0).abs() < 1e-9 && (p.y - 100.0).abs() < 1e-9, "{p:?}");
        assert_eq!(anchor, TextAnchor::Middle);
    }

    #[test]
    fn outside_labels_anchor_away_from_the_ring() {
        let opts = LabelOptions::default().with_position(LabelPosition::Outside);
        let (right, a) = opts.place(&geometry(), 0.0);
        assert!(right.x > 180.0, "{right:?}");
        assert_eq!(a, TextAnchor::Start);
        let (_left, a) = opts.place(&geometry(), PI);
        assert_eq!(a, TextAnchor::End);
    }
}
