// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a [`DonutFrame`].

use std::fmt::Write as _;

use donut_charts::{DonutFrame, FrameSector, LabelShape, SelectionRectShape, TextAnchor};
use kurbo::{Rect, Shape};
use peniko::Color;

enum Item<'a> {
    Sector(&'a FrameSector),
    Label(&'a LabelShape),
    Selection(&'a SelectionRectShape),
}

impl Item<'_> {
    fn order(&self) -> (i32, usize) {
        match self {
            Self::Sector(s) => (s.shape.z_index, s.shape.render_index),
            Self::Label(l) => (l.z_index, 0),
            Self::Selection(s) => (s.z_index, 0),
        }
    }
}

pub(crate) fn frame_to_svg(frame: &DonutFrame) -> String {
    let view = Rect::from_origin_size((0.0, 0.0), frame.size);
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = view.width(),
        h = view.height(),
    );

    let mut items: Vec<Item<'_>> = frame.sectors.iter().map(Item::Sector).collect();
    items.extend(frame.labels.iter().map(Item::Label));
    items.extend(frame.center_label.iter().map(Item::Label));
    items.extend(frame.selection.iter().map(Item::Selection));
    // Stable sort keeps labels in emission order within a z level.
    items.sort_by_key(Item::order);

    for item in items {
        match item {
            Item::Sector(s) => {
                if s.shape.bounds.is_none() {
                    continue;
                }
                let _ = write!(out, r#"<path d="{}""#, s.shape.path.to_svg());
                write_paint_attr(&mut out, "fill", s.shape.fill);
                out.push_str("/>\n");
            }
            Item::Label(l) => {
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="middle""#,
                    l.pos.x, l.pos.y, l.font_size
                );
                out.push_str(match l.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", l.fill);
                out.push('>');
                out.push_str(&escape_xml(&l.text));
                out.push_str("</text>\n");
            }
            Item::Selection(s) => {
                let _ = write!(out, r#"<path d="{}""#, s.rect.to_path(0.1).to_svg());
                write_paint_attr(&mut out, "fill", s.fill);
                write_paint_attr(&mut out, "stroke", s.stroke);
                out.push_str(r#" stroke-width="1" stroke-dasharray="4 2"/>"#);
                out.push('\n');
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    if rgba.a == 0 {
        return ("none".to_string(), None);
    }
    let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (fill, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
