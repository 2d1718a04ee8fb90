// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted donut chart session, dumped as an HTML report of SVG frames.

mod data;
mod svg;

use std::rc::Rc;

use donut_charts::{
    DonutChart, DonutChartSpec, LabelOptions, LabelPosition, PointerButton, SelectionOutcome,
};
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;

use data::SalesView;

const SURFACE: Size = Size::new(520.0, 420.0);

struct Section {
    title: String,
    notes: Vec<String>,
    frames: Vec<(f64, String)>,
}

impl Section {
    fn new(title: &str, chart: &DonutChart) -> Self {
        Self {
            title: title.to_string(),
            notes: Vec::new(),
            frames: [0.0, 0.5, 1.0]
                .into_iter()
                .map(|t| (t, svg::frame_to_svg(&chart.frame(t))))
                .collect(),
        }
    }

    fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let spec = DonutChartSpec::default().with_labels(
        LabelOptions::default()
            .with_parts(true, false, true)
            .with_position(LabelPosition::Outside),
    );
    let mut chart = DonutChart::new(spec);
    let mut sections = Vec::new();

    let q1 = Rc::new(SalesView::new(data::first_quarter()));
    let outcome = chart.render(q1.clone(), SURFACE).expect("first quarter renders");
    tracing::info!(?outcome, "rendered first quarter");
    sections.push(
        Section::new("First render", &chart)
            .note(format!("center total: {}", chart.center_total())),
    );

    // Drag across the right-hand side of the ring.
    let g = chart.geometry();
    let from = Point::new(g.center.x + 0.3 * g.outer_radius, g.center.y - g.outer_radius);
    let to = Point::new(g.center.x + g.outer_radius, g.center.y + 0.3 * g.outer_radius);
    chart.pointer_down(PointerButton::Primary, from);
    chart.pointer_move(to);
    let mut dragging = Section::new("Dragging", &chart);
    let outcome = chart.pointer_up(to);
    dragging = dragging.note(describe(&chart, &outcome));
    sections.push(dragging.note(format!("marked rows: {}", q1.marked_rows())));

    // Ctrl-click a sector on the left.
    let left = Point::new(g.center.x - 0.75 * g.outer_radius, g.center.y);
    chart.pointer_down(PointerButton::Primary, left);
    if let Some(index) = chart.sector_at(left) {
        chart.click_sector(index, true);
    }
    let outcome = chart.pointer_up(left);
    let mut clicked = Section::new("Modifier click", &chart).note(describe(&chart, &outcome));
    if let Some(tooltip) = chart.tooltip_at(left) {
        clicked = clicked.note(tooltip);
    }
    sections.push(clicked.note(format!("marked rows: {}", q1.marked_rows())));

    // New quarter: West exits, Central enters, South goes negative.
    let q2 = Rc::new(SalesView::new(data::second_quarter()));
    let outcome = chart.render(q2.clone(), SURFACE).expect("second quarter renders");
    tracing::info!(?outcome, "rendered second quarter");
    sections.push(
        Section::new("Data update", &chart)
            .note(format!("center total: {}", chart.center_total())),
    );

    chart.resize(Size::new(400.0, 340.0));
    sections.push(Section::new("Resized", &chart));

    // Click the empty corner to clear.
    let corner = Point::new(4.0, 4.0);
    chart.pointer_down(PointerButton::Primary, corner);
    let outcome = chart.pointer_up(corner);
    sections.push(
        Section::new("Empty-space click", &chart)
            .note(describe(&chart, &outcome))
            .note(format!("marked rows: {}", q2.marked_rows())),
    );

    let html = render_report("Donut chart session", &sections);
    std::fs::write("donut_charts_demo.html", html).expect("write donut_charts_demo.html");
    println!("wrote donut_charts_demo.html");
}

fn describe(chart: &DonutChart, outcome: &SelectionOutcome) -> String {
    match outcome {
        SelectionOutcome::Nothing => "selection: nothing".to_string(),
        SelectionOutcome::ClearAll => "selection: cleared".to_string(),
        SelectionOutcome::Mark(hits) => {
            let names: Vec<&str> = hits
                .iter()
                .filter_map(|&i| chart.records().get(i))
                .map(|r| r.id.as_str())
                .collect();
            format!("selection: marked {}", names.join(", "))
        }
    }
}

fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title>", svg::escape_xml(title)));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:24px}\
         .frames{display:flex;gap:12px}\
         .frames figure{margin:0;border:1px solid #ddd}\
         pre{background:#f6f6f6;padding:6px}</style>",
    );
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", svg::escape_xml(title)));
    for section in sections {
        out.push_str(&format!("<h2>{}</h2>\n", svg::escape_xml(&section.title)));
        for note in &section.notes {
            out.push_str(&format!("<pre>{}</pre>\n", svg::escape_xml(note)));
        }
        out.push_str("<div class=\"frames\">\n");
        for (t, svg) in &section.frames {
            out.push_str(&format!(
                "<figure>{svg}<figcaption>t = {t}</figcaption></figure>\n"
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</body></html>\n");
    out
}
