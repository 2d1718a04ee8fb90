// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory sales table exposed as a donut chart data view.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use donut_charts::{AxisInfo, DataView, LeafGroup, MarkMode, MarkingStore, ReadError};
use peniko::Color;
use peniko::color::palette::css;

pub(crate) const SIZE_AXIS: &str = "Sector size by";
pub(crate) const CENTER_AXIS: &str = "Center value by";

#[derive(Debug)]
pub(crate) struct Sale {
    pub(crate) region: &'static str,
    pub(crate) revenue: f64,
    pub(crate) units: Option<f64>,
}

/// Rows plus the set of marked row indices, shared by every leaf.
#[derive(Debug)]
struct Table {
    rows: Vec<Sale>,
    marked: RefCell<BTreeSet<usize>>,
}

impl Table {
    fn mark(&self, rows: &[usize], mode: MarkMode) {
        let mut marked = self.marked.borrow_mut();
        match mode {
            MarkMode::Replace => {
                marked.clear();
                marked.extend(rows.iter().copied());
            }
            MarkMode::ToggleOrAdd => {
                for row in rows {
                    if !marked.remove(row) {
                        marked.insert(*row);
                    }
                }
            }
        }
    }
}

#[derive(Debug)]
struct RegionLeaf {
    key: &'static str,
    index: usize,
    rows: Vec<usize>,
    color: Color,
    table: Rc<Table>,
}

impl LeafGroup for RegionLeaf {
    fn key(&self) -> &str {
        self.key
    }

    fn leaf_index(&self) -> usize {
        self.index
    }

    fn formatted_value(&self) -> String {
        self.key.to_string()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn continuous(&self, row: usize, axis: &str) -> Result<Option<f64>, ReadError> {
        let sale = &self.table.rows[self.rows[row]];
        match axis {
            SIZE_AXIS => Ok(Some(sale.revenue)),
            CENTER_AXIS => Ok(sale.units),
            _ => Err(ReadError::Malformed {
                row,
                axis: axis.to_string(),
                message: "unknown axis".to_string(),
            }),
        }
    }

    fn row_color(&self, _row: usize) -> Option<Color> {
        Some(self.color)
    }

    fn marked_row_count(&self) -> usize {
        let marked = self.table.marked.borrow();
        self.rows.iter().filter(|r| marked.contains(r)).count()
    }

    fn mark(&self, mode: MarkMode) {
        self.table.mark(&self.rows, mode);
    }
}

/// One snapshot of the sales table, grouped by region.
#[derive(Debug)]
pub(crate) struct SalesView {
    table: Rc<Table>,
    leaves: Vec<Rc<RegionLeaf>>,
}

impl SalesView {
    /// Groups `rows` by region, keeping first-seen order. Nothing is marked initially.
    pub(crate) fn new(rows: Vec<Sale>) -> Self {
        let table = Rc::new(Table {
            rows,
            marked: RefCell::default(),
        });

        let palette = [
            css::STEEL_BLUE,
            css::TOMATO,
            css::GOLDENROD,
            css::MEDIUM_SEA_GREEN,
            css::ORCHID,
            css::SLATE_GRAY,
        ];
        let mut groups: Vec<(&'static str, Vec<usize>)> = Vec::new();
        for (i, sale) in table.rows.iter().enumerate() {
            match groups.iter_mut().find(|(region, _)| *region == sale.region) {
                Some((_, rows)) => rows.push(i),
                None => groups.push((sale.region, vec![i])),
            }
        }
        let leaves = groups
            .into_iter()
            .enumerate()
            .map(|(index, (key, rows))| {
                Rc::new(RegionLeaf {
                    key,
                    index,
                    rows,
                    color: palette[color_slot(key) % palette.len()],
                    table: table.clone(),
                })
            })
            .collect();

        Self { table, leaves }
    }

    pub(crate) fn marked_rows(&self) -> usize {
        self.table.marked.borrow().len()
    }
}

/// Stable color per region name, so a region keeps its color across snapshots.
fn color_slot(key: &str) -> usize {
    key.bytes().map(usize::from).sum()
}

impl MarkingStore for SalesView {
    fn clear_marking(&self) {
        self.table.marked.borrow_mut().clear();
    }
}

impl DataView for SalesView {
    fn errors(&self) -> Vec<String> {
        Vec::new()
    }

    fn leaves(&self) -> Option<Vec<Rc<dyn LeafGroup>>> {
        Some(
            self.leaves
                .iter()
                .map(|leaf| leaf.clone() as Rc<dyn LeafGroup>)
                .collect(),
        )
    }

    fn continuous_axis(&self, name: &str) -> Option<AxisInfo> {
        let display_name = match name {
            SIZE_AXIS => "Sum(Revenue)",
            CENTER_AXIS => "Sum(Units)",
            _ => return None,
        };
        Some(AxisInfo {
            name: name.to_string(),
            display_name: display_name.to_string(),
        })
    }

    fn axis_display_name(&self, _name: &str) -> Option<String> {
        Some("Region".to_string())
    }
}

pub(crate) fn first_quarter() -> Vec<Sale> {
    vec![
        sale("North", 120.0, Some(12.0)),
        sale("South", 80.0, Some(9.0)),
        sale("North", 40.0, Some(3.0)),
        sale("East", 150.0, Some(14.0)),
        sale("West", 60.0, None),
        sale("South", 30.0, Some(2.0)),
    ]
}

/// West drops out, Central appears and a returns batch pushes South negative.
pub(crate) fn second_quarter() -> Vec<Sale> {
    vec![
        sale("North", 90.0, Some(10.0)),
        sale("East", 170.0, Some(15.0)),
        sale("South", -40.0, Some(-4.0)),
        sale("Central", 110.0, Some(11.0)),
    ]
}

fn sale(region: &'static str, revenue: f64, units: Option<f64>) -> Sale {
    Sale {
        region,
        revenue,
        units,
    }
}
