// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregating leaf groups into percentage-weighted sector records.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;

use hashbrown::HashSet;
use peniko::Color;

use crate::error::ReadError;
use crate::record::{SectorId, SectorRecord};
use crate::source::LeafGroup;

/// Sums a leaf's readings on `axis`. Missing readings count as zero.
///
/// A malformed or non-finite reading fails the whole sum, as does a running total that
/// overflows; the error then names the row where it did.
pub fn sum_value(leaf: &dyn LeafGroup, axis: &str) -> Result<f64, ReadError> {
    let mut sum = 0.0;
    for row in 0..leaf.row_count() {
        let Some(v) = leaf.continuous(row, axis)? else {
            continue;
        };
        let next = sum + v;
        if !next.is_finite() {
            return Err(ReadError::NonFinite {
                row,
                axis: axis.to_string(),
                value: if v.is_finite() { next } else { v },
            });
        }
        sum = next;
    }
    Ok(sum)
}

/// Builds sector records from leaf groups.
#[derive(Clone, Copy, Debug)]
pub struct SectorModelBuilder<'a> {
    /// Axis whose sum sizes each wedge.
    pub size_axis: &'a str,
    /// Axis whose sum feeds the center label.
    pub center_axis: &'a str,
}

impl<'a> SectorModelBuilder<'a> {
    /// Creates a builder reading the given axes.
    pub fn new(size_axis: &'a str, center_axis: &'a str) -> Self {
        Self {
            size_axis,
            center_axis,
        }
    }

    /// Aggregates `leaves` into records, preserving input order.
    ///
    /// A leaf whose aggregation fails is logged and left out, both from the output and from the
    /// percentage denominator; the other leaves are still built. Percentages are kept unrounded.
    pub fn build(&self, leaves: &[Rc<dyn LeafGroup>]) -> Vec<SectorRecord> {
        let sums: Vec<_> = leaves
            .iter()
            .filter_map(|leaf| match self.aggregate(&**leaf) {
                Ok((value, center)) => Some((leaf, value, center)),
                Err(err) => {
                    tracing::warn!(
                        leaf = leaf.key(),
                        error = %err,
                        "skipping sector with malformed data"
                    );
                    None
                }
            })
            .collect();

        let total_abs_sum: f64 = sums.iter().map(|(_, value, _)| value.abs()).sum();

        let records: Vec<_> = sums
            .into_iter()
            .map(|(leaf, value, center_sum)| {
                let percentage = if total_abs_sum > 0.0 {
                    value / total_abs_sum * 100.0
                } else {
                    0.0
                };
                let color = if leaf.row_count() == 0 {
                    Color::TRANSPARENT
                } else {
                    leaf.row_color(0).unwrap_or(Color::TRANSPARENT)
                };
                SectorRecord::new(leaf.clone(), value, percentage, center_sum, color)
            })
            .collect();
        for id in duplicate_ids(&records) {
            tracing::warn!(
                key = id.as_str(),
                "duplicate sector key; transitions will join only one of them"
            );
        }
        records
    }

    fn aggregate(&self, leaf: &dyn LeafGroup) -> Result<(f64, f64), ReadError> {
        Ok((
            sum_value(leaf, self.size_axis)?,
            sum_value(leaf, self.center_axis)?,
        ))
    }
}

/// Ids that occur more than once in `records`, each reported once, in first-repeat order.
pub(crate) fn duplicate_ids(records: &[SectorRecord]) -> Vec<&SectorId> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    records
        .iter()
        .map(|r| &r.id)
        .filter(|id| !seen.insert(*id) && reported.insert(*id))
        .collect()
}

/// Sum of `|value|` over all leaves that aggregate cleanly.
pub fn total_abs_sum(leaves: &[Rc<dyn LeafGroup>], axis: &str) -> f64 {
    leaves
        .iter()
        .filter_map(|leaf| sum_value(&**leaf, axis).ok())
        .map(f64::abs)
        .sum()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;
    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;
    use crate::source::MarkMode;

    #[derive(Debug)]
    struct Leaf {
        key: &'static str,
        size: Vec<Option<f64>>,
        center: Vec<Option<f64>>,
        broken_row: Option<usize>,
    }

    impl Leaf {
        fn new(key: &'static str, size: &[f64]) -> Rc<dyn LeafGroup> {
            Rc::new(Self {
                key,
                size: size.iter().copied().map(Some).collect(),
                center: size.iter().map(|v| Some(v * 2.0)).collect(),
                broken_row: None,
            })
        }
    }

    impl LeafGroup for Leaf {
        fn key(&self) -> &str {
            self.key
        }

        fn leaf_index(&self) -> usize {
            0
        }

        fn formatted_value(&self) -> String {
            self.key.to_string()
        }

        fn row_count(&self) -> usize {
            self.size.len()
        }

        fn continuous(&self, row: usize, axis: &str) -> Result<Option<f64>, ReadError> {
            if self.broken_row == Some(row) {
                return Err(ReadError::Malformed {
                    row,
                    axis: axis.to_string(),
                    message: "not a number".to_string(),
                });
            }
            let col = if axis == "size" { &self.size } else { &self.center };
            Ok(col.get(row).copied().flatten())
        }

        fn row_color(&self, _row: usize) -> Option<Color> {
            Some(css::TOMATO)
        }

        fn marked_row_count(&self) -> usize {
            0
        }

        fn mark(&self, _mode: MarkMode) {}
    }

    fn builder() -> SectorModelBuilder<'static> {
        SectorModelBuilder::new("size", "center")
    }

    #[test]
    fn abs_percentages_sum_to_one_hundred() {
        let leaves = vec![
            Leaf::new("a", &[1.0]),
            Leaf::new("b", &[-1.0]),
            Leaf::new("c", &[1.5, 0.5]),
        ];
        let records = builder().build(&leaves);
        let total: f64 = records.iter().map(|r| r.abs_percentage).sum();
        assert!((total - 100.0).abs() <= 0.1 + 1e-9, "sum was {total}");
        assert_eq!(records[1].percentage, -25.0);
        assert_eq!(records[1].abs_value, 1.0);
        assert_eq!(records[2].value, 2.0);
        assert_eq!(records[2].center_sum, 4.0);
    }

    #[test]
    fn uneven_splits_still_sum_to_one_hundred() {
        const KEYS: [&str; 30] = [
            "k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8", "k9", "k10", "k11", "k12",
            "k13", "k14", "k15", "k16", "k17", "k18", "k19", "k20", "k21", "k22", "k23", "k24",
            "k25", "k26", "k27", "k28", "k29",
        ];
        for n in [3, 6, 7, 30] {
            let leaves: Vec<_> = KEYS[..n].iter().map(|&k| Leaf::new(k, &[1.0])).collect();
            let records = builder().build(&leaves);
            let total: f64 = records.iter().map(|r| r.abs_percentage).sum();
            assert!((total - 100.0).abs() <= 0.1, "n={n} sum was {total}");
        }
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let leaves = vec![Leaf::new("a", &[0.0]), Leaf::new("b", &[2.0, -2.0])];
        let records = builder().build(&leaves);
        assert!(records.iter().all(|r| r.percentage == 0.0));
    }

    #[test]
    fn input_order_is_preserved() {
        let leaves = vec![
            Leaf::new("small", &[1.0]),
            Leaf::new("big", &[10.0]),
            Leaf::new("mid", &[5.0]),
        ];
        let ids: Vec<_> = builder()
            .build(&leaves)
            .into_iter()
            .map(|r| r.id.as_str().to_string())
            .collect();
        assert_eq!(ids, ["small", "big", "mid"]);
    }

    #[test]
    fn missing_readings_count_as_zero() {
        let leaf: Rc<dyn LeafGroup> = Rc::new(Leaf {
            key: "a",
            size: vec![Some(2.0), None, Some(3.0)],
            center: vec![None, None, None],
            broken_row: None,
        });
        assert_eq!(sum_value(&*leaf, "size"), Ok(5.0));
        assert_eq!(sum_value(&*leaf, "center"), Ok(0.0));
    }

    #[test]
    fn empty_leaf_is_transparent_and_zero() {
        let leaves = vec![Leaf::new("a", &[4.0]), Leaf::new("empty", &[])];
        let records = builder().build(&leaves);
        assert_eq!(records[1].value, 0.0);
        assert_eq!(records[1].color, Color::TRANSPARENT);
        assert!(records[1].is_empty());
        assert_eq!(records[0].color, css::TOMATO);
    }

    #[test]
    fn malformed_leaf_is_excluded_from_records_and_denominator() {
        let broken: Rc<dyn LeafGroup> = Rc::new(Leaf {
            key: "broken",
            size: vec![Some(100.0), Some(1.0)],
            center: vec![None, None],
            broken_row: Some(1),
        });
        let leaves = vec![Leaf::new("a", &[1.0]), broken, Leaf::new("b", &[3.0])];
        let records = builder().build(&leaves);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].percentage, 25.0);
        assert_eq!(records[1].percentage, 75.0);
        assert_eq!(total_abs_sum(&leaves, "size"), 4.0);
    }

    #[test]
    fn non_finite_reading_is_a_fault() {
        let leaf: Rc<dyn LeafGroup> = Rc::new(Leaf {
            key: "nan",
            size: vec![Some(f64::NAN)],
            center: vec![None],
            broken_row: None,
        });
        assert!(matches!(
            sum_value(&*leaf, "size"),
            Err(ReadError::NonFinite { row: 0, .. })
        ));
        assert!(builder().build(&[leaf]).is_empty());
    }

    #[test]
    fn overflowing_total_is_a_fault() {
        let leaf: Rc<dyn LeafGroup> = Rc::new(Leaf {
            key: "huge",
            size: vec![Some(f64::MAX), Some(f64::MAX)],
            center: vec![None, None],
            broken_row: None,
        });
        assert!(matches!(
            sum_value(&*leaf, "size"),
            Err(ReadError::NonFinite { row: 1, .. })
        ));
        let records = builder().build(&[leaf, Leaf::new("a", &[1.0])]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].percentage, 100.0);
    }

    #[test]
    fn duplicate_keys_are_reported_once_and_kept() {
        let leaves = vec![
            Leaf::new("a", &[1.0]),
            Leaf::new("b", &[1.0]),
            Leaf::new("a", &[1.0]),
            Leaf::new("a", &[1.0]),
        ];
        let records = builder().build(&leaves);
        assert_eq!(records.len(), 4);
        let dups: Vec<_> = duplicate_ids(&records).into_iter().map(SectorId::as_str).collect();
        assert_eq!(dups, ["a"]);
    }

    #[test]
    fn tooltip_lists_ratio_value_and_category() {
        let records = builder().build(&[Leaf::new("a", &[1.0]), Leaf::new("b", &[2.0])]);
        let labels = crate::record::AxisLabels {
            size: "Sales".to_string(),
            color: "Region".to_string(),
        };
        assert_eq!(
            records[1].tooltip(&labels),
            "Ratio: 66.7%\nSales: 2\nRegion: b\n"
        );
    }
}
