// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by donut charts.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Error category under which data view errors are shown by the host's error overlay.
pub const DATA_VIEW_CATEGORY: &str = "DataView";

/// A single row reading that could not be turned into a number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReadError {
    /// The source reported a malformed value.
    #[error("malformed value in row {row} on axis `{axis}`: {message}")]
    Malformed {
        /// Row index within the leaf.
        row: usize,
        /// Axis being read.
        axis: String,
        /// Source-provided description.
        message: String,
    },
    /// The reading was NaN or infinite.
    #[error("non-finite value {value} in row {row} on axis `{axis}`")]
    NonFinite {
        /// Row index within the leaf.
        row: usize,
        /// Axis being read.
        axis: String,
        /// The offending reading.
        value: f64,
    },
}

/// Conditions that stop a chart from rendering new data.
///
/// Every variant is recoverable: the next data or resize event simply renders again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// The data view reported errors of its own.
    #[error("data view reported {} error(s)", .0.len())]
    DataView(Vec<String>),
    /// A required continuous axis has no data.
    #[error("No data on {axis} axis.")]
    MissingAxis {
        /// Name of the missing axis.
        axis: String,
    },
}

impl ChartError {
    /// The error-overlay category this error is shown (and later hidden) under.
    pub fn category(&self) -> &str {
        match self {
            Self::DataView(_) => DATA_VIEW_CATEGORY,
            Self::MissingAxis { axis } => axis,
        }
    }

    /// Messages to present to the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::DataView(messages) => messages.clone(),
            Self::MissingAxis { .. } => alloc::vec![alloc::format!("{self}")],
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[test]
    fn missing_axis_is_categorized_by_axis_name() {
        let err = ChartError::MissingAxis {
            axis: "Sector size by".to_string(),
        };
        assert_eq!(err.category(), "Sector size by");
        assert_eq!(err.messages(), alloc::vec!["No data on Sector size by axis.".to_string()]);
    }

    #[test]
    fn data_view_errors_pass_through() {
        let err = ChartError::DataView(alloc::vec![
            "bad column".to_string(),
            "bad row".to_string(),
        ]);
        assert_eq!(err.category(), DATA_VIEW_CATEGORY);
        assert_eq!(err.messages().len(), 2);
    }
}
