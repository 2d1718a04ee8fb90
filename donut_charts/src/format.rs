// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for labels and tooltips.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Rounds `value` to `decimals` fractional digits (half away from zero).
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let mut scale = 1.0_f64;
    for _ in 0..decimals {
        scale *= 10.0;
    }
    let rounded = (value * scale).round() / scale;
    // Avoid printing "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Formats `value` rounded to at most `decimals` digits, without trailing zeros.
pub(crate) fn format_number(value: f64, decimals: u32) -> String {
    let digits = usize::try_from(decimals).unwrap_or(0);
    let s = format!("{:.*}", digits, round_to(value, decimals));
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    String::from(trimmed)
}
