// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapping rules.

use kurbo::{Rect, Size, Vec2};

/// Values normalized anchor and pivot components snap to.
pub const SNAP_VALUES: [f64; 3] = [0.0, 0.5, 1.0];

/// Snap `value` to the nearest of [`SNAP_VALUES`] if it lies within `tolerance`.
///
/// ```rust
/// use understory_designer::snap::snap_value;
///
/// assert_eq!(snap_value(0.52, 0.05), 0.5);
/// assert_eq!(snap_value(0.3, 0.05), 0.3);
/// ```
pub fn snap_value(value: f64, tolerance: f64) -> f64 {
    SNAP_VALUES
        .into_iter()
        .filter(|s| (value - s).abs() <= tolerance)
        .min_by(|a, b| (value - a).abs().total_cmp(&(value - b).abs()))
        .unwrap_or(value)
}

/// Correction that pulls `lo` onto 0 or `hi` onto `extent`, whichever is
/// nearer, when that distance is within `threshold`. Zero otherwise.
fn axis_correction(lo: f64, hi: f64, extent: f64, threshold: f64) -> f64 {
    [-lo, extent - hi]
        .into_iter()
        .filter(|d| d.abs() <= threshold)
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))
        .unwrap_or(0.0)
}

/// Translation that snaps `bounds` to the edges of a canvas of `canvas` size.
///
/// Each axis is handled independently: the nearer of the two body edges
/// within `threshold` (canvas units) of 0 or the canvas extent lands exactly
/// on it.
pub fn canvas_edge_snap(bounds: Rect, canvas: Size, threshold: f64) -> Vec2 {
    Vec2::new(
        axis_correction(bounds.x0, bounds.x1, canvas.width, threshold),
        axis_correction(bounds.y0, bounds.y1, canvas.height, threshold),
    )
}
