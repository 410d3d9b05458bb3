//! Deterministic legend placement beside the plot.
//!
//! Each label starts at the pixel height of its series' last visible value.
//! Walking labels top to bottom, a label that would sit closer than `min_gap`
//! to the previous label of the first column moves to a second column, where
//! the overflow labels are spread evenly over the plot height.

use crate::text::{estimate_text_width_px, truncate_to_width};
use serde::Serialize;
use std::cmp::Ordering;

/// Where a series would like its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendTarget {
    pub country_code: String,
    pub label: String,
    /// Pixel y of the last visible value.
    pub y: f64,
}

/// Final label position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendNode {
    pub country_code: String,
    pub label: String,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub target_y: f64,
}

/// Geometry of the legend columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendGeometry {
    /// x of the first column (normally the right edge of the plot).
    pub x: f64,
    pub column_width: f64,
    pub min_gap: f64,
    pub plot_height: f64,
    pub font_px: u32,
}

/// Horizontal space taken by marker, gap, and padding in front of label text.
pub const MARKER_SPACE_PX: u32 = 24;

/// Column width that fits the longest label, capped at `max_px`.
pub fn column_width_for(labels: &[&str], font_px: u32, max_px: u32) -> f64 {
    let widest = labels
        .iter()
        .map(|l| estimate_text_width_px(l, font_px))
        .max()
        .unwrap_or(0);
    (widest + MARKER_SPACE_PX).min(max_px) as f64
}

/// Place one node per target. The output keeps the input order.
pub fn layout_legend(targets: &[LegendTarget], geo: &LegendGeometry) -> Vec<LegendNode> {
    let mut order: Vec<usize> = (0..targets.len()).collect();
    order.sort_by(|a, b| {
        targets[*a]
            .y
            .partial_cmp(&targets[*b].y)
            .unwrap_or(Ordering::Equal)
    });

    let mut column = vec![0usize; targets.len()];
    let mut placed_y = vec![0f64; targets.len()];
    let mut overflow = Vec::new();
    let mut last: Option<f64> = None;
    for idx in order {
        let y = targets[idx].y;
        if last.is_none_or(|prev| y - prev >= geo.min_gap) {
            placed_y[idx] = y;
            last = Some(y);
        } else {
            overflow.push(idx);
        }
    }

    if !overflow.is_empty() {
        let pitch = (geo.plot_height / overflow.len() as f64).max(geo.min_gap);
        for (k, idx) in overflow.iter().enumerate() {
            column[*idx] = 1;
            placed_y[*idx] = pitch * (k as f64 + 0.5);
        }
        log::debug!("legend: {} labels stacked in second column", overflow.len());
    }

    let text_px = (geo.column_width as u32).saturating_sub(MARKER_SPACE_PX);
    targets
        .iter()
        .enumerate()
        .map(|(i, t)| LegendNode {
            country_code: t.country_code.clone(),
            label: truncate_to_width(&t.label, geo.font_px, text_px),
            column: column[i],
            x: geo.x + column[i] as f64 * geo.column_width,
            y: placed_y[i],
            target_y: t.y,
        })
        .collect()
}
