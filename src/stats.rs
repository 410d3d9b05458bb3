use crate::models::Series;
use serde::{Deserialize, Serialize};

/// Summary of one country's values inside a year window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub country_code: String,
    pub country_name: String,
    pub count: usize,
    /// Window years without a value.
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Per-series statistics over `[from_year, to_year]`, in series order.
pub fn window_summary(series: &[Series], from_year: i32, to_year: i32) -> Vec<Summary> {
    let span = (to_year - from_year + 1).max(0) as usize;
    series
        .iter()
        .map(|s| {
            let mut vals: Vec<f64> = s.points_in(from_year, to_year).map(|p| p.y).collect();
            vals.sort_by(f64::total_cmp);
            let count = vals.len();
            let mean = (count > 0).then(|| vals.iter().sum::<f64>() / count as f64);
            let median = if count == 0 {
                None
            } else if count % 2 == 1 {
                Some(vals[count / 2])
            } else {
                Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
            };
            Summary {
                country_code: s.country_code.clone(),
                country_name: s.country_name.clone(),
                count,
                missing: span.saturating_sub(count),
                min: vals.first().copied(),
                max: vals.last().copied(),
                mean,
                median,
            }
        })
        .collect()
}
