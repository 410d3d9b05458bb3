//! Highest/lowest ordering of series within a year window.
//!
//! Ties compare `Ordering::Equal` and `slice::sort_by` is stable, so tied series
//! keep their dataset order. Series without any point in the window have no
//! key; they are kept out of the comparison and follow the ranked ones in
//! their original order.

use crate::models::Series;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which end of the ranking to select from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDirection {
    /// Descending by the window maximum.
    Top,
    /// Ascending by the window minimum.
    Bottom,
}

/// Fill `min_y`/`max_y` from the points whose year lies in `[from_year, to_year]`.
pub fn window_extent(series: &mut Series, from_year: i32, to_year: i32) {
    let (mut lo, mut hi): (Option<f64>, Option<f64>) = (None, None);
    for p in series.points_in(from_year, to_year) {
        lo = Some(lo.map_or(p.y, |v| v.min(p.y)));
        hi = Some(hi.map_or(p.y, |v| v.max(p.y)));
    }
    series.min_y = lo;
    series.max_y = hi;
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Rank `series` by its extent inside `[from_year, to_year]`.
pub fn rank_by_window(
    mut series: Vec<Series>,
    from_year: i32,
    to_year: i32,
    direction: RankDirection,
) -> Vec<Series> {
    for s in series.iter_mut() {
        window_extent(s, from_year, to_year);
    }
    let (mut ranked, unranked): (Vec<Series>, Vec<Series>) = series
        .into_iter()
        .partition(|s| s.min_y.is_some() && s.max_y.is_some());
    match direction {
        RankDirection::Top => ranked.sort_by(|a, b| {
            compare(b.max_y.unwrap_or_default(), a.max_y.unwrap_or_default())
        }),
        RankDirection::Bottom => ranked.sort_by(|a, b| {
            compare(a.min_y.unwrap_or_default(), b.min_y.unwrap_or_default())
        }),
    }
    ranked.extend(unranked);
    ranked
}

/// Country codes of the first `n` ranked series.
pub fn top_n_codes(ranked: &[Series], n: usize) -> Vec<String> {
    ranked
        .iter()
        .take(n)
        .map(|s| s.country_code.clone())
        .collect()
}
