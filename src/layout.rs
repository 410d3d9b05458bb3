//! Windowed x layout and padded y scale.
//!
//! ```text
//!  start_year                              end_year
//!     |-------------- total_width --------------|
//!     |-- a --|------- width -------|-----------|
//!          from_year             to_year
//!             0                   width
//! ```
//!
//! The whole dataset range is laid out at the pixel density of the visible
//! window and shifted left by `a`. Changing the window only changes `a` and
//! `total_width`, so a renderer can animate between two layouts as a slide
//! along one continuous timeline.

use crate::error::{Result, WeoError};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Calendar position of `date` in years, e.g. 2000-07-02 ≈ 2000.5.
pub fn fractional_year(date: NaiveDate) -> f64 {
    let days_in_year = if NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some() {
        366.0
    } else {
        365.0
    };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}

/// Time → pixel mapping over the full year range, positioned for one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowedLayout {
    pub start_year: i32,
    pub end_year: i32,
    pub from_year: i32,
    pub to_year: i32,
    /// Visible plot width in pixels.
    pub width: f64,
    total_width: f64,
    offset: f64,
}

impl WindowedLayout {
    /// Lay out `[start_year, end_year]` so that `[from_year, to_year]` fills `width`.
    ///
    /// The window is not clamped here; an empty, inverted, or out-of-range
    /// window is an error.
    pub fn new(
        start_year: i32,
        end_year: i32,
        width: f64,
        from_year: i32,
        to_year: i32,
    ) -> Result<Self> {
        if end_year <= start_year {
            return Err(WeoError::InvalidWindow {
                from: start_year,
                to: end_year,
            });
        }
        if to_year <= from_year || from_year < start_year || to_year > end_year {
            return Err(WeoError::InvalidWindow {
                from: from_year,
                to: to_year,
            });
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(WeoError::InvalidArgument(format!(
                "plot width must be positive, got {width}"
            )));
        }
        let full = (end_year - start_year) as f64;
        let total_width = width * full / (to_year - from_year) as f64;
        let offset = (from_year - start_year) as f64 / full * total_width;
        Ok(Self {
            start_year,
            end_year,
            from_year,
            to_year,
            width,
            total_width,
            offset,
        })
    }

    /// Pixel width the full year range occupies at the window's density.
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Pixel distance from `start_year` to `from_year` (the `a` above).
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Output range of the mapping: `[-a, total_width - a]`.
    pub fn range(&self) -> (f64, f64) {
        (-self.offset, self.total_width - self.offset)
    }

    /// Pixels per year.
    pub fn year_pitch(&self) -> f64 {
        self.total_width / (self.end_year - self.start_year) as f64
    }

    pub fn x_year(&self, year: f64) -> f64 {
        let t = (year - self.start_year as f64) / (self.end_year - self.start_year) as f64;
        -self.offset + t * self.total_width
    }

    pub fn x(&self, date: NaiveDate) -> f64 {
        self.x_year(fractional_year(date))
    }

    pub fn is_visible(&self, px: f64) -> bool {
        (0.0..=self.width).contains(&px)
    }

    /// Year ticks inside the window with their pixel positions.
    pub fn ticks(&self) -> Vec<(i32, f64)> {
        let span = self.to_year - self.from_year;
        let step = match span {
            0..=10 => 1,
            11..=20 => 2,
            21..=50 => 5,
            _ => 10,
        };
        let first = self.from_year + (step - self.from_year.rem_euclid(step)) % step;
        (first..=self.to_year)
            .step_by(step as usize)
            .map(|y| (y, self.x_year(y as f64)))
            .collect()
    }
}

/// Linear value → pixel mapping whose domain always contains zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
    /// Plot height in pixels; `min` maps here, `max` maps to 0.
    pub height: f64,
}

impl ValueScale {
    /// Scale for the extent of `values` padded to include zero.
    pub fn padded<I: IntoIterator<Item = f64>>(values: I, height: f64) -> Self {
        let (mut min, mut max) = (0.0f64, 0.0f64);
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        Self { min, max, height }
    }

    pub fn y(&self, value: f64) -> f64 {
        self.height - (value - self.min) / (self.max - self.min) * self.height
    }

    /// Round tick values within the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let span = self.max - self.min;
        let raw = span / count.max(1) as f64;
        let mut step = 10f64.powf(raw.log10().floor());
        let err = raw / step;
        if err >= 50f64.sqrt() {
            step *= 10.0;
        } else if err >= 10f64.sqrt() {
            step *= 5.0;
        } else if err >= 2f64.sqrt() {
            step *= 2.0;
        }
        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}
