//! Chart configuration: dataset year range, selection limits, and canvas geometry.
//!
//! Defaults reproduce the October 2016 WEO chart. A JSON file may override any
//! subset of fields; missing fields keep their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Space around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
    /// Offset of the title and y-axis label from the plot edge.
    pub label: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 100,
            right: 200,
            bottom: 100,
            left: 100,
            label: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// First year column of the dataset.
    pub start_year: i32,
    /// Last year column of the dataset.
    pub end_year: i32,
    /// Upper bound on simultaneously selected countries.
    pub max_countries: usize,
    /// Narrowest allowed year window.
    pub min_years: i32,
    /// How many countries the highest/lowest buttons select.
    pub highest_or_lowest_countries: usize,
    /// Full canvas size including margins.
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    /// Minimum vertical distance between two legend labels.
    pub legend_min_gap: f64,
    /// Subject codes never offered for selection.
    pub excluded_subjects: Vec<String>,
    /// Initial selection.
    pub default_countries: Vec<String>,
    pub default_subject: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            start_year: 1980,
            end_year: 2015,
            max_countries: 20,
            min_years: 5,
            highest_or_lowest_countries: 10,
            width: 960,
            height: 600,
            margin: Margin::default(),
            legend_min_gap: 20.0,
            excluded_subjects: Vec::new(),
            default_countries: vec!["VEN".into(), "USA".into()],
            default_subject: "BCA".into(),
        }
    }
}

impl ChartConfig {
    /// Read a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg: ChartConfig = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.end_year - self.start_year < self.min_years {
            anyhow::bail!(
                "year range {}..={} is narrower than min_years={}",
                self.start_year,
                self.end_year,
                self.min_years
            );
        }
        if self.min_years < 1 {
            anyhow::bail!("min_years must be at least 1");
        }
        if self.plot_width() == 0 || self.plot_height() == 0 {
            anyhow::bail!("margins leave no room for the plot");
        }
        Ok(())
    }

    /// Width of the plot area (canvas minus left/right margins).
    pub fn plot_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin.left.saturating_add(self.margin.right))
    }

    pub fn plot_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margin.top.saturating_add(self.margin.bottom))
    }

    /// All dataset years, ascending.
    pub fn years(&self) -> Vec<i32> {
        (self.start_year..=self.end_year).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_give_660_by_400_plot() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.plot_width(), 660);
        assert_eq!(cfg.plot_height(), 400);
        assert_eq!(cfg.years().len(), 36);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("cfg.json");
        std::fs::write(&p, r#"{ "end_year": 2021, "margin": { "right": 150 } }"#).unwrap();
        let cfg = ChartConfig::from_json_file(&p).unwrap();
        assert_eq!(cfg.end_year, 2021);
        assert_eq!(cfg.start_year, 1980);
        assert_eq!(cfg.margin.right, 150);
        assert_eq!(cfg.margin.left, 100);
    }

    #[test]
    fn rejects_too_narrow_range() {
        let cfg = ChartConfig {
            start_year: 2010,
            end_year: 2012,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("cfg.json");
        std::fs::write(
            &p,
            r#"{ "margin": { "left": 4294967295, "right": 4294967295, "top": 4294967295 } }"#,
        )
        .unwrap();
        let err = ChartConfig::from_json_file(&p).unwrap_err();
        assert!(err.to_string().contains("no room"));
    }
}
