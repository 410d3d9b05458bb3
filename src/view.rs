//! Current selections and the events that change them.

use crate::config::ChartConfig;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Which part of the view changed, and so how much of the pipeline reruns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefreshKind {
    Year,
    Subject,
    Country,
    /// Re-derive the country selection from the selected region first.
    Region,
    All,
    /// Re-derive the selection as the highest countries in the window.
    Top,
    /// Re-derive the selection as the lowest countries in the window.
    Bottom,
}

/// A user action on one of the selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Countries(Vec<String>),
    Subject(String),
    Region(String),
    FromYear(i32),
    ToYear(i32),
    Top,
    Bottom,
}

/// Bounds the selectors enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewLimits {
    pub start_year: i32,
    pub end_year: i32,
    pub min_years: i32,
    pub max_countries: usize,
}

impl From<&ChartConfig> for ViewLimits {
    fn from(cfg: &ChartConfig) -> Self {
        Self {
            start_year: cfg.start_year,
            end_year: cfg.end_year,
            min_years: cfg.min_years,
            max_countries: cfg.max_countries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Ordered, duplicate free, at most `limits.max_countries` long.
    pub selected_country_codes: Vec<String>,
    pub selected_subject_code: Option<String>,
    pub from_year: i32,
    pub to_year: i32,
    pub selected_region: Option<String>,
    pub limits: ViewLimits,
}

impl ViewState {
    /// Full year range, the configured default countries and subject.
    pub fn initial(cfg: &ChartConfig) -> Self {
        let mut state = Self {
            selected_country_codes: Vec::new(),
            selected_subject_code: None,
            from_year: cfg.start_year,
            to_year: cfg.end_year,
            selected_region: None,
            limits: ViewLimits::from(cfg),
        };
        state.select_countries(cfg.default_countries.iter().cloned());
        if !cfg.default_subject.is_empty() {
            state.select_subject(cfg.default_subject.clone());
        }
        state
    }

    /// Replace the country selection. Duplicates are dropped and the list is
    /// cut at the country limit.
    pub fn select_countries<I: IntoIterator<Item = String>>(&mut self, codes: I) {
        let mut seen = AHashSet::new();
        let mut out: Vec<String> = codes
            .into_iter()
            .filter(|c| seen.insert(c.clone()))
            .collect();
        if out.len() > self.limits.max_countries {
            log::warn!(
                "selection of {} countries cut to {}",
                out.len(),
                self.limits.max_countries
            );
            out.truncate(self.limits.max_countries);
        }
        self.selected_country_codes = out;
    }

    pub fn select_subject(&mut self, code: String) {
        self.selected_subject_code = Some(code).filter(|c| !c.is_empty());
    }

    pub fn select_region(&mut self, name: String) {
        self.selected_region = Some(name).filter(|n| !n.is_empty());
    }

    /// Move the window start. If the window would get narrower than
    /// `min_years`, the start gives way and `to_year` stays.
    pub fn set_from_year(&mut self, year: i32) {
        let l = self.limits;
        let mut from = year.clamp(l.start_year, l.end_year);
        if from + l.min_years > self.to_year {
            from = l.start_year.max(self.to_year - l.min_years);
        }
        self.from_year = from;
    }

    /// Move the window end. If the window would get narrower than
    /// `min_years`, the end gives way and `from_year` stays.
    pub fn set_to_year(&mut self, year: i32) {
        let l = self.limits;
        let mut to = year.clamp(l.start_year, l.end_year);
        if self.from_year + l.min_years > to {
            to = l.end_year.min(self.from_year + l.min_years);
        }
        self.to_year = to;
    }

    /// Apply one event and report what the pipeline has to redo.
    pub fn apply(&mut self, event: ViewEvent) -> RefreshKind {
        match event {
            ViewEvent::Countries(codes) => {
                self.select_countries(codes);
                RefreshKind::Country
            }
            ViewEvent::Subject(code) => {
                self.select_subject(code);
                RefreshKind::Subject
            }
            ViewEvent::Region(name) => {
                self.select_region(name);
                RefreshKind::Region
            }
            ViewEvent::FromYear(y) => {
                self.set_from_year(y);
                RefreshKind::Year
            }
            ViewEvent::ToYear(y) => {
                self.set_to_year(y);
                RefreshKind::Year
            }
            ViewEvent::Top => RefreshKind::Top,
            ViewEvent::Bottom => RefreshKind::Bottom,
        }
    }
}
