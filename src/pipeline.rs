//! View state → drawable frame.
//!
//! [`refresh`] takes the state by value and returns the (possibly re-derived)
//! state with the frame built from it. Nothing is patched in place: series,
//! extents and legend positions are computed from scratch on every call. Only
//! the color table carries over, so a country keeps its color while selected.

use crate::color::ColorAssigner;
use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::error::{Result, WeoError};
use crate::extract::{extract_series, select_series};
use crate::layout::{ValueScale, WindowedLayout};
use crate::legend::{LegendGeometry, LegendNode, LegendTarget, column_width_for, layout_legend};
use crate::models::{Series, Subject};
use crate::ranking::{RankDirection, rank_by_window, top_n_codes, window_extent};
use crate::region::resolve_region;
use crate::transition::TransitionState;
use crate::view::{RefreshKind, ViewEvent, ViewState};

/// Legend label font size in pixels.
pub const LEGEND_FONT_PX: u32 = 12;
/// Gap between the plot's right edge and the first legend column.
pub const LEGEND_INSET_PX: f64 = 10.0;

/// Everything a renderer needs for one refresh.
#[derive(Debug, Clone)]
pub struct Frame {
    pub subject: Subject,
    /// Colored series in selection order.
    pub series: Vec<Series>,
    pub layout: WindowedLayout,
    pub y_scale: ValueScale,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: Vec<LegendNode>,
    /// The window moved; the renderer may animate from the previous layout.
    pub transition: bool,
}

impl Frame {
    pub fn series_by_code(&self, code: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.country_code == code)
    }
}

fn selected_subject<'a>(dataset: &'a Dataset, state: &ViewState) -> Result<&'a Subject> {
    let code = state
        .selected_subject_code
        .as_deref()
        .ok_or_else(|| WeoError::PreconditionViolation("no subject selected".into()))?;
    dataset
        .subject(code)
        .ok_or_else(|| WeoError::PreconditionViolation(format!("unknown subject '{code}'")))
}

/// Re-derive the country selection for `kind`, where that kind calls for it.
fn rederive_selection(
    state: &mut ViewState,
    all: &[Series],
    kind: RefreshKind,
    cfg: &ChartConfig,
) -> Result<()> {
    let direction = match kind {
        RefreshKind::Top => RankDirection::Top,
        RefreshKind::Bottom => RankDirection::Bottom,
        RefreshKind::Region => {
            let region = state
                .selected_region
                .clone()
                .ok_or_else(|| WeoError::PreconditionViolation("no region selected".into()))?;
            let codes = resolve_region(&region);
            log::debug!("region '{}': {} countries", region, codes.len());
            state.select_countries(codes.into_iter().map(String::from));
            return Ok(());
        }
        _ => return Ok(()),
    };
    let ranked = rank_by_window(all.to_vec(), state.from_year, state.to_year, direction);
    let codes = top_n_codes(&ranked, cfg.highest_or_lowest_countries);
    log::debug!("{:?} {}: {:?}", direction, codes.len(), codes);
    state.select_countries(codes);
    Ok(())
}

/// Run the pipeline for one refresh.
pub fn refresh(
    dataset: &Dataset,
    mut state: ViewState,
    kind: RefreshKind,
    cfg: &ChartConfig,
    colors: &mut ColorAssigner,
) -> Result<(ViewState, Frame)> {
    let subject = selected_subject(dataset, &state)?.clone();
    let all = extract_series(&dataset.entries, &subject.subject_code);
    rederive_selection(&mut state, &all, kind, cfg)?;

    let (from, to) = (state.from_year, state.to_year);
    let mut series = select_series(&all, &state.selected_country_codes);
    for s in series.iter_mut() {
        window_extent(s, from, to);
        s.legend_y = s.points_in(from, to).last().map(|p| p.y);
    }
    colors.assign(&state.selected_country_codes, &mut series);

    let layout = WindowedLayout::new(
        cfg.start_year,
        cfg.end_year,
        cfg.plot_width() as f64,
        from,
        to,
    )?;
    let y_scale = ValueScale::padded(
        series.iter().flat_map(|s| s.points_in(from, to).map(|p| p.y)),
        cfg.plot_height() as f64,
    );
    let legend = legend_for(&series, &y_scale, cfg);

    log::debug!(
        "refresh {:?}: subject {}, {} series, window {}..={}",
        kind,
        subject.subject_code,
        series.len(),
        from,
        to
    );
    let frame = Frame {
        title: format!("{} ({})", subject.subject_name, subject.subject_code),
        x_label: "Year".into(),
        y_label: format!("{} {}", subject.unit, subject.scale).trim().to_string(),
        subject,
        series,
        layout,
        y_scale,
        legend,
        transition: kind == RefreshKind::Year,
    };
    Ok((state, frame))
}

fn legend_for(series: &[Series], y_scale: &ValueScale, cfg: &ChartConfig) -> Vec<LegendNode> {
    let targets: Vec<LegendTarget> = series
        .iter()
        .filter_map(|s| {
            s.legend_y.map(|v| LegendTarget {
                country_code: s.country_code.clone(),
                label: s.country_name.clone(),
                y: y_scale.y(v),
            })
        })
        .collect();
    let labels: Vec<&str> = targets.iter().map(|t| t.label.as_str()).collect();
    let room = (cfg.margin.right as f64 - LEGEND_INSET_PX).max(0.0) as u32;
    let mut geometry = LegendGeometry {
        x: cfg.plot_width() as f64 + LEGEND_INSET_PX,
        column_width: column_width_for(&labels, LEGEND_FONT_PX, room),
        min_gap: cfg.legend_min_gap,
        plot_height: cfg.plot_height() as f64,
        font_px: LEGEND_FONT_PX,
    };
    let nodes = layout_legend(&targets, &geometry);
    if nodes.iter().all(|n| n.column == 0) {
        return nodes;
    }
    // Two columns share the margin.
    geometry.column_width = column_width_for(&labels, LEGEND_FONT_PX, room / 2);
    layout_legend(&targets, &geometry)
}

/// A dataset with its evolving view: selections, colors and the pending
/// follow-up of a window animation.
#[derive(Debug)]
pub struct Session<'a> {
    dataset: &'a Dataset,
    cfg: ChartConfig,
    state: ViewState,
    colors: ColorAssigner,
    transition: TransitionState,
}

impl<'a> Session<'a> {
    pub fn new(dataset: &'a Dataset, cfg: ChartConfig) -> Self {
        let state = ViewState::initial(&cfg);
        Self {
            dataset,
            cfg,
            state,
            colors: ColorAssigner::new(),
            transition: TransitionState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn transition(&self) -> TransitionState {
        self.transition
    }

    pub fn colors(&self) -> &ColorAssigner {
        &self.colors
    }

    /// Apply a UI event and refresh. On failure the previous state is kept.
    pub fn handle(&mut self, event: ViewEvent) -> Result<Frame> {
        let mut next = self.state.clone();
        let kind = next.apply(event);
        self.run(next, kind)
    }

    pub fn refresh(&mut self, kind: RefreshKind) -> Result<Frame> {
        self.run(self.state.clone(), kind)
    }

    fn run(&mut self, state: ViewState, kind: RefreshKind) -> Result<Frame> {
        let (state, frame) = refresh(self.dataset, state, kind, &self.cfg, &mut self.colors)?;
        self.state = state;
        if frame.transition {
            self.transition.begin(RefreshKind::All);
        } else {
            self.transition.cancel();
        }
        Ok(frame)
    }

    /// The renderer finished animating. Runs the pending follow-up refresh, if any.
    pub fn complete_transition(&mut self) -> Result<Option<Frame>> {
        match self.transition.complete() {
            Some(kind) => self.refresh(kind).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WeoRow, YearCell};

    fn row(code: &str, name: &str, subject: &str, cells: &[(i32, &str)]) -> WeoRow {
        WeoRow {
            country_code: code.into(),
            country: name.into(),
            subject_code: subject.into(),
            subject: "Current account balance".into(),
            units: "U.S. dollars".into(),
            scale: "Billions".into(),
            years: (1980..=2015)
                .map(|y| YearCell {
                    year: y,
                    raw: cells
                        .iter()
                        .find(|(cy, _)| *cy == y)
                        .map(|(_, v)| v.to_string())
                        .unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_rows(
            vec![
                row("USA", "United States", "BCA", &[(1980, "50"), (2000, "-400")]),
                row("VEN", "Venezuela", "BCA", &[(1980, "-100"), (1990, "-200")]),
                row("DEU", "Germany", "BCA", &[(1980, "10"), (2010, "200")]),
                row("CAN", "Canada", "BCA", &[(1985, "5")]),
            ],
            &[],
            &ChartConfig::default(),
        )
        .unwrap()
    }

    fn run(ds: &Dataset, state: ViewState, kind: RefreshKind) -> (ViewState, Frame) {
        let cfg = ChartConfig::default();
        refresh(ds, state, kind, &cfg, &mut ColorAssigner::new()).unwrap()
    }

    #[test]
    fn all_refresh_builds_frame_in_selection_order() {
        let ds = dataset();
        let mut state = ViewState::initial(&ChartConfig::default());
        state.set_to_year(1990);
        let (_, frame) = run(&ds, state, RefreshKind::All);
        let codes: Vec<&str> = frame.series.iter().map(|s| s.country_code.as_str()).collect();
        assert_eq!(codes, vec!["VEN", "USA"]);
        assert_eq!(frame.title, "Current account balance (BCA)");
        assert_eq!(frame.y_label, "U.S. dollars Billions");
        assert_eq!(frame.x_label, "Year");
        assert_eq!(frame.series[0].legend_y, Some(-200.0));
        assert_eq!(frame.series[1].legend_y, Some(50.0));
        assert_eq!((frame.y_scale.min, frame.y_scale.max), (-200.0, 50.0));
        assert!(frame.series.iter().all(|s| s.color.is_some()));
        assert_eq!(frame.legend.len(), 2);
        assert!(!frame.transition);
    }

    #[test]
    fn series_without_visible_points_get_no_legend() {
        let ds = dataset();
        let mut state = ViewState::initial(&ChartConfig::default());
        state.select_countries(["CAN", "DEU"].map(String::from));
        state.set_from_year(1995);
        let (_, frame) = run(&ds, state, RefreshKind::Country);
        assert_eq!(frame.series.len(), 2);
        assert_eq!(frame.series_by_code("CAN").unwrap().legend_y, None);
        assert_eq!(frame.legend.len(), 1);
        assert_eq!(frame.legend[0].country_code, "DEU");
    }

    #[test]
    fn top_and_bottom_rederive_selection() {
        let ds = dataset();
        let state = ViewState::initial(&ChartConfig::default());
        let (state, _) = run(&ds, state, RefreshKind::Top);
        assert_eq!(state.selected_country_codes, vec!["DEU", "USA", "CAN", "VEN"]);
        let (state, frame) = run(&ds, state, RefreshKind::Bottom);
        assert_eq!(state.selected_country_codes, vec!["USA", "VEN", "CAN", "DEU"]);
        assert_eq!(frame.series[0].min_y, Some(-400.0));
    }

    #[test]
    fn region_resolves_codes() {
        let ds = dataset();
        let mut state = ViewState::initial(&ChartConfig::default());
        state.select_region("Northern America".into());
        let (state, frame) = run(&ds, state, RefreshKind::Region);
        assert_eq!(state.selected_country_codes, vec!["CAN", "USA"]);
        assert_eq!(frame.series.len(), 2);

        let mut state = ViewState::initial(&ChartConfig::default());
        state.selected_region = None;
        let cfg = ChartConfig::default();
        let err = refresh(&ds, state, RefreshKind::Region, &cfg, &mut ColorAssigner::new());
        assert!(matches!(err, Err(WeoError::PreconditionViolation(_))));
    }

    #[test]
    fn missing_or_unknown_subject_aborts() {
        let ds = dataset();
        let cfg = ChartConfig::default();
        let mut state = ViewState::initial(&cfg);
        state.selected_subject_code = None;
        let err = refresh(&ds, state.clone(), RefreshKind::All, &cfg, &mut ColorAssigner::new());
        assert!(matches!(err, Err(WeoError::PreconditionViolation(_))));
        state.select_subject("NOPE".into());
        let err = refresh(&ds, state, RefreshKind::All, &cfg, &mut ColorAssigner::new());
        assert!(matches!(err, Err(WeoError::PreconditionViolation(m)) if m.contains("NOPE")));
    }

    #[test]
    fn year_change_schedules_full_refresh() {
        let ds = dataset();
        let mut session = Session::new(&ds, ChartConfig::default());
        let frame = session.handle(ViewEvent::FromYear(1990)).unwrap();
        assert!(frame.transition);
        assert_eq!(frame.layout.from_year, 1990);
        assert_eq!(session.transition().pending(), Some(RefreshKind::All));

        let follow = session.complete_transition().unwrap().unwrap();
        assert!(!follow.transition);
        assert!(session.transition().is_idle());
        assert!(session.complete_transition().unwrap().is_none());
    }

    #[test]
    fn colors_stay_with_countries_across_refreshes() {
        let ds = dataset();
        let mut session = Session::new(&ds, ChartConfig::default());
        let first = session.refresh(RefreshKind::All).unwrap();
        let ven = first.series_by_code("VEN").unwrap().color;
        let next = session
            .handle(ViewEvent::Countries(vec!["DEU".into(), "VEN".into()]))
            .unwrap();
        assert_eq!(next.series_by_code("VEN").unwrap().color, ven);
        assert_eq!(session.colors().slot_of("USA"), None);
        assert_eq!(session.colors().slot_of("DEU"), Some(1));
    }

    #[test]
    fn color_survives_subject_without_data() {
        let ds = Dataset::from_rows(
            vec![
                row("VEN", "Venezuela", "BCA", &[(1980, "-100")]),
                row("USA", "United States", "BCA", &[(1980, "50")]),
                row("DEU", "Germany", "BCA", &[(1980, "10")]),
                row("USA", "United States", "NGDP_RPCH", &[(1980, "4.1")]),
                row("DEU", "Germany", "NGDP_RPCH", &[(1980, "1.2")]),
            ],
            &[],
            &ChartConfig::default(),
        )
        .unwrap();
        let mut session = Session::new(&ds, ChartConfig::default());
        let first = session.refresh(RefreshKind::All).unwrap();
        let ven = first.series_by_code("VEN").unwrap().color;

        let growth = session.handle(ViewEvent::Subject("NGDP_RPCH".into())).unwrap();
        assert!(growth.series_by_code("VEN").is_none());
        session
            .handle(ViewEvent::Countries(vec!["VEN".into(), "USA".into(), "DEU".into()]))
            .unwrap();
        let back = session.handle(ViewEvent::Subject("BCA".into())).unwrap();

        assert_eq!(back.series_by_code("VEN").unwrap().color, ven);
        assert_ne!(back.series_by_code("DEU").unwrap().color, ven);
    }

    #[test]
    fn failed_refresh_keeps_previous_state() {
        let ds = dataset();
        let mut session = Session::new(&ds, ChartConfig::default());
        let before = session.state().clone();
        assert!(session.handle(ViewEvent::Subject("NOPE".into())).is_err());
        assert_eq!(session.state(), &before);
    }
}
