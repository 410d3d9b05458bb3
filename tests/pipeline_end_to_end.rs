mod common;

use tempfile::tempdir;
use weo_rs::color::ColorAssigner;
use weo_rs::ranking::{RankDirection, rank_by_window};
use weo_rs::render::{RenderOptions, render_svg, render_svg_string};
use weo_rs::{ChartConfig, Dataset, RefreshKind, Session, ViewEvent, ViewState, WeoError, refresh};

fn dataset() -> Dataset {
    let dir = tempdir().unwrap();
    let (weo, refs) = common::write_fixture(dir.path());
    Dataset::load(&weo, Some(refs.as_path()), &ChartConfig::default()).unwrap()
}

#[test]
fn loads_catalogs_from_files() {
    let ds = dataset();
    let codes: Vec<&str> = ds.countries.iter().map(|c| c.country_code.as_str()).collect();
    assert_eq!(codes, vec!["VEN", "USA", "DEU"]);
    assert_eq!(ds.country("VEN").unwrap().country_name, "Venezuela, RB");
    let subjects: Vec<&str> = ds.subjects.iter().map(|s| s.subject_code.as_str()).collect();
    assert_eq!(subjects, vec!["BCA", "NGDP_RPCH"]);
    assert_eq!(ds.years.len(), 36);
    assert_eq!(ds.entries.len(), 4);
}

#[test]
fn ven_usa_window_scenario() {
    let ds = dataset();
    let cfg = ChartConfig::default();
    let mut state = ViewState::initial(&cfg);
    state.select_countries(["VEN", "USA"].map(String::from));
    state.select_subject("BCA".into());
    state.set_to_year(1990);

    let (state, frame) = refresh(&ds, state, RefreshKind::All, &cfg, &mut ColorAssigner::new()).unwrap();
    assert_eq!((state.from_year, state.to_year), (1980, 1990));
    assert_eq!(frame.series.len(), 2);
    assert_eq!(frame.series[0].country_code, "VEN");
    assert_eq!(frame.series[0].values.len(), 2);
    assert_eq!(frame.series[1].values.len(), 1);

    let bottom = rank_by_window(frame.series.clone(), 1980, 1990, RankDirection::Bottom);
    assert_eq!(bottom[0].country_code, "VEN");
    assert_eq!(bottom[0].min_y, Some(-200.0));
    assert_eq!(bottom[1].min_y, Some(50.0));

    assert_eq!(frame.layout.total_width(), 660.0 * 35.0 / 10.0);
    assert_eq!(frame.layout.offset(), 0.0);
}

#[test]
fn thousands_separator_cells_are_parsed() {
    let ds = dataset();
    let mut session = Session::new(&ds, ChartConfig::default());
    let frame = session
        .handle(ViewEvent::Countries(vec!["DEU".into()]))
        .unwrap();
    let deu = frame.series_by_code("DEU").unwrap();
    assert_eq!(deu.values[0].y, 1234.5);
    assert_eq!(deu.max_y, Some(1234.5));
}

#[test]
fn highest_in_window_replaces_selection() {
    let ds = dataset();
    let mut session = Session::new(&ds, ChartConfig::default());
    session.handle(ViewEvent::ToYear(1990)).unwrap();
    let frame = session.handle(ViewEvent::Top).unwrap();
    let codes: Vec<&str> = frame.series.iter().map(|s| s.country_code.as_str()).collect();
    assert_eq!(codes, vec!["DEU", "USA", "VEN"]);
    assert_eq!(session.state().selected_country_codes, vec!["DEU", "USA", "VEN"]);
}

#[test]
fn unknown_country_and_region_are_not_errors() {
    let ds = dataset();
    let mut session = Session::new(&ds, ChartConfig::default());
    let frame = session
        .handle(ViewEvent::Countries(vec!["XXX".into(), "USA".into()]))
        .unwrap();
    assert_eq!(frame.series.len(), 1);
    let frame = session.handle(ViewEvent::Region("Atlantis".into())).unwrap();
    assert!(frame.series.is_empty());
    assert!(frame.legend.is_empty());
}

#[test]
fn subject_without_data_for_selection_is_empty() {
    let ds = dataset();
    let mut session = Session::new(&ds, ChartConfig::default());
    let frame = session.handle(ViewEvent::Subject("NGDP_RPCH".into())).unwrap();
    let codes: Vec<&str> = frame.series.iter().map(|s| s.country_code.as_str()).collect();
    assert_eq!(codes, vec!["USA"]);
    assert_eq!(frame.y_label, "Percent change");
    assert!(matches!(
        session.handle(ViewEvent::Subject("WEO".into())),
        Err(WeoError::PreconditionViolation(_))
    ));
}

#[test]
fn frame_renders_to_svg() {
    let ds = dataset();
    let cfg = ChartConfig::default();
    let mut session = Session::new(&ds, cfg.clone());
    let frame = session.refresh(RefreshKind::All).unwrap();

    let opts = RenderOptions {
        highlight: Some("USA".into()),
        ..RenderOptions::from_config(&cfg)
    };
    let svg = render_svg_string(&frame, &opts).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Current account balance (BCA)"));
    assert!(svg.contains("Venezuela, RB"));
    assert!(svg.contains("United States"));
    assert!(svg.contains("Year"));

    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    render_svg(&frame, &path, &opts).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn missing_year_column_fails_load() {
    let dir = tempdir().unwrap();
    let (weo, _) = common::write_fixture(dir.path());
    let cfg = ChartConfig {
        end_year: 2016,
        ..ChartConfig::default()
    };
    let err = Dataset::load(&weo, None, &cfg).unwrap_err();
    assert!(matches!(err, WeoError::MissingColumn { ref column, .. } if column == "2016"));
}
