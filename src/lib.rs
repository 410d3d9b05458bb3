//! weo_rs
//!
//! A Rust library for exploring IMF World Economic Outlook (WEO) series:
//! load the tab-separated WEO export, pick countries (by hand, by region, or
//! as the highest/lowest in a year window), pick a subject and a window, and
//! chart the result. Pairs with the `weo` CLI.
//!
//! ### Features
//! - Typed loading of the WEO export and the country reference table
//! - Catalogs of countries, subjects, and years with first-occurrence dedup
//! - Highest/lowest ranking within a window, named regions
//! - Windowed x layout that keeps the full timeline's density
//! - Stable colors per country and a collision-avoiding legend
//! - SVG charts, CSV/JSON export, and window statistics
//!
//! ### Example
//! ```no_run
//! use weo_rs::{ChartConfig, Dataset, RefreshKind, Session, ViewEvent};
//! use weo_rs::render::{RenderOptions, render_svg};
//!
//! let cfg = ChartConfig::default();
//! let data = Dataset::load("WEOOct2016all.xls", None, &cfg)?;
//! let mut session = Session::new(&data, cfg.clone());
//! session.refresh(RefreshKind::All)?;
//! session.handle(ViewEvent::Region("G8 Countries".into()))?;
//! let frame = session.handle(ViewEvent::FromYear(2000))?;
//! render_svg(&frame, "g8.svg", &RenderOptions::from_config(&cfg))?;
//! # Ok::<(), weo_rs::WeoError>(())
//! ```

pub mod catalog;
pub mod color;
pub mod config;
pub mod curve;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod layout;
pub mod legend;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod ranking;
pub mod region;
pub mod render;
pub mod schema;
pub mod stats;
pub mod storage;
pub mod text;
pub mod transition;
pub mod view;

pub use config::ChartConfig;
pub use dataset::Dataset;
pub use error::{Result, WeoError};
pub use models::{Country, Series, SeriesPoint, Subject, WeoEntry};
pub use pipeline::{Frame, Session, refresh};
pub use ranking::RankDirection;
pub use view::{RefreshKind, ViewEvent, ViewState};
