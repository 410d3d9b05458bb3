//! SVG rendering of a [`Frame`].
//!
//! Everything is drawn with plotters primitives in canvas pixels. The plot
//! area sits inside the configured margins; series geometry comes straight
//! from the frame's [`WindowedLayout`](crate::layout::WindowedLayout) and
//! [`ValueScale`](crate::layout::ValueScale), so the chart shows exactly the
//! window the pipeline laid out.
//!
//! - Grid, axes, and a darker origin line at zero
//! - Monotone curves clipped to the plot box
//! - Legend markers and labels at the positions in the frame
//! - Optional highlight: one country drawn bold, the others faded
//! - Locale-aware value tick labels (`30,000` vs `30.000`)

use crate::color::Rgba;
use crate::config::{ChartConfig, Margin};
use crate::curve::{Pt, clip_polyline, monotone_samples};
use crate::error::{Result, WeoError};
use crate::pipeline::{Frame, LEGEND_FONT_PX};
use crate::text::{truncate_to_width, wrap_text_to_width};
use num_format::{Locale, ToFormattedString};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontTransform};
use plotters_svg::SVGBackend;
use std::path::Path;

const TITLE_FONT_PX: u32 = 20;
const AXIS_DESC_FONT_PX: u32 = 14;
const TICK_FONT_PX: u32 = 12;
const VALUE_TICKS: usize = 8;
const FADED_ALPHA: f64 = 0.2;
const GRID: RGBColor = RGBColor(230, 230, 230);
const AXIS: RGBColor = RGBColor(90, 90, 90);

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    /// Locale tag for value tick labels, e.g. `en` or `de`.
    pub locale: String,
    /// Country drawn emphasized; all others are faded.
    pub highlight: Option<String>,
    /// Curve samples per year segment.
    pub curve_steps: usize,
}

impl RenderOptions {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            margin: cfg.margin,
            locale: "en".into(),
            highlight: None,
            curve_steps: 12,
        }
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Anything else falls back to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Format `v` with `decimals` fraction digits and locale grouping.
pub fn format_value(v: f64, decimals: usize, locale: &Locale, dec_sep: char) -> String {
    let fixed = format!("{:.*}", decimals, v.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let int: u64 = int_part.parse().unwrap_or(0);
    let mut out = String::new();
    if v < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&int.to_formatted_string(locale));
    if !frac.is_empty() {
        out.push(dec_sep);
        out.push_str(frac);
    }
    out
}

/// Fraction digits needed to tell ticks `step` apart.
fn decimals_for_step(step: f64) -> usize {
    if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    }
}

fn plotters_color(c: Rgba, alpha: f64) -> RGBAColor {
    RGBColor(c.r, c.g, c.b).mix(alpha * c.a as f64 / 255.0)
}

fn draw_err<E: std::fmt::Debug>(e: E) -> WeoError {
    WeoError::Render(format!("{e:?}"))
}

fn px(p: Pt, dx: f64, dy: f64) -> (i32, i32) {
    ((p.0 + dx).round() as i32, (p.1 + dy).round() as i32)
}

/// Render `frame` into an SVG file at `out_path`.
pub fn render_svg<P: AsRef<Path>>(frame: &Frame, out_path: P, opts: &RenderOptions) -> Result<()> {
    let out_path = out_path.as_ref();
    {
        let root = SVGBackend::new(out_path, (opts.width, opts.height)).into_drawing_area();
        draw_frame(&root, frame, opts)?;
        root.present().map_err(draw_err)?;
    }
    log::info!("wrote {}", out_path.display());
    Ok(())
}

/// Render `frame` and return the SVG document.
pub fn render_svg_string(frame: &Frame, opts: &RenderOptions) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (opts.width, opts.height)).into_drawing_area();
        draw_frame(&root, frame, opts)?;
        root.present().map_err(draw_err)?;
    }
    Ok(buf)
}

fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    opts: &RenderOptions,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;
    draw_axes(root, frame, opts)?;
    draw_series(root, frame, opts)?;
    draw_legend(root, frame, opts)?;
    draw_labels(root, frame, opts)
}

fn draw_axes<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    opts: &RenderOptions,
) -> Result<()> {
    let m = opts.margin;
    let (left, top) = (m.left as f64, m.top as f64);
    let (w, h) = (frame.layout.width, frame.y_scale.height);
    let tick_style = TextStyle::from((FontFamily::SansSerif, TICK_FONT_PX)).color(&AXIS);

    // Value grid and tick labels.
    let ticks = frame.y_scale.ticks(VALUE_TICKS);
    let step = match ticks.as_slice() {
        [a, b, ..] => b - a,
        _ => 1.0,
    };
    let (locale, dec_sep) = map_locale(&opts.locale);
    let decimals = decimals_for_step(step);
    for v in &ticks {
        let y = frame.y_scale.y(*v);
        root.draw(&PathElement::new(
            vec![px((0.0, y), left, top), px((w, y), left, top)],
            GRID.stroke_width(1),
        ))
        .map_err(draw_err)?;
        root.draw(&Text::new(
            format_value(*v, decimals, locale, dec_sep),
            px((-8.0, y), left, top),
            tick_style.pos(Pos::new(HPos::Right, VPos::Center)),
        ))
        .map_err(draw_err)?;
    }

    // Year grid and tick labels.
    for (year, x) in frame.layout.ticks() {
        root.draw(&PathElement::new(
            vec![px((x, 0.0), left, top), px((x, h), left, top)],
            GRID.stroke_width(1),
        ))
        .map_err(draw_err)?;
        root.draw(&Text::new(
            year.to_string(),
            px((x, h + 8.0), left, top),
            tick_style.pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(draw_err)?;
    }

    // Axis lines, then the origin line.
    root.draw(&PathElement::new(
        vec![px((0.0, 0.0), left, top), px((0.0, h), left, top), px((w, h), left, top)],
        AXIS.stroke_width(1),
    ))
    .map_err(draw_err)?;
    let zero = frame.y_scale.y(0.0);
    root.draw(&PathElement::new(
        vec![px((0.0, zero), left, top), px((w, zero), left, top)],
        BLACK.stroke_width(1),
    ))
    .map_err(draw_err)?;
    Ok(())
}

fn draw_series<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    opts: &RenderOptions,
) -> Result<()> {
    let m = opts.margin;
    let (left, top) = (m.left as f64, m.top as f64);
    let (w, h) = (frame.layout.width, frame.y_scale.height);

    for s in &frame.series {
        let Some(color) = s.color else {
            log::warn!("series {} has no color; skipped", s.country_code);
            continue;
        };
        let (alpha, stroke) = match opts.highlight.as_deref() {
            Some(code) if code == s.country_code => (1.0, 3),
            Some(_) => (FADED_ALPHA, 2),
            None => (1.0, 2),
        };
        let style = plotters_color(color, alpha).stroke_width(stroke);

        let pts: Vec<Pt> = s
            .values
            .iter()
            .map(|p| (frame.layout.x(p.x), frame.y_scale.y(p.y)))
            .collect();
        if let [only] = pts.as_slice() {
            if frame.layout.is_visible(only.0) {
                root.draw(&Circle::new(px(*only, left, top), 2, style.filled()))
                    .map_err(draw_err)?;
            }
            continue;
        }
        for run in clip_polyline(&monotone_samples(&pts, opts.curve_steps), w, h) {
            let run: Vec<(i32, i32)> = run.into_iter().map(|p| px(p, left, top)).collect();
            root.draw(&PathElement::new(run, style)).map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    opts: &RenderOptions,
) -> Result<()> {
    let m = opts.margin;
    let (left, top) = (m.left as f64, m.top as f64);
    let label_style = TextStyle::from((FontFamily::SansSerif, LEGEND_FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Center));

    for node in &frame.legend {
        let Some(color) = frame
            .series_by_code(&node.country_code)
            .and_then(|s| s.color)
        else {
            continue;
        };
        let alpha = match opts.highlight.as_deref() {
            Some(code) if code != node.country_code => FADED_ALPHA,
            _ => 1.0,
        };
        let c = plotters_color(color, alpha);

        if (node.y - node.target_y).abs() > 1.0 {
            root.draw(&PathElement::new(
                vec![
                    px((frame.layout.width, node.target_y), left, top),
                    px((node.x, node.y), left, top),
                ],
                c.mix(0.5).stroke_width(1),
            ))
            .map_err(draw_err)?;
        }
        root.draw(&Circle::new(px((node.x + 6.0, node.y), left, top), 4, c.filled()))
            .map_err(draw_err)?;
        root.draw(&Text::new(
            node.label.as_str(),
            px((node.x + 14.0, node.y), left, top),
            label_style.color(&BLACK.mix(alpha)),
        ))
        .map_err(draw_err)?;
    }
    Ok(())
}

fn draw_labels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    opts: &RenderOptions,
) -> Result<()> {
    let m = opts.margin;
    let (left, top) = (m.left as f64, m.top as f64);
    let (w, h) = (frame.layout.width, frame.y_scale.height);

    // Title lines stack upward from just above the plot.
    let title_style = TextStyle::from((FontFamily::SansSerif, TITLE_FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    let title_width = (w as u32).saturating_add(m.right);
    let lines = wrap_text_to_width(&frame.title, TITLE_FONT_PX, title_width);
    let line_h = TITLE_FONT_PX as f64 + 4.0;
    for (i, line) in lines.iter().rev().enumerate() {
        let y = -(m.label as f64) - i as f64 * line_h;
        root.draw(&Text::new(line.as_str(), px((0.0, y), left, top), title_style.clone()))
            .map_err(draw_err)?;
    }

    let desc_style = TextStyle::from((FontFamily::SansSerif, AXIS_DESC_FONT_PX));
    root.draw(&Text::new(
        frame.x_label.as_str(),
        px((w / 2.0, h + m.bottom as f64 / 2.0), left, top),
        desc_style.pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(draw_err)?;

    let y_label = truncate_to_width(&frame.y_label, AXIS_DESC_FONT_PX, h as u32);
    root.draw(&Text::new(
        y_label,
        (m.label as i32, (top + h / 2.0).round() as i32),
        desc_style
            .pos(Pos::new(HPos::Center, VPos::Center))
            .transform(FontTransform::Rotate270),
    ))
    .map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_use_locale_grouping() {
        let (loc_en, dot) = map_locale("en");
        let (loc_de, comma) = map_locale("DE");
        assert_eq!(format_value(30000.0, 0, loc_en, dot), "30,000");
        assert_eq!(format_value(30000.0, 0, loc_de, comma), "30.000");
        assert_eq!(format_value(-1234.5, 1, loc_de, comma), "-1.234,5");
        assert_eq!(format_value(-0.0, 0, loc_en, dot), "0");
        assert_eq!(format_value(-0.25, 2, loc_en, dot), "-0.25");
    }

    #[test]
    fn decimals_follow_tick_step() {
        assert_eq!(decimals_for_step(50.0), 0);
        assert_eq!(decimals_for_step(1.0), 0);
        assert_eq!(decimals_for_step(0.5), 1);
        assert_eq!(decimals_for_step(0.02), 2);
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let (loc, sep) = map_locale("xx");
        assert_eq!(loc, &Locale::en);
        assert_eq!(sep, '.');
    }
}
