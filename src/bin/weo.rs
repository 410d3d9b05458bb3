use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use weo_rs::render::{RenderOptions, render_svg};
use weo_rs::{ChartConfig, Dataset, Session, ViewEvent, region, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "weo",
    version,
    about = "Explore, rank & chart IMF World Economic Outlook series"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List countries of the dataset.
    Countries(DataArgs),
    /// List subjects of the dataset.
    Subjects(DataArgs),
    /// List named regions, or the members of one region.
    Regions {
        /// Region name (e.g., "G8 Countries")
        name: Option<String>,
    },
    /// Chart a selection (and optionally export it and print stats).
    Plot(PlotArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// WEO export, tab separated.
    #[arg(long)]
    data: PathBuf,
    /// Country reference table (tab separated, or comma separated if .csv).
    #[arg(long = "ref")]
    reference: Option<PathBuf>,
    /// JSON chart configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Subject code (e.g., BCA or NGDP_RPCH)
    #[arg(short, long)]
    subject: Option<String>,
    /// Country codes separated by comma or semicolon (e.g., VEN,USA)
    #[arg(short, long)]
    countries: Option<String>,
    /// Select the members of a named region.
    #[arg(short, long)]
    region: Option<String>,
    /// Select the countries with the highest values in the window.
    #[arg(long, conflicts_with = "bottom")]
    top: bool,
    /// Select the countries with the lowest values in the window.
    #[arg(long)]
    bottom: bool,
    /// First visible year.
    #[arg(long)]
    from: Option<i32>,
    /// Last visible year.
    #[arg(long)]
    to: Option<i32>,
    /// Chart output path (.svg).
    #[arg(short, long, default_value = "weo.svg")]
    out: PathBuf,
    /// Canvas width, margins included.
    #[arg(long)]
    width: Option<u32>,
    /// Canvas height, margins included.
    #[arg(long)]
    height: Option<u32>,
    /// Number format for value ticks (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Draw this country emphasized and fade the others.
    #[arg(long)]
    highlight: Option<String>,
    /// Save the drawn series (format from extension: .csv or .json).
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print window statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_ascii_uppercase())
        .filter(|x| !x.is_empty())
        .collect()
}

fn load(args: &DataArgs) -> Result<(Dataset, ChartConfig)> {
    let cfg = match &args.config {
        Some(p) => ChartConfig::from_json_file(p)?,
        None => ChartConfig::default(),
    };
    let data = Dataset::load(&args.data, args.reference.as_deref(), &cfg)
        .with_context(|| format!("load {}", args.data.display()))?;
    Ok((data, cfg))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Countries(args) => {
            let (data, _) = load(&args)?;
            for c in &data.countries {
                println!("{}\t{}", c.country_code, c.country_name);
            }
            Ok(())
        }
        Command::Subjects(args) => {
            let (data, _) = load(&args)?;
            for s in &data.subjects {
                println!("{}\t{}", s.subject_code, s.display_name());
            }
            Ok(())
        }
        Command::Regions { name } => cmd_regions(name),
        Command::Plot(args) => cmd_plot(args),
    }
}

fn cmd_regions(name: Option<String>) -> Result<()> {
    match name {
        Some(name) => {
            let members = region::resolve_region(&name);
            if members.is_empty() {
                anyhow::bail!("unknown region: {}", name);
            }
            println!("{}", members.join(","));
        }
        None => {
            for n in region::region_names() {
                println!("{n}");
            }
        }
    }
    Ok(())
}

/// Selector changes in the order a user would make them.
fn plot_events(args: &PlotArgs) -> Vec<ViewEvent> {
    let mut events = Vec::new();
    if let Some(s) = &args.subject {
        events.push(ViewEvent::Subject(s.trim().to_string()));
    }
    if let Some(y) = args.from {
        events.push(ViewEvent::FromYear(y));
    }
    if let Some(y) = args.to {
        events.push(ViewEvent::ToYear(y));
    }
    if let Some(c) = &args.countries {
        events.push(ViewEvent::Countries(parse_list(c)));
    }
    if let Some(r) = &args.region {
        events.push(ViewEvent::Region(r.clone()));
    }
    if args.top {
        events.push(ViewEvent::Top);
    } else if args.bottom {
        events.push(ViewEvent::Bottom);
    }
    events
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let (data, mut cfg) = load(&args.data)?;
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    cfg.validate()?;

    let mut session = Session::new(&data, cfg.clone());
    let mut frame = None;
    for event in plot_events(&args) {
        frame = Some(session.handle(event)?);
    }
    if let Some(settled) = session.complete_transition()? {
        frame = Some(settled);
    }
    let frame = match frame {
        Some(f) => f,
        None => session.refresh(weo_rs::RefreshKind::All)?,
    };

    let opts = RenderOptions {
        locale: args.locale.clone(),
        highlight: args.highlight.as_ref().map(|h| h.trim().to_ascii_uppercase()),
        ..RenderOptions::from_config(&cfg)
    };
    render_svg(&frame, &args.out, &opts)?;
    eprintln!(
        "Wrote plot of {} countries to {}",
        frame.series.len(),
        args.out.display()
    );

    if let Some(path) = args.export.as_ref() {
        let rows = storage::series_rows(&frame.series, &frame.subject.subject_code);
        storage::save_series(&rows, path)?;
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }

    if args.stats {
        let state = session.state();
        for s in stats::window_summary(&frame.series, state.from_year, state.to_year) {
            println!(
                "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                s.country_code,
                frame.subject.subject_code,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
