// File: crates/livechart/src/main.rs
// Summary: Headless shell; replays selection/drag events and timer ticks through the pipeline,
// writing each frame as ChartSpec JSON and a rendered PNG.

use anyhow::{Context, Result};
use clap::Parser;
use livechart_core::{
    render_to_png, theme, Config, CsvSource, Interval, MarketDataSource, Pipeline, PipelineOutput, RenderOptions,
    Session, SyntheticSource, UiEvent,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "livechart", about = "Live candlestick chart with wick-outlier cleaning")]
struct Args {
    /// TOML config; defaults to ./livechart.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of `<SYMBOL>_<INTERVAL>.csv` files. Synthetic data when omitted.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Instrument symbol to select after start-up (must be in the catalog).
    #[arg(long)]
    symbol: Option<String>,

    /// Interval code to select after start-up (1m, 5m, 15m, 30m, 1h, 1d).
    #[arg(long, value_parser = parse_interval)]
    interval: Option<Interval>,

    /// Drag the price-range control to LOW HIGH.
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    range: Option<Vec<f64>>,

    /// Timer ticks to run after the scripted events.
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Override the timer cadence from the config.
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Output directory for frames.
    #[arg(long, default_value = "target/out")]
    out: PathBuf,

    /// Theme preset (dark, light, high-contrast-dark); overrides the config.
    #[arg(long)]
    theme: Option<String>,

    #[arg(long, default_value_t = 1280)]
    width: i32,

    #[arg(long, default_value_t = 720)]
    height: i32,
}

fn parse_interval(s: &str) -> Result<Interval, String> {
    Interval::from_code(s).ok_or_else(|| format!("unknown interval '{s}'"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_default(),
    };

    let source: Box<dyn MarketDataSource> = match &args.data_dir {
        Some(dir) => Box::new(CsvSource::new(dir)),
        None => Box::new(SyntheticSource::now()),
    };
    log::info!("market data source: {}", source.id());

    let pipeline = Pipeline::new(source, &config);
    let mut session = Session::with_defaults(config.catalog())?;

    let mut opts = RenderOptions::default();
    opts.width = args.width;
    opts.height = args.height;
    opts.theme = theme::find(args.theme.as_deref().unwrap_or(&config.general.theme));

    let refresh = Duration::from_secs(args.refresh_secs.unwrap_or(config.general.refresh_secs));
    let events = scripted_events(&args);

    std::fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    for (frame, event) in events.iter().enumerate() {
        if matches!(event, UiEvent::Tick) {
            log::debug!("waiting {:?} for next tick", refresh);
            std::thread::sleep(refresh);
        }
        let out = session.step(&pipeline, event)?;
        write_frame(&args.out, frame, &out, &opts)?;
        println!(
            "frame {frame}: {} -> control min={:.4} max={:.4} value=[{:.4}, {:.4}]{}",
            out.chart.title,
            out.control.min,
            out.control.max,
            out.control.value[0],
            out.control.value[1],
            if out.is_fallback() { " (error)" } else { "" },
        );
    }
    Ok(())
}

/// Start, then any selection changes, the drag, and finally the timer ticks.
fn scripted_events(args: &Args) -> Vec<UiEvent> {
    let mut events = vec![UiEvent::Start];
    if let Some(symbol) = &args.symbol {
        events.push(UiEvent::SelectInstrument(symbol.clone()));
    }
    if let Some(interval) = args.interval {
        events.push(UiEvent::SelectInterval(interval));
    }
    if let Some(&[low, high]) = args.range.as_deref() {
        events.push(UiEvent::DragRange { low, high });
    }
    events.extend((0..args.ticks).map(|_| UiEvent::Tick));
    events
}

fn write_frame(dir: &Path, frame: usize, out: &PipelineOutput, opts: &RenderOptions) -> Result<()> {
    let json_path = dir.join(format!("frame_{frame:03}.json"));
    let json = serde_json::to_string_pretty(out)?;
    std::fs::write(&json_path, json).with_context(|| format!("writing {}", json_path.display()))?;

    let png_path = dir.join(format!("frame_{frame:03}.png"));
    render_to_png(&out.chart, opts, &png_path).with_context(|| format!("rendering {}", png_path.display()))?;
    std::fs::copy(&png_path, dir.join("latest.png"))?;
    log::debug!("wrote {} and {}", json_path.display(), png_path.display());
    Ok(())
}
