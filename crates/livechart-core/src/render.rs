// File: crates/livechart-core/src/render.rs
// Summary: Headless PNG rendering of a ChartSpec using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::chart::{Band, CandlestickTrace, ChartSpec, Color, LineTrace};
use crate::grid::{format_price, format_time, linspace};
use crate::theme::Theme;
use crate::types::{Insets, PlotRect, HEIGHT, WIDTH};
use crate::view::ViewState;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text is platform/font dependent; tests turn it off for stable pixels.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
        }
    }
}

fn to_skia(c: Color, opacity: f32) -> skia::Color {
    let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    skia::Color::from_argb(a, c.r, c.g, c.b)
}

/// World → pixel transform for one frame.
struct Projector {
    plot: PlotRect,
    view: ViewState,
}

impl Projector {
    fn sx(&self, t: f64) -> f32 {
        let x = self.view.mapping.to_axis(t);
        let span = (self.view.x_max - self.view.x_min).max(1e-9);
        self.plot.left as f32 + ((x - self.view.x_min) / span) as f32 * self.plot.width() as f32
    }

    fn sy(&self, y: f64) -> f32 {
        let span = (self.view.y_max - self.view.y_min).max(1e-9);
        self.plot.bottom as f32 - ((y - self.view.y_min) / span) as f32 * self.plot.height() as f32
    }

    fn rect(&self) -> skia::Rect {
        skia::Rect::from_ltrb(self.plot.left as f32, self.plot.top as f32, self.plot.right as f32, self.plot.bottom as f32)
    }
}

/// Render the spec and return encoded PNG bytes.
pub fn render_to_png_bytes(spec: &ChartSpec, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width.max(1), opts.height.max(1)))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    draw_spec(surface.canvas(), spec, opts);

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render the spec to a PNG at `output_png_path`, creating parent directories.
pub fn render_to_png(spec: &ChartSpec, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_to_png_bytes(spec, opts)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path, bytes)?;
    Ok(())
}

fn draw_spec(canvas: &skia::Canvas, spec: &ChartSpec, opts: &RenderOptions) {
    let theme = &opts.theme;
    canvas.clear(theme.background);

    let proj = Projector { plot: PlotRect::inset(opts.width, opts.height, &opts.insets), view: ViewState::from_spec(spec) };

    draw_grid(canvas, &proj, theme);

    canvas.save();
    canvas.clip_rect(proj.rect(), skia::ClipOp::Intersect, false);
    for band in &spec.bands {
        draw_band(canvas, &proj, band);
    }
    if let Some(trace) = spec.candlesticks() {
        draw_candles(canvas, &proj, trace);
    }
    for line in spec.lines() {
        draw_line(canvas, &proj, line);
    }
    canvas.restore();

    draw_axes(canvas, &proj, theme);

    if opts.draw_labels {
        draw_tick_labels(canvas, &proj, theme, spec.candlesticks().is_some());
        draw_title(canvas, opts, &spec.title, theme);
        for (i, a) in spec.annotations.iter().enumerate() {
            let y = (opts.height / 2) as f32 + i as f32 * 22.0;
            draw_centered(canvas, &a.text, opts.width, y, 16.0, theme.annotation);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, proj: &Projector, theme: &Theme) {
    let p = &proj.plot;
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    // verticals
    for x in linspace(p.left as f64, p.right as f64, 10) {
        canvas.draw_line((x as f32, p.top as f32), (x as f32, p.bottom as f32), &paint);
    }
    // horizontals
    for y in linspace(p.top as f64, p.bottom as f64, 6) {
        canvas.draw_line((p.left as f32, y as f32), (p.right as f32, y as f32), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, proj: &Projector, theme: &Theme) {
    let p = &proj.plot;
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    canvas.draw_line((p.left as f32, p.bottom as f32), (p.right as f32, p.bottom as f32), &axis_paint);
    canvas.draw_line((p.left as f32, p.top as f32), (p.left as f32, p.bottom as f32), &axis_paint);
}

fn draw_tick_labels(canvas: &skia::Canvas, proj: &Projector, theme: &Theme, has_data: bool) {
    if !has_data { return; }
    let p = &proj.plot;
    let v = &proj.view;
    let mut paint = skia::Paint::default();
    paint.set_color(theme.tick);
    paint.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(12.0);

    let y_span = v.y_max - v.y_min;
    for (py, value) in linspace(p.bottom as f64, p.top as f64, 6).into_iter().zip(linspace(v.y_min, v.y_max, 6)) {
        canvas.draw_str(format_price(value, y_span), (4.0, py as f32 + 4.0), &font, &paint);
    }

    let t0 = v.mapping.from_axis(v.x_min);
    let t1 = v.mapping.from_axis(v.x_max);
    for (px, x) in linspace(p.left as f64, p.right as f64, 5).into_iter().zip(linspace(v.x_min, v.x_max, 5)) {
        let label = format_time(v.mapping.from_axis(x), t1 - t0);
        canvas.draw_str(label, (px as f32 - 36.0, p.bottom as f32 + 20.0), &font, &paint);
    }
}

fn draw_title(canvas: &skia::Canvas, opts: &RenderOptions, title: &str, theme: &Theme) {
    draw_centered(canvas, title, opts.width, 36.0, 20.0, theme.title);
}

fn draw_centered(canvas: &skia::Canvas, text: &str, width: i32, baseline: f32, size: f32, color: skia::Color) {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(size);
    let (advance, _) = font.measure_str(text, Some(&paint));
    canvas.draw_str(text, ((width as f32 - advance) * 0.5, baseline), &font, &paint);
}

fn draw_band(canvas: &skia::Canvas, proj: &Projector, band: &Band) {
    let x0 = proj.sx(band.x0);
    let x1 = proj.sx(band.x1);
    if (x1 - x0).abs() < 0.5 { return; }
    let mut fill = skia::Paint::default();
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(to_skia(band.fill, band.opacity));
    let rect = skia::Rect::from_ltrb(x0.min(x1), proj.plot.top as f32, x0.max(x1), proj.plot.bottom as f32);
    canvas.draw_rect(rect, &fill);
}

fn draw_line(canvas: &skia::Canvas, proj: &Projector, line: &LineTrace) {
    let data = &line.points;
    if data.len() < 2 {
        return;
    }

    let mut path = skia::Path::new();
    path.move_to((proj.sx(data[0].t), proj.sy(data[0].value)));
    for p in data.iter().skip(1) {
        path.line_to((proj.sx(p.t), proj.sy(p.value)));
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(line.width);
    stroke.set_color(to_skia(line.color, 1.0));

    canvas.draw_path(&path, &stroke);
}

fn draw_candles(canvas: &skia::Canvas, proj: &Projector, trace: &CandlestickTrace) {
    if trace.candles.is_empty() { return; }

    let mut wick = skia::Paint::default();
    wick.set_anti_alias(true);
    wick.set_style(skia::paint::Style::Stroke);
    wick.set_stroke_width(1.0);

    let mut body = skia::Paint::default();
    body.set_anti_alias(true);
    body.set_style(skia::paint::Style::Fill);

    // body width in pixels (roughly one “bar width” as fraction of plot)
    let n = trace.candles.len() as f32;
    let bar_px = (proj.plot.width() as f32 / n).max(1.0) * 0.7;
    let half = bar_px * 0.5;
    let up = to_skia(trace.increasing, 1.0);
    let down = to_skia(trace.decreasing, 1.0);

    for c in &trace.candles {
        let x = proj.sx(c.t);
        let y_o = proj.sy(c.o);
        let y_c = proj.sy(c.c);

        let color = if c.is_up() { up } else { down };
        wick.set_color(color);
        body.set_color(color);

        canvas.draw_line((x, proj.sy(c.h)), (x, proj.sy(c.l)), &wick);

        let top = y_o.min(y_c);
        let bot = y_o.max(y_c);
        let rect = skia::Rect::from_ltrb(x - half, top, x + half, bot.max(top + 1.0));
        canvas.draw_rect(rect, &body);
    }
}
