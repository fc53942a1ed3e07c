use crate::chart::font::{FONT_FAMILY, ensure_font};
use crate::config::ChartConfig;
use crate::model::{ChartError, Table};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};
use tracing::info;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PIE_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];
const HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Saved(PathBuf),
    Skipped,
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Draw(e.to_string())
    }
}

pub struct ChartRenderer {
    width: u32,
    height: u32,
    /// Titles, axis descriptions and tick labels need a registered font.
    labels: bool,
}

impl ChartRenderer {
    pub fn new(cfg: &ChartConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            labels: ensure_font(&cfg.font_paths),
        }
    }

    /// Horizontal bars of `Frequency` per `Weather` category.
    pub fn weather(&self, table: &Table, path: &Path) -> Result<ChartOutcome, ChartError> {
        let (Some(names), Some(days)) = (table.text("Weather"), table.numeric("Frequency")) else {
            return skipped("No weather data to plot.");
        };
        if days.is_empty() {
            return skipped("No weather data to plot.");
        }

        let root = self.canvas(path)?;
        let top = days.iter().copied().fold(0.0, f64::max);
        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if self.labels {
            builder
                .caption("Weather Frequency", (FONT_FAMILY, 28))
                .x_label_area_size(40)
                .y_label_area_size(90);
        }
        let mut chart = builder.build_cartesian_2d(
            0f64..(top * 1.1).max(1.0),
            (0u32..days.len() as u32).into_segmented(),
        )?;

        if self.labels {
            let label = |v: &SegmentValue<u32>| category_label(names, v);
            chart
                .configure_mesh()
                .disable_y_mesh()
                .y_label_formatter(&label)
                .x_desc("Days")
                .draw()?;
        }

        chart.draw_series(days.iter().enumerate().map(|(i, &d)| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(i)), (d, SegmentValue::Exact(i + 1))],
                SKY_BLUE.filled(),
            );
            bar.set_margin(6, 6, 0, 0);
            bar
        }))?;

        self.finish(&root, path)
    }

    /// `Price` per `Symbol` as a line with markers.
    pub fn stocks(&self, table: &Table, path: &Path) -> Result<ChartOutcome, ChartError> {
        let (Some(symbols), Some(prices)) = (table.text("Symbol"), table.numeric("Price")) else {
            return skipped("No stock data available for plotting.");
        };
        if prices.is_empty() {
            return skipped("No stock data available for plotting.");
        }

        let root = self.canvas(path)?;
        let (lo, hi) = padded_range(&prices);
        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if self.labels {
            builder
                .caption("Top Stock Prices", (FONT_FAMILY, 28))
                .x_label_area_size(40)
                .y_label_area_size(70);
        }
        let mut chart =
            builder.build_cartesian_2d((0u32..prices.len() as u32).into_segmented(), lo..hi)?;

        if self.labels {
            let label = |v: &SegmentValue<u32>| category_label(symbols, v);
            chart
                .configure_mesh()
                .x_label_formatter(&label)
                .y_desc("Price (USD)")
                .draw()?;
        }

        let points = centered_points(&prices);
        chart.draw_series(LineSeries::new(points.clone(), DARK_GREEN.stroke_width(2)))?;
        chart.draw_series(
            points
                .into_iter()
                .map(|pt| Circle::new(pt, 5, DARK_GREEN.filled())),
        )?;

        self.finish(&root, path)
    }

    /// Share of each `Name` in the total `Price`.
    pub fn crypto(&self, table: &Table, path: &Path) -> Result<ChartOutcome, ChartError> {
        let (Some(names), Some(prices)) = (table.text("Name"), table.numeric("Price")) else {
            return skipped("No cryptocurrency data to plot.");
        };
        let total: f64 = prices.iter().sum();
        if prices.is_empty() || total <= 0.0 {
            return skipped("No cryptocurrency data to plot.");
        }

        let root = self.canvas(path)?;
        if self.labels {
            let area = root.titled("Crypto Market Distribution", (FONT_FAMILY, 28))?;
            self.draw_pie(&area, names, &prices, total)?;
        } else {
            self.draw_pie(&root, names, &prices, total)?;
        }

        self.finish(&root, path)
    }

    /// Distribution of `News Title` lengths in characters.
    pub fn news(&self, table: &Table, path: &Path) -> Result<ChartOutcome, ChartError> {
        let Some(titles) = table.text("News Title").filter(|t| !t.is_empty()) else {
            return skipped("No news data to plot.");
        };

        let lengths: Vec<f64> = titles.iter().map(|t| t.chars().count() as f64).collect();
        let bins = histogram(&lengths, HISTOGRAM_BINS);
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return skipped("No news data to plot.");
        };
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0);

        let root = self.canvas(path)?;
        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if self.labels {
            builder
                .caption("News Title Length Distribution", (FONT_FAMILY, 28))
                .x_label_area_size(40)
                .y_label_area_size(50);
        }
        let mut chart = builder.build_cartesian_2d(first.start..last.end, 0u32..peak + 1)?;

        if self.labels {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc("Title Length")
                .y_desc("Frequency")
                .draw()?;
        }

        chart.draw_series(bins.iter().map(|b| {
            let mut bar = Rectangle::new([(b.start, 0), (b.end, b.count)], ORANGE.filled());
            bar.set_margin(0, 0, 1, 1);
            bar
        }))?;

        self.finish(&root, path)
    }

    /// `Cases` per `Country` as a scatter plot.
    pub fn covid(&self, table: &Table, path: &Path) -> Result<ChartOutcome, ChartError> {
        let (Some(countries), Some(cases)) = (table.text("Country"), table.numeric("Cases")) else {
            return skipped("No numeric COVID-19 data available for plotting.");
        };
        if cases.is_empty() {
            return skipped("No numeric COVID-19 data available for plotting.");
        }

        let root = self.canvas(path)?;
        let (lo, hi) = padded_range(&cases);
        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if self.labels {
            builder
                .caption("COVID-19 Cases Scatter", (FONT_FAMILY, 28))
                .x_label_area_size(40)
                .y_label_area_size(100);
        }
        let mut chart =
            builder.build_cartesian_2d((0u32..cases.len() as u32).into_segmented(), lo..hi)?;

        if self.labels {
            let label = |v: &SegmentValue<u32>| category_label(countries, v);
            chart
                .configure_mesh()
                .x_label_formatter(&label)
                .x_desc("Country")
                .y_desc("Cases")
                .draw()?;
        }

        chart.draw_series(
            centered_points(&cases)
                .into_iter()
                .map(|pt| Circle::new(pt, 6, RED.filled())),
        )?;

        self.finish(&root, path)
    }

    fn draw_pie(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        names: &[String],
        values: &[f64],
        total: f64,
    ) -> Result<(), ChartError> {
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.35;
        let text = TextStyle::from((FONT_FAMILY, 18).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));

        let mut start = 0.0;
        for (i, value) in values.iter().enumerate() {
            let sweep = value.max(0.0) / total * TAU;
            let color = PIE_COLORS[i % PIE_COLORS.len()];
            area.draw(&Polygon::new(
                wedge(center, radius, start, start + sweep),
                color.filled(),
            ))?;

            if self.labels {
                let mid = start + sweep / 2.0;
                area.draw(&Text::new(
                    format!("{:.1}%", value / total * 100.0),
                    polar(center, radius * 0.6, mid),
                    text.clone(),
                ))?;
                area.draw(&Text::new(
                    names[i].clone(),
                    polar(center, radius * 1.15, mid),
                    text.clone(),
                ))?;
            }
            start += sweep;
        }
        Ok(())
    }

    fn canvas<'a>(&self, path: &'a Path) -> Result<DrawingArea<BitMapBackend<'a>, Shift>, ChartError> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        Ok(root)
    }

    fn finish(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        path: &Path,
    ) -> Result<ChartOutcome, ChartError> {
        root.present()?;
        info!("📊 Chart saved: {}", path.display());
        Ok(ChartOutcome::Saved(path.to_path_buf()))
    }
}

fn skipped(notice: &str) -> Result<ChartOutcome, ChartError> {
    info!("{}", notice);
    Ok(ChartOutcome::Skipped)
}

fn category_label(names: &[String], v: &SegmentValue<u32>) -> String {
    match v {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
            names.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

fn centered_points(values: &[f64]) -> Vec<(SegmentValue<u32>, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (SegmentValue::CenterOf(i as u32), v))
        .collect()
}

/// Value axis range with some headroom; never dips below zero for non-negative data.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.1).max(max.abs() * 0.05).max(1.0);
    let lo = if min >= 0.0 { (min - pad).max(0.0) } else { min - pad };
    (lo, max + pad)
}

fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}

/// Polygon approximating a pie slice, counter-clockwise from `from` to `to` (radians).
fn wedge(center: (i32, i32), radius: f64, from: f64, to: f64) -> Vec<(i32, i32)> {
    let steps = ((to - from).to_degrees().ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for k in 0..=steps {
        let angle = from + (to - from) * k as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: u32,
}

/// Equal-width bins over the value range; the last bin includes its upper edge.
/// A range of zero width is widened to one unit around the value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}
