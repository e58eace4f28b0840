//! Leaderboard bar charts
//!
//! Any [`Leaderboard`] source can be plotted. The chart is a horizontal bar
//! chart with rank 1 at the top; it can be saved as an image (format picked
//! from the file extension) and/or printed to the terminal.

use crate::config::PlotConfig;
use once_cell::sync::Lazy;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use statboard_core::{Leaderboard, Result, StatsError, Table, Value, PLAYER_COLUMN};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const FONT_FAMILY: &str = "sans-serif";
const BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

// ab_glyph keeps a global registry; register once per process
static FONT_READY: Lazy<bool> =
    Lazy::new(|| register_font(FONT_FAMILY, FontStyle::Normal, BUNDLED_FONT).is_ok());

fn ensure_font() -> Result<()> {
    if *FONT_READY {
        Ok(())
    } else {
        Err(StatsError::Render("bundled font could not be loaded".to_string()))
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> StatsError {
    StatsError::Render(err.to_string())
}

/// Image encodings supported for saved charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl ImageFormat {
    /// Pick the format from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(StatsError::UnsupportedFormat { extension }),
        }
    }
}

/// Result of a plot request
#[derive(Debug, Clone, PartialEq)]
pub enum PlotOutcome {
    /// The source produced no rows; nothing was drawn
    NoData,
    Rendered {
        bars: usize,
        saved_to: Option<PathBuf>,
    },
}

/// One bar of the chart
#[derive(Debug, Clone, PartialEq)]
struct Bar {
    label: String,
    value: f64,
}

/// Renders leaderboards as horizontal bar charts
#[derive(Debug, Clone, Default)]
pub struct Visualizer {
    config: PlotConfig,
}

impl Visualizer {
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Plot the default leaderboard of `source` for `stat`.
    ///
    /// # Arguments
    ///
    /// * `source` - anything exposing the leaderboard capability
    /// * `stat` - stat column to rank by
    /// * `save_path` - write the chart here; parent directories are created
    /// * `show` - print the chart to stdout
    ///
    /// # Returns
    ///
    /// `PlotOutcome::NoData` when the leaderboard is empty, otherwise the
    /// number of bars drawn and where the image went
    pub fn leaderboard_plot<S: Leaderboard + ?Sized>(
        &self,
        source: &S,
        stat: &str,
        save_path: Option<&Path>,
        show: bool,
    ) -> Result<PlotOutcome> {
        let table = source.leaderboard(stat)?;
        if table.is_empty() {
            log::warn!("leaderboard_plot: no data to plot");
            return Ok(PlotOutcome::NoData);
        }

        let saved_to = match save_path {
            Some(path) => Some(self.save_chart(&table, stat, path)?),
            None => None,
        };

        if show {
            let text = self.render_text(&table, stat)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }

        Ok(PlotOutcome::Rendered {
            bars: table.row_count(),
            saved_to,
        })
    }

    /// Draw `table` (a leaderboard result) into an image file.
    ///
    /// The image always covers the full `PlotConfig::pixel_size` canvas; it is
    /// not cropped to the drawn content. Margins and label areas are sized
    /// from the configured fonts and the longest player label instead.
    pub fn save_chart(&self, table: &Table, stat: &str, path: &Path) -> Result<PathBuf> {
        // Resolve everything that can fail cheaply before touching the disk
        let format = ImageFormat::from_path(path)?;
        let bars = bars(table, stat)?;
        axis_range(&bars, stat)?;
        ensure_font()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let size = self.config.pixel_size();
        match format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw_chart(&root, &bars, stat)?;
            }
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw_chart(&root, &bars, stat)?;
            }
        }

        log::info!("Saved plot: {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Terminal rendering of the chart: title line, then one bar per row.
    pub fn render_text(&self, table: &Table, stat: &str) -> Result<String> {
        let bars = bars(table, stat)?;
        let mut out = String::new();

        let _ = writeln!(out, "{}", chart_title(bars.len(), stat));

        let label_width = bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);
        let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        let width = self.config.text_width;

        for bar in &bars {
            let len = if max > 0.0 && bar.value > 0.0 {
                ((bar.value / max) * width as f64).round() as usize
            } else {
                0
            };
            let _ = writeln!(
                out,
                "{:<label_width$} | {} {}",
                bar.label,
                "█".repeat(len),
                format_value(bar.value),
            );
        }

        Ok(out)
    }

    fn draw_chart<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        bars: &[Bar],
        stat: &str,
    ) -> Result<()> {
        let config = &self.config;
        let title_px = config.font_px(config.title_font_pt);
        let label_px = config.font_px(config.label_font_pt);
        let [r, g, b] = config.bar_color;

        let n = bars.len() as i32;
        let (x_min, x_max) = axis_range(bars, stat)?;

        let longest = bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(1) as f64;
        let y_label_area = longest * label_px * 0.6 + label_px;

        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(root)
            .caption(chart_title(bars.len(), stat), (FONT_FAMILY, title_px))
            .margin(label_px / 2.0)
            .x_label_area_size(label_px * 2.5)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(x_min..x_max, (0..n - 1).into_segmented())
            .map_err(render_err)?;

        // Slot n-1 is the top of the axis; rank 1 goes there
        let label_for = |y: &SegmentValue<i32>| match y {
            SegmentValue::CenterOf(pos) | SegmentValue::Exact(pos) => bars
                .get((n - 1 - pos) as usize)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        };

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(bars.len())
            .y_label_formatter(&label_for)
            .x_desc(title_case(stat))
            .label_style((FONT_FAMILY, label_px))
            .axis_desc_style((FONT_FAMILY, label_px))
            .draw()
            .map_err(render_err)?;

        let bar_margin = (label_px / 3.0) as u32;
        chart
            .draw_series(
                Histogram::horizontal(&chart)
                    .style(RGBColor(r, g, b).filled())
                    .margin(bar_margin)
                    .data(
                        bars.iter()
                            .enumerate()
                            .map(|(i, bar)| (n - 1 - i as i32, bar.value)),
                    ),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

/// Pull (player, stat) pairs out of a leaderboard table in row order.
fn bars(table: &Table, stat: &str) -> Result<Vec<Bar>> {
    let (Some(player_idx), Some(stat_idx)) =
        (table.column_index(PLAYER_COLUMN), table.column_index(stat))
    else {
        return Ok(Vec::new());
    };

    table
        .rows()
        .iter()
        .map(|row| {
            let label = row[player_idx].to_string();
            let value = match &row[stat_idx] {
                Value::Null => 0.0,
                other => other.as_f64().ok_or_else(|| StatsError::NonNumeric {
                    column: stat.to_string(),
                    player: label.clone(),
                    value: other.to_string(),
                })?,
            };
            if !value.is_finite() {
                return Err(StatsError::NonFinite {
                    column: stat.to_string(),
                    player: label,
                });
            }
            Ok(Bar { label, value })
        })
        .collect()
}

/// Value axis with 5% headroom past the extreme bars, always including 0.
fn axis_range(bars: &[Bar], stat: &str) -> Result<(f64, f64)> {
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let min = bars.iter().map(|b| b.value).fold(0.0_f64, f64::min);
    let x_max = if max > 0.0 { max * 1.05 } else { 1.0 };
    let x_min = if min < 0.0 { min * 1.05 } else { 0.0 };

    if !(x_max - x_min).is_finite() {
        return Err(StatsError::Render(format!(
            "'{}' values span too wide a range to draw",
            stat
        )));
    }
    Ok((x_min, x_max))
}

/// "Top 5 Players by Passing_Yards" style title
pub fn chart_title(count: usize, stat: &str) -> String {
    format!("Top {} Players by {}", count, title_case(stat))
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
