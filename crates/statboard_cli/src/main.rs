//! Statboard CLI
//!
//! CSV stat sheet → leaderboard → chart + CSV/JSON exports

#[cfg(feature = "cli")]
mod plot_config_env;

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use statboard_core::{
    Exporter, Leaderboard, LeaderboardQuery, StatsDataset, Table, DEFAULT_TOP_N,
};
#[cfg(feature = "cli")]
use statboard_render::{PlotOutcome, Visualizer};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "statboard")]
#[command(about = "Ranked leaderboards from CSV stat sheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Rank players by a stat and optionally write chart/CSV/JSON outputs
    Leaderboard {
        /// Input CSV file path (header row required)
        #[arg(long)]
        csv: PathBuf,

        /// Stat column to sum and rank by
        #[arg(long)]
        stat: String,

        /// Keep only this position (case-insensitive)
        #[arg(long)]
        position: Option<String>,

        /// Keep only this season
        #[arg(long)]
        season: Option<i64>,

        /// Number of players to keep
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Directory for leaderboard_<stat>.{png,csv,json}
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the bar chart to the terminal
        #[arg(long, default_value = "false")]
        show: bool,
    },

    /// Re-export the whole stat sheet as CSV or JSON (by extension)
    Export {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Output file (.csv or .json)
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Leaderboard {
            csv,
            stat,
            position,
            season,
            top,
            out_dir,
            show,
        } => {
            let dataset = load_dataset(&csv)?;

            let mut query = LeaderboardQuery::new(&stat).top_n(top);
            if let Some(position) = position {
                query = query.position(position);
            }
            if let Some(season) = season {
                query = query.season(season);
            }

            let scoped = dataset.scoped(query);
            let board = scoped
                .leaderboard(&stat)
                .with_context(|| format!("Failed to build '{}' leaderboard", stat))?;

            if board.is_empty() {
                println!("⚠️  No rows for '{}' with the given filters", stat);
                return Ok(());
            }

            print_table(&board);

            let stem = format!("leaderboard_{}", stat);
            if let Some(dir) = &out_dir {
                export_board(&board, &stem, dir)?;
            }

            let chart_path = out_dir.map(|dir| dir.join(format!("{stem}.png")));
            if chart_path.is_some() || show {
                let visualizer = Visualizer::new(plot_config_env::plot_config_from_env()?);
                if show {
                    println!();
                }
                let outcome = visualizer
                    .leaderboard_plot(&scoped, &stat, chart_path.as_deref(), show)
                    .context("Failed to render chart")?;

                if let PlotOutcome::Rendered {
                    saved_to: Some(path),
                    ..
                } = outcome
                {
                    println!("✅ Saved plot: {}", path.display());
                }
            }
        }

        Commands::Export { csv, out } => {
            let dataset = load_dataset(&csv)?;

            let extension = out
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            let written = match extension.as_deref() {
                Some("csv") => dataset.export_csv(&out)?,
                Some("json") => dataset.export_json(&out)?,
                _ => anyhow::bail!(
                    "❌ Unsupported export target: {} (use .csv or .json)",
                    out.display()
                ),
            };

            println!("✅ Exported {} rows to {}", dataset.row_count(), written.display());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn load_dataset(csv: &Path) -> Result<StatsDataset> {
    println!("📄 Loading {}", csv.display());
    let table = statboard_core::load_csv(csv)
        .with_context(|| format!("Failed to load CSV file: {}", csv.display()))?;
    println!("   {} rows, {} columns", table.row_count(), table.col_count());
    Ok(StatsDataset::new(table))
}

/// CSV and JSON copies of one leaderboard
#[cfg(feature = "cli")]
fn export_board(board: &Table, stem: &str, dir: &Path) -> Result<()> {
    let exporter = Exporter::new();

    let csv = exporter
        .to_csv(board, dir.join(format!("{stem}.csv")))
        .context("Failed to write CSV")?;
    let json = exporter
        .to_json(board, dir.join(format!("{stem}.json")))
        .context("Failed to write JSON")?;

    println!("\n✅ Saved exports:");
    println!("   {}", csv.display());
    println!("   {}", json.display());
    Ok(())
}

#[cfg(feature = "cli")]
fn print_table(table: &Table) {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("{:<w$}", name, w = *w))
        .collect();
    println!("{}", header.join("  "));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect();
        println!("{}", line.join("  "));
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("statboard CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
