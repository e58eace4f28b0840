use statboard_core::{Leaderboard, Result, StatsDataset, StatsError, Table, Value};
use statboard_render::{PlotConfig, PlotOutcome, Visualizer};
use std::cell::Cell;
use tempfile::tempdir;

fn dataset() -> StatsDataset {
    StatsDataset::new(Table::from_records(vec![
        vec![("player", Value::from("A")), ("yards", Value::from(100))],
        vec![("player", Value::from("B")), ("yards", Value::from(150))],
        vec![("player", Value::from("A")), ("yards", Value::from(80))],
    ]))
}

fn small() -> Visualizer {
    Visualizer::new(PlotConfig {
        width_in: 4.0,
        height_in: 3.0,
        dpi: 50,
        ..PlotConfig::default()
    })
}

/// A source that is not a dataset at all, only the capability
struct FixedBoard {
    calls: Cell<usize>,
    table: Table,
}

impl Leaderboard for FixedBoard {
    fn leaderboard(&self, _stat: &str) -> Result<Table> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.table.clone())
    }
}

#[test]
fn no_save_and_no_show_writes_nothing() {
    let dir = tempdir().unwrap();
    let outcome = small()
        .leaderboard_plot(&dataset(), "yards", None, false)
        .unwrap();

    assert_eq!(
        outcome,
        PlotOutcome::Rendered {
            bars: 2,
            saved_to: None
        }
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn saves_png_and_creates_parent_dir() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("yards.png");

    let outcome = small()
        .leaderboard_plot(&dataset(), "yards", Some(&path), false)
        .unwrap();

    assert_eq!(
        outcome,
        PlotOutcome::Rendered {
            bars: 2,
            saved_to: Some(path.clone())
        }
    );
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn saves_svg_with_title_and_labels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("yards.svg");

    small()
        .leaderboard_plot(&dataset(), "yards", Some(&path), false)
        .unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Top 2 Players by Yards"));
}

#[test]
fn missing_stat_is_no_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sacks.png");

    let outcome = small()
        .leaderboard_plot(&dataset(), "sacks", Some(&path), true)
        .unwrap();

    assert_eq!(outcome, PlotOutcome::NoData);
    assert!(!path.exists());
}

#[test]
fn any_leaderboard_source_can_be_plotted() {
    let source = FixedBoard {
        calls: Cell::new(0),
        table: Table::from_rows(
            ["rank", "player", "td"],
            vec![vec![1.into(), "Solo".into(), 3.into()]],
        )
        .unwrap(),
    };

    let outcome = small()
        .leaderboard_plot(&source, "td", None, false)
        .unwrap();

    assert_eq!(source.calls.get(), 1);
    assert!(matches!(outcome, PlotOutcome::Rendered { bars: 1, .. }));
}

#[test]
fn trait_object_sources_are_accepted() {
    let ds = dataset();
    let source: &dyn Leaderboard = &ds;

    let outcome = small().leaderboard_plot(source, "yards", None, false).unwrap();
    assert!(matches!(outcome, PlotOutcome::Rendered { bars: 2, .. }));
}

#[test]
fn unsupported_extension_fails_before_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("yards.pdf");

    let err = small()
        .leaderboard_plot(&dataset(), "yards", Some(&path), false)
        .unwrap_err();

    assert!(matches!(err, StatsError::UnsupportedFormat { .. }));
    assert!(!dir.path().join("nested").exists());
}

#[test]
fn source_errors_propagate() {
    let table = Table::from_rows(
        ["player", "yards"],
        vec![vec!["A".into(), "n/a".into()]],
    )
    .unwrap();

    let err = small()
        .leaderboard_plot(&StatsDataset::new(table), "yards", None, false)
        .unwrap_err();
    assert!(matches!(err, StatsError::NonNumeric { .. }));
}

#[test]
fn non_finite_bars_fail_before_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("charts").join("yards.png");
    let source = FixedBoard {
        calls: Cell::new(0),
        table: Table::from_rows(
            ["rank", "player", "yards"],
            vec![
                vec![1.into(), "A".into(), f64::INFINITY.into()],
                vec![2.into(), "B".into(), 5.into()],
            ],
        )
        .unwrap(),
    };

    let err = small()
        .leaderboard_plot(&source, "yards", Some(&path), false)
        .unwrap_err();

    assert!(matches!(err, StatsError::NonFinite { ref player, .. } if player == "A"));
    assert!(!path.parent().unwrap().exists());
}
