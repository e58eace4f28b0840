use statboard_core::{
    load_csv, Dataset, Exporter, Leaderboard, LeaderboardQuery, StatsDataset, Table, Value,
};
use tempfile::tempdir;

fn sheet() -> StatsDataset {
    let data = "\
player,position,season,yards,rating
Allen,QB,2024,4306,101.4
Mahomes,QB,2024,3928,93.5
Henry,RB,2024,1921,
Allen,QB,2023,4544,92.2
Jackson,qb,2024,4172,119.6
\"Smith, Jr.\",WR,2024,1200,88.0
";
    StatsDataset::new(statboard_core::read_csv(data.as_bytes()).unwrap())
}

#[test]
fn csv_export_reloads_to_the_same_leaderboard() {
    let dir = tempdir().unwrap();
    let board = sheet().leaderboard("yards").unwrap();

    let path = Exporter::new().to_csv(&board, dir.path().join("yards.csv")).unwrap();
    let reloaded = load_csv(&path).unwrap();

    assert_eq!(reloaded, board);
}

#[test]
fn csv_round_trip_keeps_float_sums() {
    let dir = tempdir().unwrap();
    let board = sheet()
        .query(&LeaderboardQuery::new("rating").season(2024))
        .unwrap();
    assert_eq!(board.value(0, "rating"), Some(&Value::Float(119.6)));

    let path = Exporter::new().to_csv(&board, dir.path().join("rating.csv")).unwrap();
    assert_eq!(load_csv(&path).unwrap(), board);
}

#[test]
fn json_export_has_one_record_per_row() {
    let dir = tempdir().unwrap();
    let board = sheet()
        .query(&LeaderboardQuery::new("yards").position("QB").season(2024).top_n(2))
        .unwrap();

    let path = Exporter::new().to_json(&board, dir.path().join("out").join("qb.json")).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();

    assert_eq!(records.len(), board.row_count());
    assert_eq!(
        records[0],
        serde_json::json!({"rank": 1, "player": "Allen", "yards": 4306})
    );
    assert_eq!(
        records[1],
        serde_json::json!({"rank": 2, "player": "Jackson", "yards": 4172})
    );
}

#[test]
fn json_keys_follow_column_order() {
    let board = sheet().query(&LeaderboardQuery::new("yards").top_n(1)).unwrap();

    let mut out = Vec::new();
    Exporter::new().write_json(&board, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        r#"[{"rank":1,"player":"Allen","yards":8850}]"#
    );
}

#[test]
fn dataset_exports_full_table() {
    let dir = tempdir().unwrap();
    let ds = sheet();

    let csv_path = ds.export_csv(dir.path().join("all.csv")).unwrap();
    let json_path = ds.export_json(dir.path().join("all.json")).unwrap();

    assert_eq!(load_csv(&csv_path).unwrap(), ds.table());

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(records.len(), 6);
    assert!(records[2]["rating"].is_null());
}

#[test]
fn empty_leaderboard_exports_cleanly() {
    let dir = tempdir().unwrap();
    let board = sheet().leaderboard("sacks").unwrap();
    assert_eq!(board, Table::empty());

    let csv_path = Exporter::new().to_csv(&board, dir.path().join("e.csv")).unwrap();
    let json_path = Exporter::new().to_json(&board, dir.path().join("e.json")).unwrap();

    assert_eq!(std::fs::read_to_string(csv_path).unwrap(), "");
    assert_eq!(std::fs::read_to_string(json_path).unwrap(), "[]");
}

#[test]
fn unwritable_target_is_an_io_error() {
    let dir = tempdir().unwrap();
    // A regular file where a directory is expected
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let board = sheet().leaderboard("yards").unwrap();
    let err = Exporter::new()
        .to_csv(&board, blocker.join("board.csv"))
        .unwrap_err();

    assert!(matches!(err, statboard_core::StatsError::Io(_)));
}
