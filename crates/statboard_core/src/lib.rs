//! # statboard_core - Leaderboards from tabular sports statistics
//!
//! Load a stat sheet into a [`Table`], wrap it in a [`StatsDataset`] and ask
//! for a ranked top-N leaderboard of any numeric column, optionally narrowed
//! by season and position. Results are plain tables that the [`Exporter`]
//! writes as CSV or records JSON.
//!
//! ```rust
//! use statboard_core::{Leaderboard, StatsDataset, Table, Value};
//!
//! let table = Table::from_records(vec![
//!     vec![("player", Value::from("A")), ("yards", Value::from(100))],
//!     vec![("player", Value::from("B")), ("yards", Value::from(150))],
//! ]);
//! let board = StatsDataset::new(table).leaderboard("yards").unwrap();
//! assert_eq!(board.value(0, "player"), Some(&Value::from("B")));
//! ```

pub mod dataset;
pub mod error;
pub mod exporter;
pub mod loader;
pub mod table;

pub use dataset::{
    Dataset, Leaderboard, LeaderboardQuery, ScopedLeaderboard, StatsDataset, DEFAULT_TOP_N,
    PLAYER_COLUMN, POSITION_COLUMN, RANK_COLUMN, SEASON_COLUMN,
};
pub use error::{Result, StatsError};
pub use exporter::Exporter;
pub use loader::{load_csv, read_csv};
pub use table::{Records, Table, Value};
