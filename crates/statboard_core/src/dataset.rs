//! Stats dataset and leaderboard queries
//!
//! Pipeline per query:
//! 1. column check (`player` and the stat must exist, otherwise empty result)
//! 2. season filter, then position filter (each skipped when its column is absent)
//! 3. sum the stat per player in first-seen order
//! 4. stable sort descending, truncate to `top_n`, number ranks 1..K

use crate::error::{Result, StatsError};
use crate::exporter::Exporter;
use crate::table::{Table, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const PLAYER_COLUMN: &str = "player";
pub const POSITION_COLUMN: &str = "position";
pub const SEASON_COLUMN: &str = "season";
pub const RANK_COLUMN: &str = "rank";

pub const DEFAULT_TOP_N: usize = 10;

/// Anything that can produce a leaderboard for a stat with default filters.
///
/// This is the only capability the renderer needs from its source.
pub trait Leaderboard {
    fn leaderboard(&self, stat: &str) -> Result<Table>;
}

/// A full dataset: leaderboard capability plus a copy of the underlying table.
pub trait Dataset: Leaderboard {
    /// Copy of the underlying table; mutating it never affects the dataset.
    fn table(&self) -> Table;
}

impl<T: Leaderboard + ?Sized> Leaderboard for &T {
    fn leaderboard(&self, stat: &str) -> Result<Table> {
        (**self).leaderboard(stat)
    }
}

/// Parameters of a leaderboard query
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardQuery {
    pub stat: String,
    pub position: Option<String>,
    pub season: Option<i64>,
    pub top_n: usize,
}

impl LeaderboardQuery {
    /// Query for `stat` with no filters and the default top 10
    pub fn new(stat: impl Into<String>) -> Self {
        Self {
            stat: stat.into(),
            position: None,
            season: None,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn season(mut self, season: i64) -> Self {
        self.season = Some(season);
        self
    }

    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Tabular stats with leaderboard queries and export delegation
#[derive(Debug, Clone)]
pub struct StatsDataset {
    table: Table,
    exporter: Exporter,
}

impl StatsDataset {
    /// Take ownership of `table`. Callers keeping their own copy should clone first.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            exporter: Exporter::new(),
        }
    }

    /// Copy `table` so later changes to the caller's table are not seen here.
    pub fn from_table(table: &Table) -> Self {
        Self::new(table.clone())
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Run a leaderboard query.
    ///
    /// # Returns
    ///
    /// * `Ok(Table)` with columns `rank`, `player`, `<stat>`; a table without
    ///   columns when `player` or the stat column is missing
    /// * `Err(StatsError::NonNumeric)` when a stat cell holds text
    pub fn query(&self, query: &LeaderboardQuery) -> Result<Table> {
        let stat = query.stat.as_str();
        let (Some(player_idx), Some(stat_idx)) = (
            self.table.column_index(PLAYER_COLUMN),
            self.table.column_index(stat),
        ) else {
            log::warn!("leaderboard: missing '{}' or '{}' column", PLAYER_COLUMN, stat);
            return Ok(Table::empty());
        };

        let season_idx = query
            .season
            .and_then(|season| Some((self.table.column_index(SEASON_COLUMN)?, season)));
        let position_idx = query.position.as_deref().and_then(|position| {
            Some((
                self.table.column_index(POSITION_COLUMN)?,
                position.to_uppercase(),
            ))
        });

        let rows = self.table.rows().iter().filter(|row| {
            if let Some((idx, season)) = season_idx {
                if row[idx].as_i64() != Some(season) {
                    return false;
                }
            }
            if let Some((idx, position)) = &position_idx {
                match row[*idx].as_str() {
                    Some(value) if value.to_uppercase() == *position => {}
                    _ => return false,
                }
            }
            true
        });

        let mut totals = aggregate(rows, player_idx, stat_idx, stat)?;

        // Stable: equal totals keep first-seen order
        totals.sort_by(|a, b| b.total.compare(&a.total));
        totals.truncate(query.top_n);

        let mut out = Table::new([RANK_COLUMN, PLAYER_COLUMN, stat]);
        for (i, entry) in totals.into_iter().enumerate() {
            out.push_row(vec![
                Value::Int(i as i64 + 1),
                entry.player,
                entry.total.into_value(),
            ])?;
        }

        Ok(out)
    }

    /// Bind filters and size to this dataset; the stat is supplied per call.
    ///
    /// The returned view implements [`Leaderboard`], so filtered boards can be
    /// handed to anything that consumes the capability.
    pub fn scoped(&self, query: LeaderboardQuery) -> ScopedLeaderboard<'_> {
        ScopedLeaderboard {
            dataset: self,
            query,
        }
    }

    /// Export the full table as CSV
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.exporter.to_csv(&self.table, path)
    }

    /// Export the full table as records JSON
    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.exporter.to_json(&self.table, path)
    }
}

impl Leaderboard for StatsDataset {
    fn leaderboard(&self, stat: &str) -> Result<Table> {
        self.query(&LeaderboardQuery::new(stat))
    }
}

impl Dataset for StatsDataset {
    fn table(&self) -> Table {
        self.table.clone()
    }
}

/// A dataset with fixed season/position/top-N filters
#[derive(Debug, Clone)]
pub struct ScopedLeaderboard<'a> {
    dataset: &'a StatsDataset,
    query: LeaderboardQuery,
}

impl ScopedLeaderboard<'_> {
    pub fn query(&self) -> &LeaderboardQuery {
        &self.query
    }
}

impl Leaderboard for ScopedLeaderboard<'_> {
    fn leaderboard(&self, stat: &str) -> Result<Table> {
        self.dataset.query(&LeaderboardQuery {
            stat: stat.to_string(),
            ..self.query.clone()
        })
    }
}

impl From<Table> for StatsDataset {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Running sum that stays integral until a float (or overflow) shows up
#[derive(Debug, Clone, Copy, PartialEq)]
enum Total {
    Int(i64),
    Float(f64),
}

impl Total {
    fn add(self, value: &Value) -> std::result::Result<Self, AddError> {
        let sum = match (self, value) {
            (total, Value::Null) => total,
            (Total::Int(a), Value::Int(b)) => match a.checked_add(*b) {
                Some(sum) => Total::Int(sum),
                None => Total::Float(a as f64 + *b as f64),
            },
            (Total::Int(a), Value::Float(b)) => Total::Float(a as f64 + b),
            (Total::Float(a), Value::Int(b)) => Total::Float(a + *b as f64),
            (Total::Float(a), Value::Float(b)) => Total::Float(a + b),
            (_, Value::Text(_)) => return Err(AddError::NonNumeric),
        };
        match sum {
            Total::Float(v) if !v.is_finite() => Err(AddError::NonFinite),
            sum => Ok(sum),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Total::Int(a), Total::Int(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Total::Int(v) => *v as f64,
            Total::Float(v) => *v,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Total::Int(v) => Value::Int(v),
            Total::Float(v) => Value::Float(v),
        }
    }
}

enum AddError {
    NonNumeric,
    NonFinite,
}

struct PlayerTotal {
    player: Value,
    total: Total,
}

/// Sum `stat_idx` per player in first-seen order. Rows without a player are dropped.
fn aggregate<'a, I>(rows: I, player_idx: usize, stat_idx: usize, stat: &str) -> Result<Vec<PlayerTotal>>
where
    I: Iterator<Item = &'a Vec<Value>>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<PlayerTotal> = Vec::new();

    for row in rows {
        let player = &row[player_idx];
        if player.is_null() {
            continue;
        }

        // Key carries the variant so Int(1) and Text("1") stay distinct players
        let key = match player {
            Value::Text(s) => format!("t:{}", s),
            other => format!("n:{}", other),
        };
        let slot = *slots.entry(key).or_insert_with(|| {
            totals.push(PlayerTotal {
                player: player.clone(),
                total: Total::Int(0),
            });
            totals.len() - 1
        });

        let entry = &mut totals[slot];
        entry.total = entry.total.add(&row[stat_idx]).map_err(|err| match err {
            AddError::NonNumeric => StatsError::NonNumeric {
                column: stat.to_string(),
                player: player.to_string(),
                value: row[stat_idx].to_string(),
            },
            AddError::NonFinite => StatsError::NonFinite {
                column: stat.to_string(),
                player: player.to_string(),
            },
        })?;
    }

    Ok(totals)
}
