use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Non-numeric value '{value}' in column '{column}' for player '{player}'")]
    NonNumeric {
        column: String,
        player: String,
        value: String,
    },

    #[error("Value in column '{column}' for player '{player}' is not finite")]
    NonFinite { column: String, player: String },

    #[error("Unsupported output format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl StatsError {
    /// Whether retrying with different input (path, config) may succeed.
    /// Data-quality problems in the table itself are not recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StatsError::Io(_) => true,
            StatsError::UnsupportedFormat { .. } => true,
            StatsError::InvalidConfig(_) => true,
            StatsError::NonNumeric { .. } => false,
            StatsError::NonFinite { .. } => false,
            StatsError::RaggedRow { .. } => false,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = StatsError::NonNumeric {
            column: "yards".to_string(),
            player: "A".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Non-numeric value 'lots' in column 'yards' for player 'A'"
        );

        let err = StatsError::RaggedRow {
            row: 3,
            expected: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "Row 3 has 1 values, expected 2");

        let err = StatsError::NonFinite {
            column: "yards".to_string(),
            player: "X".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Value in column 'yards' for player 'X' is not finite"
        );
    }

    #[test]
    fn test_recoverability() {
        let io = StatsError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.is_recoverable());
        assert!(!StatsError::Render("boom".to_string()).is_recoverable());
        assert!(!StatsError::NonNumeric {
            column: "td".to_string(),
            player: "B".to_string(),
            value: "x".to_string(),
        }
        .is_recoverable());
    }
}
