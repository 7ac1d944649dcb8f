//! Error types for loading and normalizing trip data.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("row {row}: unparseable start time {value:?}")]
    MalformedTimestamp { row: usize, value: String },

    #[error("row {row}: invalid trip duration {value:?}")]
    MalformedDuration { row: usize, value: String },

    #[error("row {row}: invalid birth year {value:?}")]
    MalformedBirthYear { row: usize, value: String },

    #[error("required column {column:?} is missing")]
    MissingColumn { column: &'static str },

    #[error("unknown city {city:?}")]
    UnknownCity { city: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl TripError {
    /// Returns true for errors confined to a single source row.
    pub fn is_row_error(&self) -> bool {
        match self {
            TripError::MalformedTimestamp { .. }
            | TripError::MalformedDuration { .. }
            | TripError::MalformedBirthYear { .. } => true,
            TripError::Csv(e) => !e.is_io_error(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TripError>;
