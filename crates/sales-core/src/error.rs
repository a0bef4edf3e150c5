use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`SalesError`]. Load and parse errors abort the
/// load; an empty selection only replaces the filtered views with a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input file is missing or unreadable.
    Load,
    /// A row or the header does not match the expected format.
    Parse,
    /// The user has not selected any article.
    EmptySelection,
}

/// All errors produced by the bakery sales dashboard.
#[derive(Error, Debug)]
pub enum SalesError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A date string did not match any accepted calendar-date format.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// A unit price did not match the `<digits>[,<digits>] €` pattern.
    #[error("Invalid unit price: {0:?}")]
    InvalidPrice(String),

    /// A quantity was not a non-negative number.
    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),

    /// A record carried an empty article name.
    #[error("Empty article name")]
    EmptyArticle,

    /// A value-level error located at a data line of the input file.
    #[error("Line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: Box<SalesError>,
    },

    /// No article is selected, so filtered views have nothing to show.
    #[error("No article selected")]
    EmptySelection,

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SalesError {
    /// Attach a 1-based data line number to a value-level error.
    pub fn at_line(self, line: u64) -> Self {
        SalesError::Row {
            line,
            source: Box::new(self),
        }
    }

    /// Classify this error into the dashboard's error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SalesError::FileRead { .. } | SalesError::Io(_) => ErrorKind::Load,
            SalesError::Csv(e) if e.is_io_error() => ErrorKind::Load,
            SalesError::Csv(_)
            | SalesError::MissingColumn(_)
            | SalesError::InvalidDate(_)
            | SalesError::InvalidPrice(_)
            | SalesError::InvalidQuantity(_)
            | SalesError::EmptyArticle => ErrorKind::Parse,
            SalesError::Row { source, .. } => source.kind(),
            SalesError::EmptySelection => ErrorKind::EmptySelection,
        }
    }
}

/// Convenience alias used throughout the sales crates.
pub type Result<T> = std::result::Result<T, SalesError>;
