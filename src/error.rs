//! Error types for loading seeds and configuring a run.
//!
//! The generation step itself cannot fail; coordinates outside the field
//! are a bug in the caller and panic instead.

use thiserror::Error;

/// Malformed seed data handed to one of the loaders in [`crate::load`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}, column {column}: unexpected marker {found:?}, expected '.' or '#'")]
    InvalidMarker {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("line {line} has {len} cells but the field is {width} wide")]
    RowTooLong { line: usize, len: usize, width: usize },

    #[error("seed has {rows} rows but the field is {height} high")]
    TooManyRows { rows: usize, height: usize },

    #[error("cell ({row}, {col}) lies outside the {height}x{width} field")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}

/// Main error type for life_term operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Seed data rejected by a loader
    #[error("Seed error: {0}")]
    Load(#[from] LoadError),

    /// Reading the seed or drawing to the terminal failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Command line values out of range
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
