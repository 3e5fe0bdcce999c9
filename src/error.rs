//! Error types for loading tables and building gene-pair records.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a dataset build.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A column the loader depends on is absent from the header row.
    #[error("required column `{column}` not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// A value could not be converted to the type its column requires.
    #[error("{}:{line}: invalid {field} value {value:?}", path.display())]
    InvalidField {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("malformed codon bias literal for {tag}: {reason}")]
    InvalidCodonLiteral { tag: String, reason: String },

    /// GC content is required for both genes of every labeled pair.
    #[error("no GC ratio for gene {gene}")]
    MissingGcRatio { gene: String },
}

pub type Result<T> = std::result::Result<T, Error>;
