use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no benign_traffic.csv in {}", .0.display())]
    MissingBenign(PathBuf),

    #[error("column schema of {file} does not match benign_traffic.csv")]
    SchemaMismatch { file: String },

    #[error("non-numeric value {value:?} in {file}, row {row}, column {column}")]
    NonNumeric {
        file: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("cumulative explained variance never exceeds {target}; lower the variance target")]
    VarianceTarget { target: f64 },

    #[error("model not fitted: call fit() first")]
    NotFitted,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("plot rendering failed: {0}")]
    Plot(String),
}
