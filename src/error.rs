//! Error types for dataset loading and the clustering run.

use thiserror::Error;

/// Errors that can occur while building a [`Dataset`](crate::Dataset).
///
/// Line numbers are 1-based and count every physical line of the input, comments included.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The underlying reader failed.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// No instance lines were found.
    #[error("dataset contains no instances")]
    Empty,

    /// A token could not be parsed as a number.
    #[error("invalid value for numeric attribute {attribute} on line {line}:\n{content}")]
    InvalidValue {
        line: usize,
        /// 1-based position of the offending token within the line
        attribute: usize,
        content: String,
    },

    /// A line has a different number of attributes than the first instance line.
    #[error("invalid number of attributes on line {line}, expected {expected} but found {actual}")]
    InconsistentRow { line: usize, expected: usize, actual: usize },

    /// A matrix built from in-memory rows is not rectangular.
    #[error("row {row} has {actual} values, expected {expected}")]
    Ragged { row: usize, expected: usize, actual: usize },
}

/// Errors that can occur during a fuzzy c-means run.
#[derive(Debug, Error)]
pub enum CMeansError {
    /// Two vectors of different length were passed to the distance computation.
    #[error("incompatible dimensions in squared norm: {expected} != {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A run was requested with zero clusters.
    #[error("number of clusters must be at least 1")]
    NoClusters,

    /// A precomputed partition matrix does not match instances x clusters.
    #[error("partition matrix must be {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    PartitionShape { expected_rows: usize, expected_cols: usize, rows: usize, cols: usize },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl CMeansError {
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
