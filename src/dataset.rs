use crate::{error::DatasetError, memory::*};
use std::{fs::File, io::{BufRead, BufReader}, path::Path};
use tracing::{debug, warn};

/// Immutable, normalized numeric dataset.
///
/// Rows are instances, columns are attributes. On construction, every column is divided by
/// its own maximum value. Columns whose maximum is zero or not finite are divided anyway
/// (yielding NaN / infinite values), a warning is logged for them.
#[derive(Clone, Debug)]
pub struct Dataset<T: Primitive> {
    matrix: Matrix<T>,
}
impl<T: Primitive> Dataset<T> {
    /// Parse a whitespace separated dataset, one instance per line.
    ///
    /// Lines starting with `#` or `//` (after trimming) are comments, blank lines are skipped.
    /// The first instance line determines the amount of attributes.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DatasetError> {
        let mut data = Vec::new();
        let mut attribute_cnt = None;
        let mut instance_cnt = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_nr = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
                continue;
            }

            let mut values = 0;
            for (tidx, token) in trimmed.split_whitespace().enumerate() {
                let value = token.parse::<f64>().ok()
                    .and_then(|v| T::from(v))
                    .ok_or_else(|| DatasetError::InvalidValue { line: line_nr, attribute: tidx + 1, content: line.clone() })?;
                data.push(value);
                values += 1;
            }
            match attribute_cnt {
                None => attribute_cnt = Some(values),
                Some(expected) if expected != values => {
                    return Err(DatasetError::InconsistentRow { line: line_nr, expected, actual: values });
                }
                _ => {}
            }
            instance_cnt += 1;
        }

        let attribute_cnt = attribute_cnt.ok_or(DatasetError::Empty)?;
        debug!(instances = instance_cnt, attributes = attribute_cnt, "parsed dataset");
        Self::from_matrix(Matrix::from_vec(data, instance_cnt, attribute_cnt)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Take over a raw matrix and normalize its columns.
    /// A matrix without instances or without attributes is rejected.
    pub fn from_matrix(mut matrix: Matrix<T>) -> Result<Self, DatasetError> {
        Self::check_shape(&matrix)?;
        for col in 0..matrix.cols() {
            let maximum = matrix.column(col).fold(T::neg_infinity(), |m, v| if v > m { v } else { m });
            if maximum == T::zero() || !maximum.is_finite() {
                warn!(column = col, %maximum, "column maximum is degenerate, normalization yields non-finite values");
            }
            matrix.iter_rows_mut().for_each(|row| row[col] = row[col] / maximum);
        }
        Ok(Self { matrix })
    }

    /// Wrap a matrix that is already normalized.
    pub fn from_normalized(matrix: Matrix<T>) -> Result<Self, DatasetError> {
        Self::check_shape(&matrix)?;
        Ok(Self { matrix })
    }

    fn check_shape(matrix: &Matrix<T>) -> Result<(), DatasetError> {
        if matrix.rows() == 0 || matrix.cols() == 0 {
            return Err(DatasetError::Empty);
        }
        Ok(())
    }

    pub fn instance_cnt(&self) -> usize { self.matrix.rows() }
    pub fn attribute_cnt(&self) -> usize { self.matrix.cols() }

    /// Attribute vector of one instance.
    pub fn instance(&self, idx: usize) -> &[T] { self.matrix.row(idx) }

    pub fn instances(&self) -> std::slice::ChunksExact<'_, T> { self.matrix.iter_rows() }

    pub fn matrix(&self) -> &Matrix<T> { &self.matrix }
}
impl<T: Primitive> std::fmt::Display for Dataset<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.matrix.render())
    }
}
