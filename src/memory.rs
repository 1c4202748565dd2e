use crate::error::DatasetError;
use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign},
};

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> + for<'a> Sub<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// Dense, row-major matrix with a fixed shape.
///
/// Used for the dataset, the partition matrix (instances x clusters) and the centroid
/// matrix (clusters x attributes). The shape is validated once on construction; all
/// accessors afterwards rely on `data.len() == rows * cols`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T: Primitive> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}
impl<T: Primitive> Matrix<T> {
    /// Zero-filled matrix of the given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![T::zero(); rows * cols] }
    }

    /// Build a matrix from a flat row-major vector. Rows without any column are rejected.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self, DatasetError> {
        if cols == 0 && rows > 0 {
            return Err(DatasetError::Empty);
        }
        if data.len() != rows * cols {
            return Err(DatasetError::Ragged { row: data.len() / cols.max(1), expected: cols, actual: data.len() % cols.max(1) });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested rows. Every row must have the length of the first one.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, DatasetError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(DatasetError::Ragged { row: idx, expected: cols, actual: row.len() });
            }
            data.extend_from_slice(row);
        }
        if cols == 0 && !rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    pub fn row(&self, idx: usize) -> &[T] {
        &self.data[idx * self.cols..(idx + 1) * self.cols]
    }
    pub fn row_mut(&mut self, idx: usize) -> &mut [T] {
        &mut self.data[idx * self.cols..(idx + 1) * self.cols]
    }

    /// Iterate over all rows, in order.
    pub fn iter_rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.cols.max(1))
    }
    pub fn iter_rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(self.cols.max(1))
    }

    /// Iterate over one column, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = T> + '_ {
        self.data.iter().skip(idx).step_by(self.cols.max(1)).cloned()
    }

    pub fn set_row_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.row_mut(idx).iter_mut()
            .zip(src)
            .for_each(|(c, s)| *c = s);
    }

    pub fn as_slice(&self) -> &[T] { &self.data }
    pub fn into_vec(self) -> Vec<T> { self.data }

    /// Render as tab separated text, one row per line. Every value is followed by a tab.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in self.iter_rows() {
            for v in row {
                out.push_str(&format!("{}\t", v));
            }
            out.push('\n');
        }
        out
    }
}
impl<T: Primitive> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.data[r * self.cols + c]
    }
}
impl<T: Primitive> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        &mut self.data[r * self.cols + c]
    }
}
