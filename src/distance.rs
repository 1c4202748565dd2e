use crate::{error::CMeansError, memory::*};

/// Squared euclidean distance `||a - b||²`.
///
/// Fails with [`CMeansError::DimensionMismatch`] if the vectors differ in length.
#[inline(always)]
pub fn squared_euclidean<T: Primitive>(a: &[T], b: &[T]) -> Result<T, CMeansError> {
    if a.len() != b.len() {
        return Err(CMeansError::dimension_mismatch(a.len(), b.len()));
    }
    Ok(a.iter().zip(b.iter())
        .map(|(&av, &bv)| av - bv)  // <a> - <b>
        .map(|v| v * v)             // <vec_components> ^2
        .sum())
}
