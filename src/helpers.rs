use crate::memory::*;

/// Quantize a value in [0, 1) down to steps of 0.0001.
#[inline(always)]
pub(crate) fn quantize<T: Primitive>(v: T) -> T {
    let steps = T::from(10_000).unwrap();
    (v * steps).floor() / steps
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use crate::{Dataset, Matrix, Primitive};

	/// Four points forming two well separated groups: (0,0),(0,1) and (10,10),(10,11).
	pub fn two_groups<T: Primitive>() -> Dataset<T> {
		let raw = [[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
		let rows = raw.iter()
			.map(|r| r.iter().map(|&v| T::from(v).unwrap()).collect())
			.collect();
		Dataset::from_matrix(Matrix::from_rows(rows).unwrap()).unwrap()
	}

	pub fn assert_rows_sum_to_one<T: Primitive>(partition: &Matrix<T>, tol: T) {
		for (idx, row) in partition.iter_rows().enumerate() {
			let sum: T = row.iter().cloned().sum();
			if (sum - T::one()).abs() > tol {
				panic!("row {} sums to {} instead of 1: {:?}", idx, sum, row);
			}
			for &v in row {
				assert!(v >= T::zero() && v <= T::one(), "row {} has entry {} outside [0,1]", idx, v);
			}
		}
	}
}
