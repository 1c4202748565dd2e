use crate::{distance::squared_euclidean, memory::*, CMeansError, Dataset};
use super::weighted_centroids;

pub(crate) struct Legacy;
impl Legacy {
    pub fn centroids<T: Primitive>(dataset: &Dataset<T>, partition: &Matrix<T>, m: T) -> Matrix<T> {
        // numerator is weighted with (u^m)^m, denominator with u^m
        weighted_centroids(dataset, partition, |membership| {
            let weight = membership.powf(m);
            (weight.powf(m), weight)
        })
    }

    pub fn partition<T: Primitive>(dataset: &Dataset<T>, centroids: &Matrix<T>, m: T) -> Result<Matrix<T>, CMeansError> {
        let n_clusters = centroids.rows();
        let exponent = T::one() / (m - T::one());
        let mut partition = Matrix::new(dataset.instance_cnt(), n_clusters);
        // Shared by every cell of this update, never reset
        let mut accumulator = T::zero();

        for (instance, memberships) in dataset.instances().zip(partition.iter_rows_mut()) {
            let mut overlaps: Option<Vec<bool>> = None;
            let mut overlap_cnt = 0usize;

            for (ci, centroid) in centroids.iter_rows().enumerate() {
                let numerator = squared_euclidean(instance, centroid)?;
                if numerator == T::zero() {
                    overlaps.get_or_insert_with(|| vec![false; n_clusters])[ci] = true;
                    overlap_cnt += 1;
                }
                if overlaps.is_none() {
                    for other in centroids.iter_rows() {
                        accumulator += (numerator / squared_euclidean(instance, other)?).powf(exponent);
                    }
                }
                memberships[ci] = accumulator.recip();
            }

            if let Some(overlaps) = overlaps {
                let share = T::from(1 / overlap_cnt).unwrap();
                memberships.iter_mut()
                    .zip(overlaps)
                    .for_each(|(u, hit)| *u = if hit { share } else { T::zero() });
            }
        }
        Ok(partition)
    }
}
