use crate::{distance::squared_euclidean, memory::*, CMeansError, Dataset};
use super::weighted_centroids;

pub(crate) struct Standard;
impl Standard {
    pub fn centroids<T: Primitive>(dataset: &Dataset<T>, partition: &Matrix<T>, m: T) -> Matrix<T> {
        weighted_centroids(dataset, partition, |membership| {
            let weight = membership.powf(m);
            (weight, weight)
        })
    }

    pub fn partition<T: Primitive>(dataset: &Dataset<T>, centroids: &Matrix<T>, m: T) -> Result<Matrix<T>, CMeansError> {
        let n_clusters = centroids.rows();
        let exponent = T::one() / (m - T::one());
        let mut partition = Matrix::new(dataset.instance_cnt(), n_clusters);
        let mut distances = vec![T::zero(); n_clusters];

        for (instance, memberships) in dataset.instances().zip(partition.iter_rows_mut()) {
            for (d, centroid) in distances.iter_mut().zip(centroids.iter_rows()) {
                *d = squared_euclidean(instance, centroid)?;
            }

            let overlaps = distances.iter().filter(|&&d| d == T::zero()).count();
            if overlaps > 0 {
                // Instance coincides with one or more centroids: split equally among those
                let share = T::one() / T::from(overlaps).unwrap();
                memberships.iter_mut()
                    .zip(distances.iter().cloned())
                    .for_each(|(u, d)| *u = if d == T::zero() { share } else { T::zero() });
                continue;
            }

            for (u, di) in memberships.iter_mut().zip(distances.iter().cloned()) {
                let sum: T = distances.iter().cloned()
                    .map(|dj| (di / dj).powf(exponent))
                    .sum();
                *u = sum.recip();
            }
        }
        Ok(partition)
    }
}
