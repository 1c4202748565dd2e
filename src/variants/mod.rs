mod standard;
mod legacy;

pub(crate) use standard::Standard;
pub(crate) use legacy::Legacy;

use crate::{memory::*, CMeansError, Dataset};
use tracing::warn;

/// Update formulas used by the fit loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Variant {
    /// Textbook fuzzy c-means.
    /// - centroid: `Σ u^m x / Σ u^m`
    /// - membership: `(Σ_j (d_i / d_j)^(1/(m-1)))^-1`, with a fresh sum for each cluster. Instances
    ///   that coincide with one or more centroids split their membership equally among those.
    #[default]
    Standard,
    /// Reproduces the formulas of the original c-means tool, bit for bit.
    /// - centroid: the numerator weights with `(u^m)^m` while the denominator uses `u^m`
    /// - membership: the reciprocal-sum accumulator is never reset during one partition update,
    ///   so later clusters and instances see the contributions of all earlier ones
    /// - coinciding instances split membership with integer division (`1 / count`), so a tie
    ///   between two or more centroids yields 0 everywhere
    ///
    /// Rows of the resulting partition matrix do not sum to 1 in general.
    Legacy,
}
impl Variant {
    /// Compute the centroid matrix [clusters x attributes] from the given partition matrix.
    ///
    /// Clusters whose membership column is all zero are not guarded, their centroid becomes NaN.
    pub fn centroids<T: Primitive>(&self, dataset: &Dataset<T>, partition: &Matrix<T>, m: T) -> Matrix<T> {
        let centroids = match self {
            Variant::Standard => Standard::centroids(dataset, partition, m),
            Variant::Legacy => Legacy::centroids(dataset, partition, m),
        };
        for (idx, centroid) in centroids.iter_rows().enumerate() {
            if centroid.iter().any(|v| !v.is_finite()) {
                warn!(cluster = idx, "centroid is not finite, membership column sums to zero");
            }
        }
        centroids
    }

    /// Compute a new partition matrix [instances x clusters] from the given centroids.
    pub fn partition<T: Primitive>(&self, dataset: &Dataset<T>, centroids: &Matrix<T>, m: T) -> Result<Matrix<T>, CMeansError> {
        match self {
            Variant::Standard => Standard::partition(dataset, centroids, m),
            Variant::Legacy => Legacy::partition(dataset, centroids, m),
        }
    }
}

/// Shared centroid computation. **weights** maps a membership degree to
/// `(numerator_weight, denominator_weight)`.
#[inline(always)]
pub(crate) fn weighted_centroids<T: Primitive>(dataset: &Dataset<T>, partition: &Matrix<T>, weights: impl Fn(T) -> (T, T)) -> Matrix<T> {
    let mut centroids = Matrix::new(partition.cols(), dataset.attribute_cnt());
    for ci in 0..partition.cols() {
        let centroid = centroids.row_mut(ci);
        let mut denominator = T::zero();
        dataset.instances()
            .zip(partition.column(ci))
            .for_each(|(instance, membership)| {
                let (num_weight, den_weight) = weights(membership);
                denominator += den_weight;
                centroid.iter_mut()
                    .zip(instance.iter().cloned())
                    .for_each(|(cv, sv)| *cv += sv * num_weight);
            });
        centroid.iter_mut().for_each(|cv| *cv = *cv / denominator);
    }
    centroids
}
