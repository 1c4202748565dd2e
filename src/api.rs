use crate::{memory::*, AbortStrategy, CMeansError, Dataset, Termination, Variant};
use std::cell::RefCell;
use rand::prelude::*;
use tracing::warn;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&FuzzyCMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&FuzzyCMeansState<T>, usize, T);

/// Default stopping threshold for the partition delta
pub const DEFAULT_EPSILON: f64 = 0.001;
/// Default fuzziness exponent
pub const DEFAULT_FUZZINESS: f64 = 2.0;
/// Default iteration limit of the default abort strategy
pub const DEFAULT_MAX_ITER: usize = 1000;

/// This is a structure holding various configuration options for a fuzzy c-means calculation, such as
/// the fuzziness exponent, the random number generator to use, or a couple of callbacks, that can be set
/// to get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`FuzzyCMeansConfigBuilder`].
pub struct FuzzyCMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the partition initialization finished
    /// ## Arguments
    /// - **state**: Current [`FuzzyCMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`FuzzyCMeansState`] after computing the new centroids (partition not yet replaced)
    /// - **iteration_id**: Number of the current iteration
    /// - **delta**: Partition delta between the current and the newly computed partition matrix
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy<T>,
    /// Fuzziness exponent (m)
    pub(crate) fuzziness: T,
    /// Update formulas to use
    pub(crate) variant: Variant,
}
impl<'a, T: Primitive> Default for FuzzyCMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            abort_strategy: AbortStrategy::<T>::PartitionDeltaOrMaxIterations {
                epsilon: T::from(DEFAULT_EPSILON).unwrap(),
                max_iter: DEFAULT_MAX_ITER
            },
            fuzziness: T::from(DEFAULT_FUZZINESS).unwrap(),
            variant: Variant::Standard
        }
    }
}
impl<'a, T: Primitive> FuzzyCMeansConfig<'a, T> {
    /// Use the [`FuzzyCMeansConfigBuilder`] to build a [`FuzzyCMeansConfig`] instance.
    pub fn build() -> FuzzyCMeansConfigBuilder<'a, T> {
        FuzzyCMeansConfigBuilder { config: FuzzyCMeansConfig::default() }
    }
    pub fn fuzziness(&self) -> T { self.fuzziness }
    pub fn abort_strategy(&self) -> AbortStrategy<T> { self.abort_strategy }
    pub fn variant(&self) -> Variant { self.variant }
}
impl<'a, T: Primitive> std::fmt::Debug for FuzzyCMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyCMeansConfig")
            .field("abort_strategy", &self.abort_strategy)
            .field("fuzziness", &self.fuzziness)
            .field("variant", &self.variant)
            .finish()
    }
}

pub struct FuzzyCMeansConfigBuilder<'a, T: Primitive> {
    config: FuzzyCMeansConfig<'a, T>
}
impl<'a, T: Primitive> FuzzyCMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the partition initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used for the partition initialization.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the abort-strategy to use during a running calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::PartitionDeltaOrMaxIterations`] `{ epsilon: 0.001, max_iter: 1000 }`
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Replace the epsilon of the currently configured abort-strategy, keeping its kind.
    pub fn epsilon(mut self, epsilon: T) -> Self {
        self.config.abort_strategy = self.config.abort_strategy.with_epsilon(epsilon); self
    }
    /// Set the fuzziness exponent `m`. Values below 1 are replaced by the default of 2.
    pub fn fuzziness(mut self, m: T) -> Self {
        self.config.fuzziness = if m < T::one() {
            let default = T::from(DEFAULT_FUZZINESS).unwrap();
            warn!(requested = %m, used = %default, "fuzziness exponent below 1, using default");
            default
        } else {
            m
        };
        self
    }
    /// Select the update formulas, see [`Variant`].
    /// ## Default
    /// [`Variant::Standard`]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.config.variant = variant; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> FuzzyCMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, leaving the [`Dataset`] untouched.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **n_clusters**: The amount of clusters that were requested
/// - **partition**: Membership degrees [instances x clusters], each row sums to 1
/// - **centroids**: Cluster centers [clusters x attributes]
/// - **iterations**: Amount of completed iterations
/// - **delta**: Partition delta of the last iteration
/// - **termination**: Why the calculation stopped (`None` while still running)
#[derive(Clone, Debug)]
pub struct FuzzyCMeansState<T: Primitive> {
    pub n_clusters: usize,
    pub partition: Matrix<T>,
    pub centroids: Matrix<T>,
    pub iterations: usize,
    pub delta: T,
    pub termination: Option<Termination>,
}
impl<T: Primitive> FuzzyCMeansState<T> {
    pub(crate) fn new(instance_cnt: usize, attribute_cnt: usize, n_clusters: usize) -> Self {
        Self {
            n_clusters,
            partition: Matrix::new(instance_cnt, n_clusters),
            centroids: Matrix::new(n_clusters, attribute_cnt),
            iterations: 0,
            delta: T::infinity(),
            termination: None,
        }
    }

    pub fn converged(&self) -> bool {
        self.termination == Some(Termination::Converged)
    }

    /// Index of the cluster with the highest membership for each instance.
    pub fn hard_assignments(&self) -> Vec<usize> {
        self.partition.iter_rows()
            .map(|row| row.iter().enumerate()
                .fold((0, T::neg_infinity()), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) })
                .0)
            .collect()
    }

    /// Tab separated rendering of the partition matrix, one instance per line.
    pub fn render_partition(&self) -> String {
        self.partition.render()
    }
}
/// Renders the centroid matrix: one centroid per line, every value followed by a tab.
impl<T: Primitive> std::fmt::Display for FuzzyCMeansState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.centroids.render())
    }
}




/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the dataset you want to operate on. The primitive type
/// of the dataset will be the type used internaly for all calculations, as well as the result
/// as stored in the returned [`FuzzyCMeansState`] structure.
///
/// ## Supported variants
/// - Textbook fuzzy c-means [`Variant::Standard`]
/// - Reproduction of the original tool's formulas [`Variant::Legacy`]
///
/// ## Supported initialization methods
/// - Random walk [`FuzzyCMeans::init_random_walk`]
/// - Row-normalized random [`FuzzyCMeans::init_row_normalized`]
/// - Precomputed partition [`FuzzyCMeans::init_precomputed`]
pub struct FuzzyCMeans<'d, T: Primitive> {
    pub(crate) dataset: &'d Dataset<T>,
}
impl<'d, T: Primitive> FuzzyCMeans<'d, T> {
    /// Create a new instance of the [`FuzzyCMeans`] structure, borrowing the dataset.
    pub fn new(dataset: &'d Dataset<T>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset<T> { self.dataset }

    /// Fuzzy c-means clustering.
    ///
    /// ## Arguments
    /// - **n_clusters**: Amount of clusters to search for (at least 1)
    /// - **init**: Initialization-Method to use for the initial partition matrix
    /// - **config**: [`FuzzyCMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`FuzzyCMeansState`], containing the final state (result).
    ///
    /// ## Example
    /// ```rust
    /// use cmeans::*;
    ///
    /// let dataset = Dataset::<f64>::from_reader("0 0\n0 1\n10 10\n10 11\n".as_bytes()).unwrap();
    /// let fcm = FuzzyCMeans::new(&dataset);
    /// let result = fcm.fit(2, FuzzyCMeans::init_random_walk, &FuzzyCMeansConfig::default()).unwrap();
    ///
    /// println!("Centroids:\n{}", result);
    /// println!("Memberships:\n{}", result.render_partition());
    /// ```
    pub fn fit<'a, F>(&self, n_clusters: usize, init: F, config: &FuzzyCMeansConfig<'a, T>) -> Result<FuzzyCMeansState<T>, CMeansError>
                where for<'c> F: FnOnce(&FuzzyCMeans<'d, T>, &mut FuzzyCMeansState<T>, &FuzzyCMeansConfig<'c, T>) -> Result<(), CMeansError> {
        crate::fit::calculate(self, n_clusters, init, config)
    }

    /// Random-walk initialization method
    ///
    /// ## Description
    /// Each membership is drawn at random with a granularity of 0.0001. Rows whose sum overshoots 1 are
    /// walked back down by subtracting random (quantized) amounts from random columns, rows that stay below 1
    /// are filled up in random columns, until every row sums to 1.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to [`FuzzyCMeans::fit`].
    pub fn init_random_walk<'a>(fcm: &FuzzyCMeans<'d, T>, state: &mut FuzzyCMeansState<T>, config: &FuzzyCMeansConfig<'a, T>) -> Result<(), CMeansError> {
        crate::inits::randomwalk::calculate(fcm, state, config)
    }

    /// Row-normalized random initialization method
    ///
    /// ## Description
    /// Each membership is drawn at random with a granularity of 0.0001, then every row is divided by its sum.
    pub fn init_row_normalized<'a>(fcm: &FuzzyCMeans<'d, T>, state: &mut FuzzyCMeansState<T>, config: &FuzzyCMeansConfig<'a, T>) -> Result<(), CMeansError> {
        crate::inits::rownormalized::calculate(fcm, state, config)
    }

    /// Precomputed partition initialization method
    ///
    /// ## Description
    /// Use the given [instances x clusters] matrix as initial partition.
    pub fn init_precomputed(partition: Matrix<T>)
            -> impl FnOnce(&FuzzyCMeans<'d, T>, &mut FuzzyCMeansState<T>, &FuzzyCMeansConfig<'_, T>) -> Result<(), CMeansError> {
        move |fcm: &FuzzyCMeans<'d, T>, state: &mut FuzzyCMeansState<T>, config: &FuzzyCMeansConfig<'_, T>| {
            crate::inits::precomputed::calculate(fcm, state, config, partition)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzziness_below_one_falls_back_to_default() {
        let conf = FuzzyCMeansConfig::<f64>::build().fuzziness(0.5).build();
        assert_eq!(conf.fuzziness(), 2.0);
        let conf = FuzzyCMeansConfig::<f64>::build().fuzziness(1.0).build();
        assert_eq!(conf.fuzziness(), 1.0);
        let conf = FuzzyCMeansConfig::<f32>::build().fuzziness(3.5).build();
        assert_eq!(conf.fuzziness(), 3.5);
    }

    #[test]
    fn default_config() {
        let conf = FuzzyCMeansConfig::<f64>::default();
        assert_eq!(conf.fuzziness(), 2.0);
        assert_eq!(conf.abort_strategy().epsilon(), 0.001);
        assert_eq!(conf.variant(), Variant::Standard);

        let conf = FuzzyCMeansConfig::<f64>::build().epsilon(0.01).build();
        assert_eq!(conf.abort_strategy().epsilon(), 0.01);
    }

    #[test]
    fn hard_assignments_pick_highest_membership() {
        let mut state = FuzzyCMeansState::<f64>::new(3, 1, 2);
        state.partition = Matrix::from_rows(vec![vec![0.9, 0.1], vec![0.2, 0.8], vec![0.5, 0.5]]).unwrap();
        assert_eq!(state.hard_assignments(), vec![0, 1, 0]);
    }

    #[test]
    fn display_renders_centroids() {
        let mut state = FuzzyCMeansState::<f64>::new(1, 2, 2);
        state.centroids = Matrix::from_rows(vec![vec![0.5, 1.0], vec![0.25, 0.0]]).unwrap();
        assert_eq!(state.to_string(), "0.5\t1\t\n0.25\t0\t\n");
    }
}
