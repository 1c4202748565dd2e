use crate::{abort_strategy::partition_delta, memory::*, CMeansError, FuzzyCMeans, FuzzyCMeansConfig, FuzzyCMeansState, Termination};
use tracing::{debug, info, warn};

#[inline(always)] pub(crate) fn calculate<'d, 'a, T, F>(fcm: &FuzzyCMeans<'d, T>, n_clusters: usize, init: F, config: &FuzzyCMeansConfig<'a, T>)
            -> Result<FuzzyCMeansState<T>, CMeansError>
            where T: Primitive,
                  for<'c> F: FnOnce(&FuzzyCMeans<'d, T>, &mut FuzzyCMeansState<T>, &FuzzyCMeansConfig<'c, T>) -> Result<(), CMeansError> {
    if n_clusters == 0 {
        return Err(CMeansError::NoClusters);
    }
    let dataset = fcm.dataset;
    let (m, variant) = (config.fuzziness, config.variant);
    let mut state = FuzzyCMeansState::new(dataset.instance_cnt(), dataset.attribute_cnt(), n_clusters);

    // Initialize partition and notify subscriber
    init(fcm, &mut state, config)?;
    (config.init_done)(&state);
    debug!(instances = dataset.instance_cnt(), clusters = n_clusters, ?variant, "partition initialized");
    let mut abort_strategy = config.abort_strategy.create_logic();

    let mut iteration = 0;
    loop {
        iteration += 1;
        state.centroids = variant.centroids(dataset, &state.partition, m);
        let partition = variant.partition(dataset, &state.centroids, m)?;
        debug!(iteration, "generated new partition matrix");
        let delta = partition_delta(&state.partition, &partition);

        // Notify subscriber about finished iteration
        (config.iteration_done)(&state, iteration, delta);
        state.partition = partition;
        state.delta = delta;
        state.iterations = iteration;
        if let Some(termination) = abort_strategy.next(delta, iteration) {
            state.termination = Some(termination);
            break;
        }
    }

    match state.termination {
        Some(Termination::MaxIterations) =>
            warn!(iterations = state.iterations, delta = %state.delta, "iteration limit reached before convergence"),
        _ => info!(iterations = state.iterations, delta = %state.delta, "fuzzy c-means converged"),
    }
    Ok(state)
}


#[cfg(test)]
mod tests {
    use crate::*;
    use crate::helpers::testing::*;
    use rand::prelude::*;
    use std::cell::Cell;

    fn seeded<'a, T: Primitive>(seed: u64) -> FuzzyCMeansConfig<'a, T> {
        FuzzyCMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build()
    }

    #[test] fn two_groups_random_walk_f64() { two_groups_are_separated::<f64>(false, 1); }
    #[test] fn two_groups_random_walk_f32() { two_groups_are_separated::<f32>(false, 2); }
    #[test] fn two_groups_row_normalized_f64() { two_groups_are_separated::<f64>(true, 3); }

    fn two_groups_are_separated<T: Primitive>(row_normalized: bool, seed: u64) {
        let dataset = two_groups::<T>();
        let fcm = FuzzyCMeans::new(&dataset);
        let conf = FuzzyCMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(seed))
            .epsilon(T::from(1e-5).unwrap())
            .build();
        let res = if row_normalized {
            fcm.fit(2, FuzzyCMeans::init_row_normalized, &conf)
        } else {
            fcm.fit(2, FuzzyCMeans::init_random_walk, &conf)
        }.unwrap();

        assert!(res.converged());
        assert!(res.iterations >= 1);
        assert_eq!((res.centroids.rows(), res.centroids.cols()), (2, 2));
        assert_rows_sum_to_one(&res.partition, T::from(1e-4).unwrap());

        // Cluster order depends on the initialization
        let (low, high) = if res.centroids[(0, 0)] < res.centroids[(1, 0)] { (0, 1) } else { (1, 0) };
        let tol = T::from(0.05).unwrap();
        assert_approx_eq!(res.centroids[(low, 0)], T::zero(), tol);
        assert_approx_eq!(res.centroids[(low, 1)], T::from(0.5 / 11.0).unwrap(), tol);
        assert_approx_eq!(res.centroids[(high, 0)], T::one(), tol);
        assert_approx_eq!(res.centroids[(high, 1)], T::from(10.5 / 11.0).unwrap(), tol);

        let strong = T::from(0.9).unwrap();
        for instance in 0..2 {
            assert!(res.partition[(instance, low)] > strong);
        }
        for instance in 2..4 {
            assert!(res.partition[(instance, high)] > strong);
        }
        assert_eq!(res.hard_assignments(), vec![low, low, high, high]);
    }

    #[test]
    fn single_cluster_converges_in_one_iteration() {
        let dataset = two_groups::<f64>();
        let fcm = FuzzyCMeans::new(&dataset);
        let res = fcm.fit(1, FuzzyCMeans::init_random_walk, &seeded(5)).unwrap();

        assert!(res.converged());
        assert_eq!(res.iterations, 1);
        assert_eq!(res.delta, 0.0);
        assert!(res.partition.as_slice().iter().all(|&u| u == 1.0));
        assert_approx_eq!(res.centroids[(0, 0)], 0.5, 1e-12);
        assert_approx_eq!(res.centroids[(0, 1)], 0.5, 1e-12);
    }

    #[test]
    fn zero_clusters_is_rejected() {
        let dataset = two_groups::<f64>();
        let fcm = FuzzyCMeans::new(&dataset);
        assert!(matches!(fcm.fit(0, FuzzyCMeans::init_random_walk, &seeded(1)), Err(CMeansError::NoClusters)));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let dataset = Dataset::<f64>::from_reader("1 2\n2 1\n5 6\n6 5\n9 1\n8 2\n".as_bytes()).unwrap();
        let fcm = FuzzyCMeans::new(&dataset);
        let a = fcm.fit(3, FuzzyCMeans::init_random_walk, &seeded(1337)).unwrap();
        let b = fcm.fit(3, FuzzyCMeans::init_random_walk, &seeded(1337)).unwrap();
        assert_eq!(a.partition, b.partition);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn iteration_limit_stops_the_loop() {
        let dataset = two_groups::<f64>();
        let fcm = FuzzyCMeans::new(&dataset);
        let conf = FuzzyCMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(11))
            .abort_strategy(AbortStrategy::PartitionDeltaOrMaxIterations { epsilon: 0.0, max_iter: 3 })
            .build();
        let res = fcm.fit(2, FuzzyCMeans::init_random_walk, &conf).unwrap();
        assert!(res.iterations <= 3);
        assert!(res.termination.is_some());
    }

    #[test]
    fn legacy_variant_runs_with_cap() {
        let dataset = two_groups::<f64>();
        let fcm = FuzzyCMeans::new(&dataset);
        let conf = FuzzyCMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(3))
            .variant(Variant::Legacy)
            .abort_strategy(AbortStrategy::PartitionDeltaOrMaxIterations { epsilon: 0.001, max_iter: 50 })
            .build();
        let res = fcm.fit(2, FuzzyCMeans::init_random_walk, &conf).unwrap();
        assert!(res.iterations >= 1 && res.iterations <= 50);
        assert!(res.termination.is_some());
        assert_eq!((res.partition.rows(), res.partition.cols()), (4, 2));
    }

    #[test]
    fn legacy_first_iteration_values() {
        let dataset: Dataset<f64> = Dataset::from_normalized(Matrix::from_rows(vec![vec![0.25], vec![0.75]]).unwrap()).unwrap();
        let fcm = FuzzyCMeans::new(&dataset);
        let initial = Matrix::from_rows(vec![vec![0.5, 0.5], vec![1.0, 0.0]]).unwrap();
        let conf = FuzzyCMeansConfig::build()
            .variant(Variant::Legacy)
            .abort_strategy(AbortStrategy::PartitionDeltaOrMaxIterations { epsilon: 0.001, max_iter: 1 })
            .build();
        let res = fcm.fit(2, FuzzyCMeans::init_precomputed(initial), &conf).unwrap();

        assert_eq!(res.iterations, 1);
        assert_eq!(res.termination, Some(Termination::MaxIterations));
        assert_approx_eq!(res.centroids[(0, 0)], 0.6125, 1e-12);
        assert_approx_eq!(res.centroids[(1, 0)], 0.0625, 1e-12);
        // The accumulator keeps growing across all four cells
        assert_approx_eq!(res.partition[(0, 0)], 0.21106941838649151, 1e-12);
        assert_approx_eq!(res.partition[(0, 1)], 0.1665191190084797, 1e-12);
        assert_approx_eq!(res.partition[(1, 0)], 0.14193826651164534, 1e-12);
        assert_approx_eq!(res.partition[(1, 1)], 0.03026147449224371, 1e-12);
        assert_approx_eq!(res.delta, 1.5107346705856273, 1e-12);
    }

    #[test]
    fn callbacks_are_invoked() {
        let dataset = two_groups::<f64>();
        let fcm = FuzzyCMeans::new(&dataset);
        let init_calls = Cell::new(0);
        let iterations = Cell::new(0);
        let last_delta = Cell::new(f64::NAN);
        let init_done = |state: &FuzzyCMeansState<f64>| {
            assert_eq!(state.iterations, 0);
            init_calls.set(init_calls.get() + 1);
        };
        let iteration_done = |_: &FuzzyCMeansState<f64>, nr: usize, delta: f64| {
            iterations.set(nr);
            last_delta.set(delta);
        };
        let conf = FuzzyCMeansConfig::build()
            .random_generator(StdRng::seed_from_u64(8))
            .init_done(&init_done)
            .iteration_done(&iteration_done)
            .build();
        let res = fcm.fit(2, FuzzyCMeans::init_random_walk, &conf).unwrap();
        assert_eq!(init_calls.get(), 1);
        assert_eq!(iterations.get(), res.iterations);
        assert_eq!(last_delta.get(), res.delta);
    }
}
