use crate::{memory::*, CMeansError, FuzzyCMeans, FuzzyCMeansConfig, FuzzyCMeansState};
use super::{cover_all_clusters, draw_membership};
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(_fcm: &FuzzyCMeans<'_, T>, state: &mut FuzzyCMeansState<T>, config: &FuzzyCMeansConfig<'_, T>) -> Result<(), CMeansError> {
    let mut rnd = config.rnd.borrow_mut();
    let rnd = rnd.deref_mut();

    for row in state.partition.iter_rows_mut() {
        walk_row(row, rnd);
    }
    cover_all_clusters(&mut state.partition, rnd, walk_row);
    Ok(())
}

fn walk_row<T: Primitive>(row: &mut [T], rnd: &mut dyn RngCore) {
    let n_clusters = row.len();
    row.iter_mut().for_each(|v| *v = draw_membership(rnd));
    let mut row_sum: T = row.iter().cloned().sum();

    // Walk down: remove a random share of a random column, never more than the remaining excess
    while row_sum > T::one() {
        let excess = row_sum - T::one();
        let idx = rnd.gen_range(0..n_clusters);
        let amount = crate::helpers::quantize(T::from(rnd.gen::<f64>()).unwrap() * row[idx]);
        let amount = if excess < amount { excess } else { amount };
        row[idx] -= amount;
        row_sum -= amount;
    }

    // Walk up: fill a random column, never above 1 and never more than the remaining gap
    while row_sum < T::one() {
        let gap = T::one() - row_sum;
        let idx = rnd.gen_range(0..n_clusters);
        let room = T::one() - row[idx];
        let amount = if room >= gap { gap } else { room };
        row[idx] += amount;
        row_sum += amount;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;

    #[test] fn rows_sum_to_one_f64() { rows_sum_to_one::<f64>(1e-9); }
    #[test] fn rows_sum_to_one_f32() { rows_sum_to_one::<f32>(1e-4); }

    fn rows_sum_to_one<T: Primitive>(tol: T) {
        let dataset = two_groups::<T>();
        let fcm = FuzzyCMeans::new(&dataset);
        for (seed, n_clusters) in [(1u64, 1usize), (2, 2), (3, 3), (4, 7), (5, 25)] {
            let conf = FuzzyCMeansConfig::build().random_generator(rand::rngs::StdRng::seed_from_u64(seed)).build();
            let mut state = FuzzyCMeansState::new(dataset.instance_cnt(), dataset.attribute_cnt(), n_clusters);
            calculate(&fcm, &mut state, &conf).unwrap();
            assert_eq!(state.partition.rows(), 4);
            assert_eq!(state.partition.cols(), n_clusters);
            assert_rows_sum_to_one(&state.partition, tol);
        }
    }

    #[test]
    fn single_cluster_gets_full_membership() {
        let dataset = two_groups::<f64>();
        let fcm = FuzzyCMeans::new(&dataset);
        let conf = FuzzyCMeansConfig::build().random_generator(rand::rngs::StdRng::seed_from_u64(9)).build();
        let mut state = FuzzyCMeansState::new(4, 2, 1);
        calculate(&fcm, &mut state, &conf).unwrap();
        assert!(state.partition.as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let dataset = two_groups::<f64>();
        let fcm = FuzzyCMeans::new(&dataset);
        let run = |seed| {
            let conf = FuzzyCMeansConfig::build().random_generator(rand::rngs::StdRng::seed_from_u64(seed)).build();
            let mut state = FuzzyCMeansState::new(4, 2, 3);
            calculate(&fcm, &mut state, &conf).unwrap();
            state.partition
        };
        let first = run(1337);
        assert_eq!(first, run(1337));
        assert_rows_sum_to_one(&first, 1e-9);
    }
}
