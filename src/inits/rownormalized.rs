use crate::{memory::*, CMeansError, FuzzyCMeans, FuzzyCMeansConfig, FuzzyCMeansState};
use super::{cover_all_clusters, draw_membership};
use rand::RngCore;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(_fcm: &FuzzyCMeans<'_, T>, state: &mut FuzzyCMeansState<T>, config: &FuzzyCMeansConfig<'_, T>) -> Result<(), CMeansError> {
    let mut rnd = config.rnd.borrow_mut();
    let rnd = rnd.deref_mut();

    for row in state.partition.iter_rows_mut() {
        fill_row(row, rnd);
    }
    cover_all_clusters(&mut state.partition, rnd, fill_row);
    Ok(())
}

fn fill_row<T: Primitive>(row: &mut [T], rnd: &mut dyn RngCore) {
    loop {
        row.iter_mut().for_each(|v| *v = draw_membership(rnd));
        let row_sum: T = row.iter().cloned().sum();
        if row_sum > T::zero() {
            row.iter_mut().for_each(|v| *v = *v / row_sum);
            return;
        }
    }
}
