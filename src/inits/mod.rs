pub(crate) mod randomwalk;
pub(crate) mod rownormalized;
pub(crate) mod precomputed;

use crate::memory::*;
use rand::prelude::*;
use tracing::{debug, warn};

const MAX_REDRAWS: usize = 10_000;

/// Uniform draw in [0, 1), quantized to steps of 0.0001.
#[inline(always)]
pub(crate) fn draw_membership<T: Primitive>(rnd: &mut dyn RngCore) -> T {
    crate::helpers::quantize(T::from(rnd.gen::<f64>()).unwrap())
}

/// Redraw random rows with `fill_row` until every cluster column holds at least one nonzero membership.
pub(crate) fn cover_all_clusters<T: Primitive>(partition: &mut Matrix<T>, rnd: &mut dyn RngCore,
                                               mut fill_row: impl FnMut(&mut [T], &mut dyn RngCore)) {
    if partition.rows() == 0 {
        return;
    }
    for _ in 0..MAX_REDRAWS {
        let empty = (0..partition.cols()).find(|&col| partition.column(col).all(|v| v == T::zero()));
        match empty {
            None => return,
            Some(col) => {
                let row = rnd.gen_range(0..partition.rows());
                debug!(cluster = col, row, "cluster without memberships, redrawing row");
                fill_row(partition.row_mut(row), rnd);
            }
        }
    }
    warn!(redraws = MAX_REDRAWS, "initial partition still has clusters without memberships");
}
