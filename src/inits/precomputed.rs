use crate::{memory::*, CMeansError, FuzzyCMeans, FuzzyCMeansConfig, FuzzyCMeansState};

#[inline(always)]
pub fn calculate<T: Primitive>(
    _fcm: &FuzzyCMeans<'_, T>, state: &mut FuzzyCMeansState<T>, _config: &FuzzyCMeansConfig<'_, T>, computed: Matrix<T>,
) -> Result<(), CMeansError> {
    let (expected_rows, expected_cols) = (state.partition.rows(), state.partition.cols());
    if computed.rows() != expected_rows || computed.cols() != expected_cols {
        return Err(CMeansError::PartitionShape {
            expected_rows, expected_cols, rows: computed.rows(), cols: computed.cols()
        });
    }
    state.partition = computed;
    Ok(())
}
