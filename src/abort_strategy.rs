use crate::memory::*;

/// Enum with possible abort strategies.
/// These strategies specify when the running fit loop stops iterating.
///
/// Both strategies compare successive partition matrices using [`partition_delta`], i.e. the
/// sum of absolute element-wise differences.
#[derive(Clone, Copy, Debug)]
pub enum AbortStrategy<T: Primitive> {
	/// Stop as soon as `partition_delta <= epsilon`. There is no iteration limit, if the partition
	/// never settles, the calculation never returns.
	/// ## Fields:
	/// - **epsilon**: Maximum total change in the partition matrix that counts as converged
	PartitionDelta { epsilon: T },
	/// Same as [`AbortStrategy::PartitionDelta`], but additionally stops after **max_iter** iterations.
	/// ## Fields:
	/// - **epsilon**: Maximum total change in the partition matrix that counts as converged
	/// - **max_iter**: Upper bound for the amount of iterations
	PartitionDeltaOrMaxIterations { epsilon: T, max_iter: usize }
}
impl<T: Primitive> AbortStrategy<T> {
	pub fn epsilon(&self) -> T {
		match *self {
			AbortStrategy::PartitionDelta{epsilon} => epsilon,
			AbortStrategy::PartitionDeltaOrMaxIterations{epsilon, ..} => epsilon,
		}
	}

	pub(crate) fn with_epsilon(self, epsilon: T) -> Self {
		match self {
			AbortStrategy::PartitionDelta{..} => AbortStrategy::PartitionDelta{epsilon},
			AbortStrategy::PartitionDeltaOrMaxIterations{max_iter, ..} =>
				AbortStrategy::PartitionDeltaOrMaxIterations{epsilon, max_iter},
		}
	}

	pub(crate) fn create_logic(&self) -> Box<dyn AbortStrategyLogic<T>> {
		match *self {
			AbortStrategy::PartitionDelta{epsilon} => Box::new(PartitionDeltaLogic { epsilon, max_iter: None }),
			AbortStrategy::PartitionDeltaOrMaxIterations{epsilon, max_iter} => Box::new(PartitionDeltaLogic {
				epsilon, max_iter: Some(max_iter)
			})
		}
	}
}

/// Reason why a fit loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
	/// The partition delta dropped to (or below) epsilon
	Converged,
	/// The iteration limit was reached before convergence
	MaxIterations,
}

pub(crate) trait AbortStrategyLogic<T: Primitive> {
	/// Function that has to be called once an iteration of the calculation ended.
	/// ## Arguments
	/// - **delta**: Partition delta between the previous and the new partition matrix
	/// - **iteration**: Number of the finished iteration (starting at 1)
	/// ## Returns
	/// - **None** if the calculation should continue
	/// - **Some(reason)** if the calculation should stop
	fn next(&mut self, delta: T, iteration: usize) -> Option<Termination>;
}


pub(crate) struct PartitionDeltaLogic<T: Primitive> {
	epsilon: T,
	max_iter: Option<usize>
}
impl<T: Primitive> AbortStrategyLogic<T> for PartitionDeltaLogic<T> {
	fn next(&mut self, delta: T, iteration: usize) -> Option<Termination> {
		if within_epsilon(delta, self.epsilon) {
			return Some(Termination::Converged);
		}
		match self.max_iter {
			Some(max_iter) if iteration >= max_iter => Some(Termination::MaxIterations),
			_ => None
		}
	}
}


/// Sum of absolute element-wise differences between two partition matrices of equal shape.
pub fn partition_delta<T: Primitive>(previous: &Matrix<T>, current: &Matrix<T>) -> T {
	debug_assert_eq!((previous.rows(), previous.cols()), (current.rows(), current.cols()));
	previous.as_slice().iter().zip(current.as_slice().iter())
		.map(|(&p, &c)| (p - c).abs())
		.sum()
}

/// Returns **true** if the partition delta between both matrices is at most **epsilon**.
/// A NaN delta never converges.
pub fn converged<T: Primitive>(previous: &Matrix<T>, current: &Matrix<T>, epsilon: T) -> bool {
	within_epsilon(partition_delta(previous, current), epsilon)
}

#[inline(always)]
fn within_epsilon<T: Primitive>(delta: T, epsilon: T) -> bool {
	delta <= epsilon
}
