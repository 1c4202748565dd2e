//! # cmeans - API documentation
//!
//! Cmeans is a small rust library for fuzzy c-means clustering.
//!
//! ## Fuzzy clustering
//! Instead of assigning every instance to exactly one cluster (as k-means does), fuzzy c-means
//! assigns a membership degree in [0, 1] for every instance / cluster pair. The memberships of one
//! instance sum to 1. These degrees are stored in the partition matrix [instances x clusters], the
//! cluster centers in the centroid matrix [clusters x attributes].
//!
//! The algorithm alternates between computing centroids as membership-weighted means and computing
//! new memberships from the (squared euclidean) distances to those centroids, until the partition
//! matrix changes by less than `epsilon` (sum of absolute differences) between two iterations.
//!
//! ## Supported variants
//! - [`Variant::Standard`]: The textbook formulas (default)
//! - [`Variant::Legacy`]: Reproduces the formulas of the original c-means tool, quirks included.
//!   Only useful for comparing against results of that tool.
//!
//! ## Supported partition initializations
//! The outcome of each run depends on the initial partition. For a list of implemented
//! initialization methods, see [`FuzzyCMeans`].
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use cmeans::*;
//! use rand::SeedableRng;
//!
//! // Two groups of points: (0,0),(0,1) and (10,10),(10,11)
//! let dataset = Dataset::<f64>::from_reader("0 0\n0 1\n10 10\n10 11\n".as_bytes()).unwrap();
//!
//! let conf = FuzzyCMeansConfig::build()
//!     .random_generator(rand::rngs::StdRng::seed_from_u64(1337))
//!     .build();
//! let fcm = FuzzyCMeans::new(&dataset);
//! let result = fcm.fit(2, FuzzyCMeans::init_random_walk, &conf).unwrap();
//!
//! println!("Centroids:\n{}", result);
//! println!("Memberships:\n{}", result.render_partition());
//! println!("Iterations: {}", result.iterations);
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use cmeans::*;
//!
//! let dataset = Dataset::<f64>::from_reader("1 2\n2 1\n8 9\n9 8\n".as_bytes()).unwrap();
//!
//! let conf = FuzzyCMeansConfig::<f64>::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|_, nr, delta| println!("Iteration {} - partition delta: {:.6}", nr, delta))
//!     .epsilon(0.0001)
//!     .fuzziness(2.5)
//!     .build();
//!
//! let result = FuzzyCMeans::new(&dataset).fit(2, FuzzyCMeans::init_row_normalized, &conf).unwrap();
//! println!("Centroids:\n{}", result);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`FuzzyCMeans`] struct. It borrows a [`Dataset`], which is parsed
//! (and column-normalized) once, using [`Dataset::from_reader`], [`Dataset::from_path`] or
//! [`Dataset::from_matrix`]. Calling [`FuzzyCMeans::fit`] does not mutate either of them, a new
//! [`FuzzyCMeansState`] is created per run to store the state (and finally the result).
//!
//! [`FuzzyCMeans::fit`] takes the chosen initialization method, which is simply passed in as reference
//! to one of the static `init_*` methods of [`FuzzyCMeans`], and a [`FuzzyCMeansConfig`].

#[macro_use] mod helpers;
mod memory;
mod error;
mod dataset;
mod distance;
mod api;
mod fit;
mod variants;
mod inits;
mod abort_strategy;

pub use abort_strategy::{AbortStrategy, Termination, partition_delta, converged};
pub use api::{FuzzyCMeansState, FuzzyCMeansConfig, FuzzyCMeansConfigBuilder, FuzzyCMeans,
              DEFAULT_EPSILON, DEFAULT_FUZZINESS, DEFAULT_MAX_ITER};
pub use dataset::Dataset;
pub use distance::squared_euclidean;
pub use error::{CMeansError, DatasetError};
pub use memory::{Matrix, Primitive};
pub use variants::Variant;
