//! Matrix profile computation via the STOMP rolling-dot-product recurrence.
//!
//! For every length-`m` window of a source series, the matrix profile holds
//! the Euclidean distance to that window's nearest neighbor in a target
//! series — the primitive behind motif discovery and discord (anomaly)
//! detection. Both z-normalized and raw Euclidean distance are supported,
//! as self-joins (one series against itself, with a trivial-match exclusion
//! zone) and AB-joins (two series, no zone).
//!
//! The [`backend`] module exposes the C-style façade — lifecycle management
//! plus `selfjoin`/`abjoin`/`sliding_dot_product`/`compute_mean_std` — while
//! the [`algorithms`] module offers the kernels directly for callers that
//! don't need the backend lifecycle.
//!
//! ```
//! use matprof::backend;
//!
//! let ts: Vec<f64> = (0..64).map(|i| (i as f64 * 0.4).sin()).collect();
//! let m = 8;
//! let mut profile = vec![0.0; ts.len() - m + 1];
//!
//! backend::initialize(0, 0)?;
//! backend::selfjoin(&ts, &mut profile, m, 0, true)?;
//! backend::finalize()?;
//!
//! assert!(profile.iter().all(|d| d.is_finite()));
//! # Ok::<(), matprof::Error>(())
//! ```

pub mod algorithms;
pub mod backend;
pub mod core;
pub mod error;
pub mod metrics;

pub use crate::core::config::MatrixProfileConfig;
pub use crate::core::distance_metric::DistanceMetric;
pub use crate::core::stats::{squared_sums, SquaredSums, WindowStats};
pub use crate::error::Error;
pub use crate::metrics::absolute::AbsoluteEuclidean;
pub use crate::metrics::euclidean::ZNormalizedEuclidean;
