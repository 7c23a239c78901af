use rayon::prelude::*;

use crate::core::config::MatrixProfileConfig;
use crate::core::distance_metric::DistanceMetric;
use crate::error::Error;

/// Brute-force O(L²·m) self-join: materialize every admissible pairwise
/// distance and reduce. Each row is independent, so rows fan out across the
/// rayon pool.
///
/// This is the equivalence reference for the STOMP kernel — it goes through
/// the metric's direct `distance` formulation rather than the dot-product
/// recurrence, so the two paths share no intermediate arithmetic.
pub fn selfjoin_naive<M: DistanceMetric>(
    ts: &[f64],
    config: &MatrixProfileConfig,
) -> Result<Vec<f64>, Error> {
    let m = config.m;
    let n = ts.len();
    assert!(m >= 2, "subsequence length must be >= 2");
    assert!(n >= m, "time series length must be >= subsequence length");
    let n_subs = n - m + 1;
    let excl = config.exclusion_zone();
    let ctx = M::precompute(ts, m)?;

    // Windows at index <= E start from the exclusion sentinel, mirroring the
    // kernel's first-row overwrite; later windows always have a real
    // candidate and start unbounded.
    let no_candidate = M::score_to_distance(M::excluded_score(), m);
    let profile = (0..n_subs)
        .into_par_iter()
        .map(|i| {
            let mut best = if i <= excl { no_candidate } else { f64::INFINITY };
            for j in 0..n_subs {
                if j.abs_diff(i) <= excl {
                    continue;
                }
                let d = M::distance(ts, i, ts, j, m, &ctx, &ctx);
                if d < best {
                    best = d;
                }
            }
            best
        })
        .collect();
    Ok(profile)
}

/// Brute-force O(L1·L2·m) AB-join: for each window of `ts_a`, scan every
/// window of `ts_b`.
pub fn abjoin_naive<M: DistanceMetric>(
    ts_a: &[f64],
    ts_b: &[f64],
    m: usize,
) -> Result<Vec<f64>, Error> {
    assert!(m >= 2, "subsequence length must be >= 2");
    assert!(ts_a.len() >= m, "series A must be at least as long as m");
    assert!(ts_b.len() >= m, "series B must be at least as long as m");
    let l_a = ts_a.len() - m + 1;
    let l_b = ts_b.len() - m + 1;
    let ctx_a = M::precompute(ts_a, m)?;
    let ctx_b = M::precompute(ts_b, m)?;

    let profile = (0..l_a)
        .into_par_iter()
        .map(|i| {
            let mut best = f64::INFINITY;
            for j in 0..l_b {
                let d = M::distance(ts_a, i, ts_b, j, m, &ctx_a, &ctx_b);
                if d < best {
                    best = d;
                }
            }
            best
        })
        .collect();
    Ok(profile)
}
