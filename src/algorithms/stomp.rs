use std::mem;

use crate::algorithms::common::{scratch, sliding_dot_product};
use crate::core::config::MatrixProfileConfig;
use crate::core::distance_metric::DistanceMetric;
use crate::error::Error;

/// Compute the self-join matrix profile with the STOMP rolling recurrence.
///
/// STOMP exploits the relationship between dot products of adjacent window
/// pairs:
///
/// `QT[i][j] = QT[i-1][j-1] - T[j-1]*T[i-1] + T[j+m-1]*T[i+m-1]`
///
/// so each pair costs O(1) instead of O(m), giving O(L²) total. Two owned
/// row buffers hold the previous and current dot-product rows and rotate by
/// `mem::swap` after each row.
///
/// Row `i`'s inner loop starts at `j = i + E + 1` with `E = ceil(m/4)` (the
/// exclusion zone), covering every admissible pair exactly once: the loop
/// updates the running best for both column `j` and row `i`. Entries with no
/// admissible candidate keep the metric's sentinel score and finalize to its
/// defined worst distance.
///
/// `p_out` must hold exactly `n - m + 1` elements; on return it contains the
/// finalized nearest-neighbor distances.
pub fn selfjoin<M: DistanceMetric>(
    ts: &[f64],
    config: &MatrixProfileConfig,
    p_out: &mut [f64],
) -> Result<(), Error> {
    let m = config.m;
    let n = ts.len();
    assert!(m >= 2, "subsequence length must be >= 2");
    assert!(n >= m, "time series length must be >= subsequence length");
    let n_subs = n - m + 1;
    assert_eq!(p_out.len(), n_subs, "profile buffer length must be n - m + 1");

    let excl = config.exclusion_zone();
    let ctx = M::precompute(ts, m)?;

    let mut qt_prev = sliding_dot_product(&ts[..m], ts)?;
    let mut qt_curr = scratch(n_subs)?;

    // First row: score window 0 against every window, then overwrite the
    // trivial-match zone with the sentinel and fold the admissible tail into
    // the window-0 accumulator.
    for (j, (&qt, p)) in qt_prev.iter().zip(p_out.iter_mut()).enumerate() {
        *p = M::score(qt, 0, j, m, &ctx, &ctx);
    }
    let zone_end = (excl + 1).min(n_subs);
    for p in p_out[..zone_end].iter_mut() {
        *p = M::excluded_score();
    }
    let mut best0 = M::excluded_score();
    for &p in &p_out[zone_end..] {
        if p > best0 {
            best0 = p;
        }
    }
    p_out[0] = best0;

    for i in 1..n_subs {
        let mut best_i = p_out[i];
        let first_j = i + excl + 1;
        if first_j < n_subs {
            let dropped = ts[i - 1];
            let added = ts[i + m - 1];
            for j in first_j..n_subs {
                let qt = added.mul_add(ts[j + m - 1], (-dropped).mul_add(ts[j - 1], qt_prev[j - 1]));
                qt_curr[j] = qt;
                let s = M::score(qt, i, j, m, &ctx, &ctx);
                if s > p_out[j] {
                    p_out[j] = s;
                }
                if s > best_i {
                    best_i = s;
                }
            }
        }
        p_out[i] = best_i;
        mem::swap(&mut qt_prev, &mut qt_curr);
    }

    for p in p_out.iter_mut() {
        *p = M::score_to_distance(*p, m);
    }
    Ok(())
}
