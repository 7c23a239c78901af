use std::mem;

use crate::algorithms::common::{scratch, sliding_dot_product};
use crate::core::distance_metric::DistanceMetric;
use crate::error::Error;

/// Compute the AB-join matrix profile: for each window of `ts_a`, the
/// distance to its nearest neighbor among the windows of `ts_b`.
///
/// Unlike the self-join there is no exclusion zone, and the result is
/// one-sided — only `ts_a`'s neighbors are reported. Swapping the arguments
/// yields the other side.
///
/// The outer loop walks `ts_b`'s windows; the inner loop rolls the same QT
/// recurrence as the self-join with `ts_a` on the left and `ts_b` on the
/// right:
///
/// `QT[i][j] = QT[i-1][j-1] - A[j-1]*B[i-1] + A[j+m-1]*B[i+m-1]`
///
/// At `j = 0` the recurrence has no predecessor, so that entry is re-seeded
/// each iteration by a direct length-m dot product.
///
/// `p_out` must hold exactly `ts_a.len() - m + 1` elements.
pub fn abjoin<M: DistanceMetric>(
    ts_a: &[f64],
    ts_b: &[f64],
    m: usize,
    p_out: &mut [f64],
) -> Result<(), Error> {
    let n_a = ts_a.len();
    let n_b = ts_b.len();
    assert!(m >= 2, "subsequence length must be >= 2");
    assert!(n_a >= m, "series A must be at least as long as m");
    assert!(n_b >= m, "series B must be at least as long as m");
    let l_a = n_a - m + 1;
    let l_b = n_b - m + 1;
    assert_eq!(p_out.len(), l_a, "profile buffer length must be n1 - m + 1");

    let ctx_a = M::precompute(ts_a, m)?;
    let ctx_b = M::precompute(ts_b, m)?;

    let mut qt_prev = sliding_dot_product(&ts_b[..m], ts_a)?;
    let mut qt_curr = scratch(l_a)?;

    // First row: B's window 0 against every window of A.
    for (j, (&qt, p)) in qt_prev.iter().zip(p_out.iter_mut()).enumerate() {
        *p = M::score(qt, j, 0, m, &ctx_a, &ctx_b);
    }

    for i in 1..l_b {
        let qt0: f64 = ts_a[..m]
            .iter()
            .zip(&ts_b[i..i + m])
            .map(|(&a, &b)| a * b)
            .sum();
        qt_curr[0] = qt0;
        let s0 = M::score(qt0, 0, i, m, &ctx_a, &ctx_b);
        if s0 > p_out[0] {
            p_out[0] = s0;
        }

        let dropped = ts_b[i - 1];
        let added = ts_b[i + m - 1];
        for j in 1..l_a {
            let qt =
                added.mul_add(ts_a[j + m - 1], (-dropped).mul_add(ts_a[j - 1], qt_prev[j - 1]));
            qt_curr[j] = qt;
            let s = M::score(qt, j, i, m, &ctx_a, &ctx_b);
            if s > p_out[j] {
                p_out[j] = s;
            }
        }
        mem::swap(&mut qt_prev, &mut qt_curr);
    }

    for p in p_out.iter_mut() {
        *p = M::score_to_distance(*p, m);
    }
    Ok(())
}
