use realfft::RealFftPlanner;

use crate::error::Error;

/// Window length at which the FFT path overtakes the naive O(n*m) loop.
/// Below this, the FFT's planning and buffer traffic dominate.
const FFT_MIN_M: usize = 256;

/// Compute the sliding dot product between a query subsequence `q` and time
/// series `ts`.
///
/// Returns a vector of length `ts.len() - q.len() + 1` where element `i` is
/// `dot(q, ts[i..i+m])`.
///
/// Dispatches to the FFT-based O(n log n) implementation for `m >= 256`,
/// falling back to the naive O(n*m) loop for shorter queries.
pub fn sliding_dot_product(q: &[f64], ts: &[f64]) -> Result<Vec<f64>, Error> {
    if q.len() >= FFT_MIN_M {
        sliding_dot_product_fft(q, ts)
    } else {
        Ok(sliding_dot_product_naive(q, ts))
    }
}

/// Naive O(n*m) sliding dot product.
///
/// The outer loop runs over the query offset `k`, so the inner loop is a
/// contiguous accumulation over all `L` output elements — the form the
/// compiler vectorizes.
pub fn sliding_dot_product_naive(q: &[f64], ts: &[f64]) -> Vec<f64> {
    let m = q.len();
    assert!(m >= 1, "query must be non-empty");
    assert!(ts.len() >= m, "time series shorter than query");
    let n_subs = ts.len() - m + 1;

    let mut qt = vec![0.0; n_subs];
    for (k, &qk) in q.iter().enumerate() {
        for (out, &t) in qt.iter_mut().zip(&ts[k..k + n_subs]) {
            *out = qk.mul_add(t, *out);
        }
    }
    qt
}

/// FFT-based O(n log n) sliding dot product via cross-correlation.
///
/// Both inputs are zero-padded to length `2n` (the query reversed), the
/// spectra are multiplied pointwise, and the dot products are read from
/// indices `[m-1, n)` of the inverse transform, scaled by `1/(2n)`.
pub fn sliding_dot_product_fft(q: &[f64], ts: &[f64]) -> Result<Vec<f64>, Error> {
    let m = q.len();
    let n = ts.len();
    assert!(m >= 1, "query must be non-empty");
    assert!(n >= m, "time series shorter than query");
    let n_subs = n - m + 1;
    let fft_len = 2 * n;

    let mut planner = RealFftPlanner::<f64>::new();
    let fft_forward = planner.plan_fft_forward(fft_len);
    let fft_inverse = planner.plan_fft_inverse(fft_len);

    // Reverse query into a zero-padded buffer
    let mut q_padded = scratch(fft_len)?;
    for i in 0..m {
        q_padded[i] = q[m - 1 - i];
    }

    // Zero-pad time series
    let mut ts_padded = scratch(fft_len)?;
    ts_padded[..n].copy_from_slice(ts);

    let mut q_spectrum = fft_forward.make_output_vec();
    let mut ts_spectrum = fft_forward.make_output_vec();
    fft_forward
        .process(&mut q_padded, &mut q_spectrum)
        .map_err(|_| Error::InternalNumeric)?;
    fft_forward
        .process(&mut ts_padded, &mut ts_spectrum)
        .map_err(|_| Error::InternalNumeric)?;

    for (q_val, ts_val) in q_spectrum.iter_mut().zip(ts_spectrum.iter()) {
        *q_val *= ts_val;
    }

    let mut conv = scratch(fft_len)?;
    fft_inverse
        .process(&mut q_spectrum, &mut conv)
        .map_err(|_| Error::InternalNumeric)?;

    // realfft's inverse is unnormalized
    let norm = 1.0 / fft_len as f64;
    let qt: Vec<f64> = conv[m - 1..m - 1 + n_subs].iter().map(|&x| x * norm).collect();

    if qt.iter().any(|x| !x.is_finite()) {
        return Err(Error::InternalNumeric);
    }
    Ok(qt)
}

/// Allocate a zero-filled scratch buffer, surfacing allocation failure
/// instead of aborting.
pub(crate) fn scratch(len: usize) -> Result<Vec<f64>, Error> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::ResourceExhausted { len })?;
    buf.resize(len, 0.0);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_simple() {
        // q = [1, 2], ts = [1, 2, 3, 4]
        // dot([1,2], [1,2]) = 5; dot([1,2], [2,3]) = 8; dot([1,2], [3,4]) = 11
        let q = vec![1.0, 2.0];
        let ts = vec![1.0, 2.0, 3.0, 4.0];
        let qt = sliding_dot_product_naive(&q, &ts);
        assert_eq!(qt.len(), 3);
        assert!((qt[0] - 5.0).abs() < 1e-10);
        assert!((qt[1] - 8.0).abs() < 1e-10);
        assert!((qt[2] - 11.0).abs() < 1e-10);
    }

    #[test]
    fn test_naive_single_window() {
        let q = vec![3.0, 4.0, 5.0];
        let ts = vec![3.0, 4.0, 5.0];
        let qt = sliding_dot_product_naive(&q, &ts);
        assert_eq!(qt.len(), 1);
        assert!((qt[0] - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_three_point_query() {
        // ts = [1..6], q = [1, 0, -1]: every window yields ts[i] - ts[i+2] = -2
        let ts = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let q = vec![1.0, 0.0, -1.0];
        let naive = sliding_dot_product_naive(&q, &ts);
        assert_eq!(naive, vec![-2.0, -2.0, -2.0, -2.0]);

        let fft = sliding_dot_product_fft(&q, &ts).unwrap();
        assert_eq!(fft.len(), 4);
        for (i, v) in fft.iter().enumerate() {
            assert!((v + 2.0).abs() < 1e-10, "fft[{i}] = {v}, expected -2");
        }
    }

    #[test]
    fn test_fft_vs_naive_equivalence() {
        for (n, m) in [(64, 3), (100, 10), (1000, 50), (4096, 512)] {
            let ts: Vec<f64> = (0..n)
                .map(|i| (i as f64 * 0.1).sin() + 0.5 * (i as f64 * 0.017).cos())
                .collect();
            let q = ts[n / 3..n / 3 + m].to_vec();
            let naive = sliding_dot_product_naive(&q, &ts);
            let fft = sliding_dot_product_fft(&q, &ts).unwrap();
            assert_eq!(naive.len(), fft.len());
            let scale = naive.iter().fold(1.0_f64, |a, &x| a.max(x.abs()));
            for (i, (a, b)) in naive.iter().zip(fft.iter()).enumerate() {
                assert!(
                    (a - b).abs() <= 1e-8 * scale,
                    "mismatch at {i} (n={n}, m={m}): naive={a}, fft={b}"
                );
            }
        }
    }

    #[test]
    fn test_dispatch_small_and_large() {
        let n = 700;
        let ts: Vec<f64> = (0..n).map(|i| (i as f64 * 0.05).sin()).collect();
        for m in [8, 300] {
            let q = ts[0..m].to_vec();
            let via_dispatch = sliding_dot_product(&q, &ts).unwrap();
            let naive = sliding_dot_product_naive(&q, &ts);
            for (a, b) in via_dispatch.iter().zip(naive.iter()) {
                assert!((a - b).abs() < 1e-8);
            }
        }
    }
}
