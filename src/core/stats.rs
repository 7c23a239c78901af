use crate::error::Error;

/// Windows with a standard deviation at or below `m * 1e-300` are treated as
/// constant; their inverse deviation is pinned to zero so any score involving
/// them collapses to the defined degenerate value.
fn degenerate_threshold(m: usize) -> f64 {
    1e-300 * m as f64
}

/// Rolling mean and standard deviation for all subsequences of length `m`.
///
/// Computed via prefix sums over `T` and `T²` so every window is O(1) after an
/// O(n) pass. Negative variances from catastrophic cancellation are clamped to
/// zero before the square root.
#[derive(Debug, Clone)]
pub struct WindowStats {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    /// Precomputed `1 / (sqrt(m) * sigma)` for each subsequence, zero for
    /// degenerate (constant) windows. Lets the inner loop replace division
    /// with multiplication:
    /// `r = (QT - m*mu_i*mu_j) * m_sigma_inv[i] * m_sigma_inv[j]`,
    /// and makes any score involving a degenerate window collapse to 0
    /// without a branch.
    pub m_sigma_inv: Vec<f64>,
}

impl WindowStats {
    /// Compute rolling statistics for subsequences of length `m`.
    pub fn compute(ts: &[f64], m: usize) -> Result<Self, Error> {
        let n = ts.len();
        if m == 0 || n < m {
            return Err(Error::ShapeMismatch {
                op: "compute_mean_std",
                reason: format!("series of length {n} has no windows of length {m}"),
            });
        }
        let n_subs = n - m + 1;

        let mut cumsum = vec![0.0; n + 1];
        let mut cumsum_sq = vec![0.0; n + 1];
        for (i, &x) in ts.iter().enumerate() {
            cumsum[i + 1] = cumsum[i] + x;
            cumsum_sq[i + 1] = cumsum_sq[i] + x * x;
        }

        let mut mean = vec![0.0; n_subs];
        let mut std = vec![0.0; n_subs];
        let mut m_sigma_inv = vec![0.0; n_subs];

        let m_f = m as f64;
        let sqrt_m = m_f.sqrt();
        let threshold = degenerate_threshold(m);
        for i in 0..n_subs {
            let sum = cumsum[i + m] - cumsum[i];
            let sum_sq = cumsum_sq[i + m] - cumsum_sq[i];
            let mu = sum / m_f;
            let var = (sum_sq / m_f - mu * mu).max(0.0);
            let sigma = var.sqrt();
            mean[i] = mu;
            std[i] = sigma;
            if sigma > threshold {
                m_sigma_inv[i] = 1.0 / (sqrt_m * sigma);
            }
        }

        Ok(Self {
            mean,
            std,
            m_sigma_inv,
        })
    }
}

/// Per-window squared sums: `S[i] = sum of ts[i..i+m] squared`.
///
/// Context for the raw Euclidean metric, where
/// `d²(i, j) = S[i] + S[j] - 2*QT(i, j)`.
#[derive(Debug, Clone)]
pub struct SquaredSums {
    pub sum_sq: Vec<f64>,
}

impl SquaredSums {
    pub fn compute(ts: &[f64], m: usize) -> Result<Self, Error> {
        Ok(Self {
            sum_sq: squared_sums(ts, m)?,
        })
    }
}

/// Compute `S[i] = sum of ts[i+k]² over k in 0..m` for every window, via the
/// same prefix-sum technique as [`WindowStats`].
pub fn squared_sums(ts: &[f64], m: usize) -> Result<Vec<f64>, Error> {
    let n = ts.len();
    if m == 0 || n < m {
        return Err(Error::ShapeMismatch {
            op: "squared_sums",
            reason: format!("series of length {n} has no windows of length {m}"),
        });
    }

    let mut cumsum_sq = vec![0.0; n + 1];
    for (i, &x) in ts.iter().enumerate() {
        cumsum_sq[i + 1] = cumsum_sq[i] + x * x;
    }

    Ok((0..n - m + 1)
        .map(|i| cumsum_sq[i + m] - cumsum_sq[i])
        .collect())
}
