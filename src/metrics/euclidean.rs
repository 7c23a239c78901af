use crate::core::distance_metric::DistanceMetric;
use crate::core::stats::WindowStats;
use crate::error::Error;

/// Z-normalized Euclidean distance.
///
/// The score is the scaled Pearson correlation
/// `r = (QT - m*mu_i*mu_j) * m_sigma_inv[i] * m_sigma_inv[j]`, converted at
/// the end via `d = sqrt(2*m*(1 - r))`. The `1/m` scaling lives inside
/// `m_sigma_inv`, so the score formula and the conversion form a consistent
/// pair.
///
/// Degenerate (constant) windows carry `m_sigma_inv = 0`, so any score
/// involving one collapses to 0 and finalizes to `sqrt(2*m)` — the defined
/// worst case, never NaN.
#[derive(Debug, Clone)]
pub struct ZNormalizedEuclidean;

impl DistanceMetric for ZNormalizedEuclidean {
    type Context = WindowStats;

    fn precompute(ts: &[f64], m: usize) -> Result<Self::Context, Error> {
        WindowStats::compute(ts, m)
    }

    #[inline(always)]
    fn score(
        qt: f64,
        i: usize,
        j: usize,
        m: usize,
        ctx_i: &Self::Context,
        ctx_j: &Self::Context,
    ) -> f64 {
        let m_f = m as f64;
        (m_f * ctx_i.mean[i]).mul_add(-ctx_j.mean[j], qt)
            * ctx_i.m_sigma_inv[i]
            * ctx_j.m_sigma_inv[j]
    }

    #[inline(always)]
    fn excluded_score() -> f64 {
        0.0
    }

    #[inline(always)]
    fn score_to_distance(score: f64, m: usize) -> f64 {
        (2.0 * m as f64 * (1.0 - score)).max(0.0).sqrt()
    }

    fn distance(
        ts_i: &[f64],
        i: usize,
        ts_j: &[f64],
        j: usize,
        m: usize,
        ctx_i: &Self::Context,
        ctx_j: &Self::Context,
    ) -> f64 {
        // Explicit z-normalization, independent of the dot-product identity.
        if ctx_i.m_sigma_inv[i] == 0.0 || ctx_j.m_sigma_inv[j] == 0.0 {
            return (2.0 * m as f64).sqrt();
        }
        let (mu_i, sig_i) = (ctx_i.mean[i], ctx_i.std[i]);
        let (mu_j, sig_j) = (ctx_j.mean[j], ctx_j.std[j]);
        let sum_sq: f64 = ts_i[i..i + m]
            .iter()
            .zip(&ts_j[j..j + m])
            .map(|(&a, &b)| {
                let za = (a - mu_i) / sig_i;
                let zb = (b - mu_j) / sig_j;
                (za - zb) * (za - zb)
            })
            .sum();
        sum_sq.sqrt()
    }
}
