use crate::error::Error;

/// Trait for distance models used in matrix profile computation.
///
/// Designed for static polymorphism: the kernels are generic over
/// `M: DistanceMetric`, so the inner loop monomorphizes, inlines, and
/// autovectorizes without dynamic dispatch.
///
/// The kernels work in a *score* domain where larger means more similar,
/// reducing with a running maximum and converting to Euclidean distance once
/// per output element at the end. The two models map into that domain
/// differently:
///
/// - z-normalized: the score is the scaled Pearson correlation
///   `r = (QT - m*mu_i*mu_j) * m_sigma_inv[i] * m_sigma_inv[j]`,
/// - raw: the score is the negated squared distance
///   `-(S[i] + S[j] - 2*QT)`.
///
/// The associated `Context` holds the per-series statistics each model needs,
/// precomputed once in O(n) so the O(L²) loop never recomputes them.
pub trait DistanceMetric: Clone + Send + Sync {
    /// Precomputed per-series statistics (rolling means/deviations or
    /// squared sums).
    type Context: Send + Sync;

    /// Precompute context from a time series and subsequence length.
    fn precompute(ts: &[f64], m: usize) -> Result<Self::Context, Error>;

    /// Similarity score for the window pair `(i, j)` given its dot product.
    /// Larger is closer. `ctx_i` indexes the series containing window `i`,
    /// `ctx_j` the series containing window `j`; self-joins pass the same
    /// context twice.
    fn score(
        qt: f64,
        i: usize,
        j: usize,
        m: usize,
        ctx_i: &Self::Context,
        ctx_j: &Self::Context,
    ) -> f64;

    /// Score assigned to pairs disqualified by the exclusion zone, and the
    /// value a window with no admissible candidate finalizes from.
    fn excluded_score() -> f64;

    /// Convert an accumulated score to a Euclidean distance. Monotone
    /// decreasing in the score, so the running maximum preserves the nearest
    /// neighbor. Clamps the radicand at zero: numerical drift can push a
    /// score past its theoretical bound.
    fn score_to_distance(score: f64, m: usize) -> f64;

    /// Direct distance between window `i` of `ts_i` and window `j` of `ts_j`,
    /// computed without dot-product reuse. Used by the brute-force checker as
    /// an independent formulation.
    fn distance(
        ts_i: &[f64],
        i: usize,
        ts_j: &[f64],
        j: usize,
        m: usize,
        ctx_i: &Self::Context,
        ctx_j: &Self::Context,
    ) -> f64;
}
