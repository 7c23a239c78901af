use crate::core::distance_metric::DistanceMetric;
use crate::core::stats::SquaredSums;
use crate::error::Error;

/// Raw (non-normalized) Euclidean distance.
///
/// The squared distance between windows satisfies
/// `d²(i, j) = S[i] + S[j] - 2*QT(i, j)`, so the score is the negated squared
/// distance and the QT recurrence carries over unchanged from the
/// z-normalized kernel. Suitable for series where amplitude matters.
///
/// A window with no admissible candidate keeps the `-inf` sentinel and
/// finalizes to `+inf` (never NaN).
#[derive(Debug, Clone)]
pub struct AbsoluteEuclidean;

impl DistanceMetric for AbsoluteEuclidean {
    type Context = SquaredSums;

    fn precompute(ts: &[f64], m: usize) -> Result<Self::Context, Error> {
        SquaredSums::compute(ts, m)
    }

    #[inline(always)]
    fn score(
        qt: f64,
        i: usize,
        j: usize,
        _m: usize,
        ctx_i: &Self::Context,
        ctx_j: &Self::Context,
    ) -> f64 {
        2.0_f64.mul_add(qt, -(ctx_i.sum_sq[i] + ctx_j.sum_sq[j]))
    }

    #[inline(always)]
    fn excluded_score() -> f64 {
        f64::NEG_INFINITY
    }

    #[inline(always)]
    fn score_to_distance(score: f64, _m: usize) -> f64 {
        (-score).max(0.0).sqrt()
    }

    fn distance(
        ts_i: &[f64],
        i: usize,
        ts_j: &[f64],
        j: usize,
        m: usize,
        _ctx_i: &Self::Context,
        _ctx_j: &Self::Context,
    ) -> f64 {
        let sum_sq: f64 = ts_i[i..i + m]
            .iter()
            .zip(&ts_j[j..j + m])
            .map(|(&a, &b)| (a - b) * (a - b))
            .sum();
        sum_sq.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_hand_computed() {
        // ts = [1, 2, 3, 4], m = 2
        // QT(0,2) = 1*3 + 2*4 = 11, S[0] = 5, S[2] = 25
        // d² = 5 + 25 - 22 = 8
        let ts = vec![1.0, 2.0, 3.0, 4.0];
        let m = 2;
        let ctx = AbsoluteEuclidean::precompute(&ts, m).unwrap();
        let qt = 1.0 * 3.0 + 2.0 * 4.0;
        let s = AbsoluteEuclidean::score(qt, 0, 2, m, &ctx, &ctx);
        assert!((s + 8.0).abs() < 1e-10);
        let d = AbsoluteEuclidean::score_to_distance(s, m);
        assert!((d - 8.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_identical_windows() {
        let ts = vec![1.0, 2.0, 3.0, 4.0, 5.0, 1.0, 2.0, 3.0];
        let m = 3;
        let ctx = AbsoluteEuclidean::precompute(&ts, m).unwrap();
        let qt: f64 = ts[0..m].iter().zip(&ts[5..5 + m]).map(|(a, b)| a * b).sum();
        let d = AbsoluteEuclidean::score_to_distance(
            AbsoluteEuclidean::score(qt, 0, 5, m, &ctx, &ctx),
            m,
        );
        assert!(d.abs() < 1e-10, "identical windows should have d=0, got {d}");
    }

    #[test]
    fn test_direct_distance_matches_score() {
        let ts: Vec<f64> = (0..30).map(|i| (i as f64 * 0.23).cos() * 3.0).collect();
        let m = 5;
        let ctx = AbsoluteEuclidean::precompute(&ts, m).unwrap();
        for (i, j) in [(0, 8), (2, 20), (11, 24)] {
            let qt: f64 = ts[i..i + m]
                .iter()
                .zip(&ts[j..j + m])
                .map(|(a, b)| a * b)
                .sum();
            let from_score = AbsoluteEuclidean::score_to_distance(
                AbsoluteEuclidean::score(qt, i, j, m, &ctx, &ctx),
                m,
            );
            let direct = AbsoluteEuclidean::distance(&ts, i, &ts, j, m, &ctx, &ctx);
            assert!(
                (from_score - direct).abs() < 1e-9,
                "pair ({i},{j}): score-domain {from_score} vs direct {direct}"
            );
        }
    }

    #[test]
    fn test_no_candidate_is_infinite() {
        let d = AbsoluteEuclidean::score_to_distance(AbsoluteEuclidean::excluded_score(), 4);
        assert!(d.is_infinite() && d > 0.0);
    }
}
