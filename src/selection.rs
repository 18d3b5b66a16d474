//! Selection strategies: choosing which rows of the sorted population
//! become parents.
//!
//! Every strategy takes the fitness column of the population (sorted
//! ascending, index 0 is the best) and a requested count `k`, and returns
//! `k` indices into that pool. Fitness-proportionate strategies read the
//! score values; rank-based strategies only use positions.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//!   (linear ranking)
//! - Baker (1987), "Reducing Bias and Inefficiency in the Selection
//!   Algorithm" (stochastic universal sampling)
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::GaError;
use rand::seq::index;
use rand::Rng;

/// Strategy for drawing parent indices from the sorted pool.
///
/// All strategies assume **minimization**: the pool is sorted by ascending
/// fitness and index 0 is the current best.
///
/// Fitness-proportionate variants ([`Roulette`](Selection::Roulette),
/// [`Stochastic`](Selection::Stochastic),
/// [`SigmaScaling`](Selection::SigmaScaling)) expect finite scores; with
/// infinite penalty values their weights degenerate, so prefer a
/// rank-based variant when the objective returns `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use gabox::Selection;
///
/// // Fitness-proportionate (the default)
/// let sel = Selection::Roulette;
///
/// // Tournament of 4 (stronger selection pressure)
/// let sel = Selection::Tournament { tau: 4 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// `k` distinct indices, uniformly, ignoring fitness entirely.
    ///
    /// No selection pressure; useful as a baseline or to keep maximum
    /// diversity in the parent pool.
    FullyRandom,

    /// Fitness-proportionate roulette wheel over inverted scores.
    ///
    /// Scores are shifted to be non-negative and mirrored so the lowest
    /// score receives the largest slice of the wheel. Draws are
    /// independent, with replacement.
    ///
    /// **Warning**: susceptible to super-individual dominance when the
    /// fitness spread is large.
    Roulette,

    /// Stochastic universal sampling over the same inverted-score wheel.
    ///
    /// One random offset places `k` evenly spaced markers across the
    /// cumulative distribution, so the realized counts can deviate from
    /// the expected counts by less than one. Much lower selection
    /// variance than [`Roulette`](Selection::Roulette).
    Stochastic,

    /// Sigma scaling: spread-normalized selection weights.
    ///
    /// Inverted scores are recentered by their mean and standard
    /// deviation, `w = max(epsilon, 1 + (f - mean) / (2 sigma))`, which
    /// keeps the pressure stable whether the population has converged or
    /// is still spread out. Zero variance degrades to a uniform wheel.
    SigmaScaling {
        /// Floor for the scaled weights, keeps every row selectable.
        epsilon: f64,
        /// Use the sample standard deviation (n - 1 divisor), for noisy
        /// objectives.
        is_noisy: bool,
    },

    /// Rank-proportionate wheel: weight `n - i` for the row at sorted
    /// position `i`. Ignores fitness magnitudes entirely.
    Ranking,

    /// Baker's linear ranking with configurable pressure in `(1, 2)`.
    ///
    /// Pressure near 1 approaches uniform selection; near 2 doubles the
    /// best row's expectation relative to the average. Sampling inverts
    /// the rank CDF in closed form, one draw per parent.
    LinearRanking {
        /// Selection pressure, strictly between 1 and 2.
        selection_pressure: f64,
    },

    /// Tournament of `tau` distinct contestants; the best-ranked one
    /// (smallest index) wins. `tau = 2` is a light, diversity-friendly
    /// pressure; larger values converge faster.
    Tournament { tau: usize },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Roulette
    }
}

impl Selection {
    /// Sigma scaling with the standard floor (`epsilon = 0.01`) and the
    /// population standard deviation.
    pub fn sigma_scaling() -> Self {
        Selection::SigmaScaling {
            epsilon: 0.01,
            is_noisy: false,
        }
    }

    /// Linear ranking with moderate pressure (1.5).
    pub fn linear_ranking() -> Self {
        Selection::LinearRanking {
            selection_pressure: 1.5,
        }
    }

    /// Binary tournament (`tau = 2`).
    pub fn tournament() -> Self {
        Selection::Tournament { tau: 2 }
    }

    /// Checks the strategy's parameters.
    pub fn validate(&self) -> Result<(), GaError> {
        match *self {
            Selection::LinearRanking { selection_pressure } => {
                if !(selection_pressure > 1.0 && selection_pressure < 2.0) {
                    return Err(GaError::configuration(
                        "selection_pressure",
                        format!("must lie strictly in (1, 2), got {selection_pressure}"),
                    ));
                }
            }
            Selection::Tournament { tau } => {
                if tau < 2 {
                    return Err(GaError::configuration(
                        "tournament_size",
                        format!("must be at least 2, got {tau}"),
                    ));
                }
            }
            Selection::SigmaScaling { epsilon, .. } => {
                if !(epsilon > 0.0 && epsilon.is_finite()) {
                    return Err(GaError::configuration(
                        "sigma_epsilon",
                        format!("must be a positive finite number, got {epsilon}"),
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Draws `count` parent indices from a pool of `scores.len()` rows.
    ///
    /// The pool must be sorted by ascending fitness.
    ///
    /// # Panics
    ///
    /// Panics if the pool is empty, or for
    /// [`FullyRandom`](Selection::FullyRandom) if `count` exceeds the pool
    /// size (distinct indices cannot be delivered).
    pub fn select<R: Rng>(&self, scores: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
        assert!(!scores.is_empty(), "cannot select from an empty pool");
        if count == 0 {
            return Vec::new();
        }
        match *self {
            Selection::FullyRandom => fully_random(scores.len(), count, rng),
            Selection::Roulette => roulette_spin(&inverse_scores(scores), count, rng),
            Selection::Stochastic => stochastic_universal(scores, count, rng),
            Selection::SigmaScaling { epsilon, is_noisy } => {
                let weights = sigma_weights(&inverse_scores(scores), epsilon, is_noisy);
                roulette_spin(&weights, count, rng)
            }
            Selection::Ranking => {
                let n = scores.len();
                let weights: Vec<f64> = (0..n).map(|i| (n - i) as f64).collect();
                roulette_spin(&weights, count, rng)
            }
            Selection::LinearRanking { selection_pressure } => {
                linear_ranking(scores.len(), selection_pressure, count, rng)
            }
            Selection::Tournament { tau } => tournament(scores.len(), tau, count, rng),
        }
    }
}

// ==== strategy internals ====

/// Mirrors scores so the smallest becomes the largest weight.
///
/// Negative scores are first shifted up to zero; the worst row always
/// keeps weight 1, so every weight is strictly positive.
fn inverse_scores(scores: &[f64]) -> Vec<f64> {
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let shift = if min < 0.0 { min } else { 0.0 };
    let max = scores
        .iter()
        .map(|s| s - shift)
        .fold(f64::NEG_INFINITY, f64::max);
    scores.iter().map(|s| max + 1.0 - (s - shift)).collect()
}

/// Spins a cumulative wheel `count` times over positive weights.
fn roulette_spin<R: Rng>(weights: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    let total: f64 = weights.iter().sum();
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut acc = 0.0;
    for w in weights {
        acc += w / total;
        cumulative.push(acc);
    }

    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let u: f64 = rng.random();
        let idx = cumulative.partition_point(|&c| c < u);
        if idx < cumulative.len() {
            picked.push(idx);
        } else {
            // Round-off left the final slot short of 1.0; fall back to a
            // uniform draw over everything but that slot.
            picked.push(rng.random_range(0..cumulative.len() - 1));
        }
    }
    picked
}

/// Stochastic universal sampling: one spin, `count` evenly spaced markers.
fn stochastic_universal<R: Rng>(scores: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    let weights = inverse_scores(scores);
    let total: f64 = weights.iter().sum();
    let step = 1.0 / count as f64;
    let mut marker: f64 = rng.random_range(0.0..step);

    let mut picked = Vec::with_capacity(count);
    let mut cumulative = 0.0;
    for (idx, w) in weights.iter().enumerate() {
        cumulative += w / total;
        while marker < cumulative && picked.len() < count {
            picked.push(idx);
            marker += step;
        }
    }
    // Round-off can leave the last marker past the final cumulative value.
    while picked.len() < count {
        picked.push(weights.len() - 1);
    }
    picked
}

/// Mean/spread-normalized weights over already-inverted scores.
fn sigma_weights(inverted: &[f64], epsilon: f64, is_noisy: bool) -> Vec<f64> {
    let n = inverted.len();
    let divisor = if is_noisy { n.saturating_sub(1) } else { n };
    if divisor == 0 {
        return vec![1.0; n];
    }
    let mean = inverted.iter().sum::<f64>() / n as f64;
    let variance = inverted.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / divisor as f64;
    let sigma = variance.sqrt();
    if sigma == 0.0 {
        return vec![1.0; n];
    }
    inverted
        .iter()
        .map(|f| (1.0 + (f - mean) / (2.0 * sigma)).max(epsilon))
        .collect()
}

/// Closed-form inversion of the linear-ranking CDF (Baker 1985).
///
/// Each uniform draw maps to a rank; rank `n` is the best row, which sits
/// at index 0 of the sorted pool.
fn linear_ranking<R: Rng>(n: usize, pressure: f64, count: usize, rng: &mut R) -> Vec<usize> {
    if n == 1 {
        return vec![0; count];
    }
    let nf = n as f64;
    let tmp = nf * (nf - 1.0);
    let alpha = (2.0 * nf - pressure * (nf + 1.0)) / tmp;
    let beta = 2.0 * (pressure - 1.0) / tmp;

    let a = -2.0 * alpha - beta;
    let b = (2.0 * alpha + beta).powi(2);
    let c = 8.0 * beta;
    let d = 2.0 * beta;

    (0..count)
        .map(|_| {
            let u: f64 = rng.random();
            let rank = ((a + (b + c * u).sqrt()) / d).round() as usize;
            let rank = rank.min(n);
            if rank == 0 {
                0
            } else {
                n - rank
            }
        })
        .collect()
}

/// Repeated tournaments over `tau` distinct contestants each.
fn tournament<R: Rng>(n: usize, tau: usize, count: usize, rng: &mut R) -> Vec<usize> {
    let tau = tau.min(n);
    (0..count)
        .map(|_| {
            index::sample(rng, n, tau)
                .into_iter()
                .min()
                .unwrap_or(0)
        })
        .collect()
}

/// `count` distinct indices, uniform over the pool.
fn fully_random<R: Rng>(n: usize, count: usize, rng: &mut R) -> Vec<usize> {
    assert!(
        count <= n,
        "cannot draw {count} distinct parents from a pool of {n}"
    );
    index::sample(rng, n, count).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn counts(picked: &[usize], n: usize) -> Vec<u32> {
        let mut counts = vec![0u32; n];
        for &idx in picked {
            counts[idx] += 1;
        }
        counts
    }

    #[test]
    fn test_inverse_scores_non_negative_input() {
        assert_eq!(inverse_scores(&[1.0, 2.0, 3.0]), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_inverse_scores_shifts_negatives() {
        // Shift by -2 gives [0, 2, 6]; mirror around max+1=7.
        assert_eq!(inverse_scores(&[-2.0, 0.0, 4.0]), vec![7.0, 5.0, 1.0]);
    }

    #[test]
    fn test_roulette_favors_best() {
        let scores = [1.0, 50.0, 80.0, 100.0];
        let mut rng = create_rng(42);
        let counts = counts(&Selection::Roulette.select(&scores, 10_000, &mut rng), 4);
        assert!(
            counts[0] > counts[3],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_equal_scores_is_uniform() {
        let scores = [5.0; 4];
        let mut rng = create_rng(42);
        let counts = counts(&Selection::Roulette.select(&scores, 10_000, &mut rng), 4);
        for &c in &counts {
            assert!(c > 2000, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_stochastic_counts_match_expectation() {
        // Inverted weights are [4, 3, 2, 1] -> probabilities .4/.3/.2/.1.
        // SUS guarantees each realized count is within 1 of k * p.
        let scores = [1.0, 2.0, 3.0, 4.0];
        let expected = [4.0, 3.0, 2.0, 1.0];
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let picked = Selection::Stochastic.select(&scores, 10, &mut rng);
            assert_eq!(picked.len(), 10);
            let counts = counts(&picked, 4);
            for (i, &c) in counts.iter().enumerate() {
                assert!(
                    (c as f64 - expected[i]).abs() <= 1.0,
                    "count {c} too far from expectation {} at {i}",
                    expected[i]
                );
            }
        }
    }

    #[test]
    fn test_sigma_scaling_favors_best() {
        let scores = [1.0, 5.0, 9.0, 14.0];
        let mut rng = create_rng(42);
        let picked = Selection::sigma_scaling().select(&scores, 10_000, &mut rng);
        let counts = counts(&picked, 4);
        assert!(counts[0] > counts[3], "{counts:?}");
    }

    #[test]
    fn test_sigma_scaling_zero_variance_is_uniform() {
        let scores = [7.0; 4];
        let mut rng = create_rng(42);
        let picked = Selection::sigma_scaling().select(&scores, 10_000, &mut rng);
        let counts = counts(&picked, 4);
        for &c in &counts {
            assert!(c > 2000, "expected uniform wheel, got {counts:?}");
        }
    }

    #[test]
    fn test_ranking_ignores_magnitudes() {
        // Same ranks, wildly different magnitudes: distributions must match.
        let mut rng_a = create_rng(42);
        let mut rng_b = create_rng(42);
        let a = Selection::Ranking.select(&[1.0, 2.0, 3.0, 4.0], 1000, &mut rng_a);
        let b = Selection::Ranking.select(&[0.0, 1e6, 2e6, 1e9], 1000, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ranking_favors_best() {
        let scores = [1.0, 2.0, 3.0, 4.0];
        let mut rng = create_rng(42);
        let counts = counts(&Selection::Ranking.select(&scores, 10_000, &mut rng), 4);
        assert!(counts[0] > counts[3], "{counts:?}");
    }

    #[test]
    fn test_linear_ranking_favors_best() {
        let scores = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sel = Selection::LinearRanking {
            selection_pressure: 1.9,
        };
        let mut rng = create_rng(42);
        let picked = sel.select(&scores, 10_000, &mut rng);
        let counts = counts(&picked, 5);
        assert!(counts[0] > counts[4], "{counts:?}");
        assert!(picked.iter().all(|&i| i < 5));
    }

    #[test]
    fn test_linear_ranking_validation() {
        assert!(Selection::LinearRanking {
            selection_pressure: 1.0
        }
        .validate()
        .is_err());
        assert!(Selection::LinearRanking {
            selection_pressure: 2.0
        }
        .validate()
        .is_err());
        assert!(Selection::linear_ranking().validate().is_ok());
    }

    #[test]
    fn test_tournament_favors_best() {
        let scores = [1.0, 2.0, 3.0, 4.0];
        let sel = Selection::Tournament { tau: 3 };
        let mut rng = create_rng(42);
        let counts = counts(&sel.select(&scores, 10_000, &mut rng), 4);
        assert!(counts[0] > 5000, "tau=3 should pick the best often: {counts:?}");
        assert_eq!(counts[3], 0, "worst can never win a 3-way tournament by rank");
    }

    #[test]
    fn test_tournament_validation() {
        assert!(Selection::Tournament { tau: 1 }.validate().is_err());
        assert!(Selection::tournament().validate().is_ok());
    }

    #[test]
    fn test_fully_random_returns_distinct() {
        let scores = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let picked = Selection::FullyRandom.select(&scores, 3, &mut rng);
            let unique: HashSet<usize> = picked.iter().copied().collect();
            assert_eq!(unique.len(), 3, "indices must be distinct: {picked:?}");
            assert!(picked.iter().all(|&i| i < 6));
        }
    }

    #[test]
    fn test_fully_random_full_pool_is_permutation() {
        let scores = [4.0, 1.0, 3.0, 2.0];
        let mut rng = create_rng(42);
        let mut picked = Selection::FullyRandom.select(&scores, 4, &mut rng);
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "distinct parents")]
    fn test_fully_random_overdraw_panics() {
        let scores = [1.0, 2.0, 3.0, 4.0];
        let mut rng = create_rng(42);
        Selection::FullyRandom.select(&scores, 6, &mut rng);
    }

    #[test]
    #[should_panic(expected = "empty pool")]
    fn test_empty_pool_panics() {
        let mut rng = create_rng(42);
        Selection::Roulette.select(&[], 1, &mut rng);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = create_rng(42);
        assert!(Selection::Roulette.select(&[1.0, 2.0], 0, &mut rng).is_empty());
    }

    #[test]
    fn test_all_strategies_return_count_in_range() {
        let scores = [1.0, 2.5, 3.0, 7.0, 9.0];
        let strategies = [
            Selection::FullyRandom,
            Selection::Roulette,
            Selection::Stochastic,
            Selection::sigma_scaling(),
            Selection::Ranking,
            Selection::linear_ranking(),
            Selection::tournament(),
        ];
        let mut rng = create_rng(42);
        for sel in strategies {
            let picked = sel.select(&scores, 5, &mut rng);
            assert_eq!(picked.len(), 5, "{sel:?}");
            assert!(picked.iter().all(|&i| i < 5), "{sel:?}: {picked:?}");
        }
    }
}
