//! Crossover strategies: recombining two parents into two offspring.
//!
//! Swap-family strategies exchange whole genes between the parents, so
//! every offspring gene equals one of the parent genes at that position.
//! Blend-family strategies ([`Arithmetic`](Crossover::Arithmetic),
//! [`Mixed`](Crossover::Mixed)) interpolate instead, which suits
//! continuous variables; integer genes they produce are pulled back onto
//! the lattice by the engine's repair step.
//!
//! # References
//!
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata" (blend crossover)
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use crate::error::GaError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Strategy for producing a pair of offspring from a pair of parents.
///
/// # Examples
///
/// ```
/// use gabox::Crossover;
///
/// // Per-gene coin flip (the default)
/// let cx = Crossover::Uniform;
///
/// // Contiguous two-point exchange
/// let cx = Crossover::TwoPoint;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Swap the prefix `[0, cut)` at a random cut in `[0, n)`.
    ///
    /// A cut of 0 returns plain copies of the parents.
    OnePoint,

    /// Swap a random window `[c1, c2)` with `c1 <= c2 < n`.
    TwoPoint,

    /// Swap each gene independently with probability 0.5.
    Uniform,

    /// Swap each gene independently with a configurable probability.
    Segment {
        /// Per-gene swap probability in `[0, 1]`.
        prob: f64,
    },

    /// Swap a random number of genes at randomly permuted positions.
    Shuffle,

    /// One random blend weight for the whole pair: `o1 = a*x + b*y`,
    /// `o2 = a*y + b*x` with `a + b = 1`. Offspring sum to the parents
    /// gene for gene.
    Arithmetic,

    /// Blend crossover: each offspring gene is uniform over the parents'
    /// interval widened by `alpha` times its width on both sides.
    Mixed {
        /// Interval expansion factor, non-negative. 0 keeps offspring
        /// inside the parents' hull.
        alpha: f64,
    },
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Uniform
    }
}

impl Crossover {
    /// Per-gene swap with the standard probability (0.6).
    pub fn segment() -> Self {
        Crossover::Segment { prob: 0.6 }
    }

    /// Blend crossover with the standard expansion (`alpha = 0.5`).
    pub fn mixed() -> Self {
        Crossover::Mixed { alpha: 0.5 }
    }

    /// Checks the strategy's parameters.
    pub fn validate(&self) -> Result<(), GaError> {
        match *self {
            Crossover::Segment { prob } => {
                if !(0.0..=1.0).contains(&prob) {
                    return Err(GaError::configuration(
                        "segment_probability",
                        format!("must lie in [0, 1], got {prob}"),
                    ));
                }
            }
            Crossover::Mixed { alpha } => {
                if !(alpha >= 0.0 && alpha.is_finite()) {
                    return Err(GaError::configuration(
                        "mixed_alpha",
                        format!("must be a non-negative finite number, got {alpha}"),
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Recombines two parents into two offspring.
    ///
    /// # Panics
    ///
    /// Panics if the parents are empty or of different lengths.
    pub fn apply<R: Rng>(&self, x: &[f64], y: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
        assert_eq!(x.len(), y.len(), "parents must have equal length");
        assert!(!x.is_empty(), "parents must not be empty");

        let n = x.len();
        let mut o1 = x.to_vec();
        let mut o2 = y.to_vec();

        match *self {
            Crossover::OnePoint => {
                let cut = rng.random_range(0..n);
                for i in 0..cut {
                    o1[i] = y[i];
                    o2[i] = x[i];
                }
            }
            Crossover::TwoPoint => {
                let c1 = rng.random_range(0..n);
                let c2 = rng.random_range(c1..n);
                for i in c1..c2 {
                    o1[i] = y[i];
                    o2[i] = x[i];
                }
            }
            Crossover::Uniform => {
                for i in 0..n {
                    if rng.random_bool(0.5) {
                        o1[i] = y[i];
                        o2[i] = x[i];
                    }
                }
            }
            Crossover::Segment { prob } => {
                for i in 0..n {
                    if rng.random_bool(prob) {
                        o1[i] = y[i];
                        o2[i] = x[i];
                    }
                }
            }
            Crossover::Shuffle => {
                let mut order: Vec<usize> = (0..n).collect();
                order.shuffle(rng);
                let swaps = rng.random_range(0..n);
                for &i in order.iter().take(swaps) {
                    o1[i] = y[i];
                    o2[i] = x[i];
                }
            }
            Crossover::Arithmetic => {
                let b: f64 = rng.random();
                let a = 1.0 - b;
                for i in 0..n {
                    o1[i] = a * x[i] + b * y[i];
                    o2[i] = a * y[i] + b * x[i];
                }
            }
            Crossover::Mixed { alpha } => {
                for i in 0..n {
                    let lo = x[i].min(y[i]);
                    let hi = x[i].max(y[i]);
                    let delta = alpha * (hi - lo);
                    if hi > lo {
                        o1[i] = rng.random_range(lo - delta..hi + delta);
                        o2[i] = rng.random_range(lo - delta..hi + delta);
                    } else {
                        o1[i] = lo;
                        o2[i] = lo;
                    }
                }
            }
        }
        (o1, o2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn parents(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..n).map(|i| (i + 100) as f64).collect();
        (x, y)
    }

    /// Checks that position `i` either kept both parent genes or swapped
    /// them, consistently across the two offspring.
    fn swap_consistent(x: &[f64], y: &[f64], o1: &[f64], o2: &[f64]) -> bool {
        x.iter()
            .zip(y)
            .zip(o1.iter().zip(o2))
            .all(|((&xi, &yi), (&ai, &bi))| (ai == xi && bi == yi) || (ai == yi && bi == xi))
    }

    #[test]
    fn test_one_point_swaps_a_prefix() {
        let (x, y) = parents(8);
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let (o1, o2) = Crossover::OnePoint.apply(&x, &y, &mut rng);
            let cut = (0..=8)
                .find(|&c| {
                    o1[..c] == y[..c] && o1[c..] == x[c..] && o2[..c] == x[..c] && o2[c..] == y[c..]
                })
                .unwrap_or_else(|| panic!("not a prefix swap: {o1:?}"));
            assert!(cut < 8, "cut index n is never drawn");
        }
    }

    #[test]
    fn test_two_point_swaps_a_window() {
        let (x, y) = parents(8);
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let (o1, o2) = Crossover::TwoPoint.apply(&x, &y, &mut rng);
            assert!(swap_consistent(&x, &y, &o1, &o2));
            // Swapped positions form one contiguous window.
            let swapped: Vec<bool> = o1.iter().zip(&y).map(|(&a, &yi)| a == yi).collect();
            let flips = swapped.windows(2).filter(|w| w[0] != w[1]).count();
            assert!(flips <= 2, "not contiguous: {swapped:?}");
        }
    }

    #[test]
    fn test_uniform_swaps_positionwise() {
        let (x, y) = parents(16);
        let mut rng = create_rng(42);
        let (o1, o2) = Crossover::Uniform.apply(&x, &y, &mut rng);
        assert!(swap_consistent(&x, &y, &o1, &o2));
    }

    #[test]
    fn test_segment_probability_extremes() {
        let (x, y) = parents(6);
        let mut rng = create_rng(42);
        let (o1, o2) = Crossover::Segment { prob: 1.0 }.apply(&x, &y, &mut rng);
        assert_eq!((o1, o2), (y.clone(), x.clone()));
        let (o1, o2) = Crossover::Segment { prob: 0.0 }.apply(&x, &y, &mut rng);
        assert_eq!((o1, o2), (x.clone(), y.clone()));
    }

    #[test]
    fn test_arithmetic_preserves_pairwise_sums() {
        let x = vec![1.0, -4.0, 0.5];
        let y = vec![3.0, 8.0, 2.5];
        let mut rng = create_rng(42);
        let (o1, o2) = Crossover::Arithmetic.apply(&x, &y, &mut rng);
        for i in 0..3 {
            assert!((o1[i] + o2[i] - (x[i] + y[i])).abs() < 1e-9);
            assert!(o1[i] >= x[i].min(y[i]) - 1e-9 && o1[i] <= x[i].max(y[i]) + 1e-9);
        }
    }

    #[test]
    fn test_mixed_stays_in_expanded_interval() {
        let x = vec![0.0, 5.0];
        let y = vec![4.0, 1.0];
        let cx = Crossover::Mixed { alpha: 0.5 };
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let (o1, o2) = cx.apply(&x, &y, &mut rng);
            for o in [&o1, &o2] {
                // Interval [0,4] widened by 2 on each side -> [-2, 6].
                assert!(o[0] >= -2.0 && o[0] < 6.0);
                assert!(o[1] >= -1.0 && o[1] < 7.0);
            }
        }
    }

    #[test]
    fn test_mixed_equal_genes_pass_through() {
        let x = vec![3.0];
        let y = vec![3.0];
        let mut rng = create_rng(42);
        let (o1, o2) = Crossover::mixed().apply(&x, &y, &mut rng);
        assert_eq!(o1, vec![3.0]);
        assert_eq!(o2, vec![3.0]);
    }

    #[test]
    fn test_identical_parents_clone_through_swaps() {
        let x = vec![2.0, 4.0, 8.0];
        let mut rng = create_rng(42);
        for cx in [
            Crossover::OnePoint,
            Crossover::TwoPoint,
            Crossover::Uniform,
            Crossover::segment(),
            Crossover::Shuffle,
            Crossover::Arithmetic,
        ] {
            let (o1, o2) = cx.apply(&x, &x, &mut rng);
            assert_eq!(o1, x, "{cx:?}");
            assert_eq!(o2, x, "{cx:?}");
        }
    }

    #[test]
    fn test_validate_segment_probability() {
        assert!(Crossover::Segment { prob: 1.5 }.validate().is_err());
        assert!(Crossover::Segment { prob: -0.1 }.validate().is_err());
        assert!(Crossover::segment().validate().is_ok());
    }

    #[test]
    fn test_validate_mixed_alpha() {
        assert!(Crossover::Mixed { alpha: -0.5 }.validate().is_err());
        assert!(Crossover::Mixed { alpha: f64::NAN }.validate().is_err());
        assert!(Crossover::mixed().validate().is_ok());
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_length_mismatch_panics() {
        let mut rng = create_rng(42);
        Crossover::Uniform.apply(&[1.0], &[1.0, 2.0], &mut rng);
    }

    proptest! {
        #[test]
        fn prop_swap_family_keeps_parent_genes(seed in any::<u64>(), n in 1usize..16) {
            let (x, y) = parents(n);
            let mut rng = create_rng(seed);
            for cx in [
                Crossover::OnePoint,
                Crossover::TwoPoint,
                Crossover::Uniform,
                Crossover::segment(),
                Crossover::Shuffle,
            ] {
                let (o1, o2) = cx.apply(&x, &y, &mut rng);
                prop_assert_eq!(o1.len(), n);
                prop_assert_eq!(o2.len(), n);
                prop_assert!(swap_consistent(&x, &y, &o1, &o2), "{:?}", cx);
            }
        }
    }
}
