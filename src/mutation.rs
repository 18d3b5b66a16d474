//! Mutation: per-gene random perturbation of offspring.
//!
//! Integer genes always mutate by a full-range uniform resample. For
//! continuous genes the [`Mutation`] strategy decides the law: uniform
//! around the current value, uniform over the whole interval, or a
//! clipped Gaussian around the value or the interval center.
//!
//! The engine mutates each offspring pair asymmetrically: one child gets
//! the plain per-gene mutation ([`mutate`]), the other is pulled toward
//! the interval spanned by its parents ([`mutate_toward_parents`]), which
//! behaves like a small local refinement step.
//!
//! # References
//!
//! - Michalewicz (1996), "Genetic Algorithms + Data Structures =
//!   Evolution Programs" (uniform and boundary mutation)

use crate::error::GaError;
use crate::space::{SearchSpace, VarKind};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Mutation law for continuous genes.
///
/// Every variant keeps the gene inside its `[lower, upper]` bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Uniform in `[x - alp, x + alp]` where `alp` is the distance from
    /// `x` to its nearest bound. Genes sitting on a bound stay put.
    UniformByX,

    /// Uniform over the whole interval, forgetting the current value.
    UniformByCenter,

    /// Gaussian centered on the current value with standard deviation
    /// `sd * (upper - lower)`, clipped to the bounds.
    GaussByX { sd: f64 },

    /// Gaussian centered on the interval midpoint with standard
    /// deviation `sd * (upper - lower)`, clipped to the bounds.
    GaussByCenter { sd: f64 },
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::UniformByCenter
    }
}

impl Mutation {
    /// Gaussian around the current value with the standard spread (0.3).
    pub fn gauss_by_x() -> Self {
        Mutation::GaussByX { sd: 0.3 }
    }

    /// Gaussian around the interval center with the standard spread (0.3).
    pub fn gauss_by_center() -> Self {
        Mutation::GaussByCenter { sd: 0.3 }
    }

    /// Checks the strategy's parameters.
    pub fn validate(&self) -> Result<(), GaError> {
        match *self {
            Mutation::GaussByX { sd } | Mutation::GaussByCenter { sd } => {
                if !(sd > 0.0 && sd.is_finite()) {
                    return Err(GaError::configuration(
                        "mutation_sd",
                        format!("must be a positive finite number, got {sd}"),
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Mutates one continuous gene within `[lower, upper]`.
    ///
    /// Values already outside the bounds are returned unchanged by
    /// [`UniformByX`](Mutation::UniformByX) and clipped by the Gaussian
    /// variants.
    pub fn apply<R: Rng>(&self, x: f64, lower: f64, upper: f64, rng: &mut R) -> f64 {
        match *self {
            Mutation::UniformByX => {
                let alp = (x - lower).min(upper - x);
                if alp > 0.0 {
                    rng.random_range(x - alp..x + alp)
                } else {
                    x
                }
            }
            Mutation::UniformByCenter => {
                if upper > lower {
                    rng.random_range(lower..upper)
                } else {
                    lower
                }
            }
            Mutation::GaussByX { sd } => {
                let std = sd * (upper - lower);
                let drawn = Normal::new(x, std)
                    .map(|normal| normal.sample(rng))
                    .unwrap_or(x);
                drawn.clamp(lower, upper)
            }
            Mutation::GaussByCenter { sd } => {
                let center = (lower + upper) * 0.5;
                let std = sd * (upper - lower);
                let drawn = Normal::new(center, std)
                    .map(|normal| normal.sample(rng))
                    .unwrap_or(center);
                drawn.clamp(lower, upper)
            }
        }
    }
}

/// Plain mutation pass: each gene mutates independently with
/// `probability`. Integer genes resample uniformly over their full
/// inclusive range; continuous genes follow `strategy`.
pub fn mutate<R: Rng>(
    genes: &mut [f64],
    space: &SearchSpace,
    strategy: &Mutation,
    probability: f64,
    rng: &mut R,
) {
    for (gene, var) in genes.iter_mut().zip(space.vars()) {
        if !rng.random_bool(probability) {
            continue;
        }
        *gene = match var.kind() {
            VarKind::Int => rng.random_range(var.lower() as i64..=var.upper() as i64) as f64,
            VarKind::Real => strategy.apply(*gene, var.lower(), var.upper(), rng),
        };
    }
}

/// Parent-guided mutation pass: mutated genes land between the two
/// parents' values for that position. Integer genes draw from
/// `[min, max)` of the parents; continuous genes draw uniformly between
/// them. When the parents agree the draw falls back to the variable's
/// full range.
pub fn mutate_toward_parents<R: Rng>(
    genes: &mut [f64],
    p1: &[f64],
    p2: &[f64],
    space: &SearchSpace,
    probability: f64,
    rng: &mut R,
) {
    for (i, (gene, var)) in genes.iter_mut().zip(space.vars()).enumerate() {
        if !rng.random_bool(probability) {
            continue;
        }
        match var.kind() {
            VarKind::Int => {
                let lo = p1[i].min(p2[i]) as i64;
                let hi = p1[i].max(p2[i]) as i64;
                *gene = if hi > lo {
                    rng.random_range(lo..hi) as f64
                } else {
                    rng.random_range(var.lower() as i64..=var.upper() as i64) as f64
                };
            }
            VarKind::Real => {
                let lo = p1[i].min(p2[i]);
                let hi = p1[i].max(p2[i]);
                *gene = if hi > lo {
                    rng.random_range(lo..hi)
                } else if var.upper() > var.lower() {
                    rng.random_range(var.lower()..var.upper())
                } else {
                    var.lower()
                };
            }
        }
    }
}
