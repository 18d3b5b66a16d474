//! Termination policy: generation budget and stagnation patience.
//!
//! Both limits are resolved once at run start, after the effective
//! population size is known (a seeded start population may differ from
//! the configured size).

use crate::config::GaConfig;
use crate::space::{SearchSpace, VarKind};

/// Hard cap on total evaluations implied by a derived budget.
const EVALUATION_CAP: usize = 10_000_000;

/// Resolved generation limits for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    /// Number of generations to breed.
    pub max_generations: usize,
    /// Stagnation patience: the run may stop once the no-improvement
    /// counter exceeds this. Disabled by resolving to `max_generations + 1`,
    /// which the counter can never exceed within the budget.
    pub patience: usize,
}

impl Termination {
    /// Resolves the limits from the configuration, deriving the budget
    /// from the search space when none is set.
    pub fn resolve(config: &GaConfig, space: &SearchSpace, population_size: usize) -> Self {
        let max_generations = match config.max_generations {
            Some(n) => n,
            None => derived_budget(space, population_size),
        };
        let patience = match config.stagnation_limit {
            Some(p) if p >= 1 => p,
            _ => max_generations + 1,
        };
        Self {
            max_generations,
            patience,
        }
    }
}

/// Heuristic generation budget scaled by variable ranges, dimension, and
/// population size. Integer variables contribute proportionally to their
/// lattice width, continuous ones get a flat per-unit factor; the result
/// is capped so that `budget * population` stays within
/// [`EVALUATION_CAP`].
fn derived_budget(space: &SearchSpace, population_size: usize) -> usize {
    let dim = space.dimension() as f64;
    let per_pop = 100.0 / population_size as f64;
    let mut total = 0.0;
    for var in space.vars() {
        total += match var.kind() {
            VarKind::Int => var.span() * dim * per_pop,
            VarKind::Real => var.span() * 50.0 * per_pop,
        };
    }
    let budget = total as usize;
    if budget.saturating_mul(population_size) > EVALUATION_CAP {
        EVALUATION_CAP / population_size
    } else {
        budget
    }
}
