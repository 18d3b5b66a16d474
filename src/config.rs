//! Run configuration.
//!
//! [`GaConfig`] holds every knob of the evolutionary loop: population
//! shape, operator strategies and rates, termination limits, and the
//! random seed.

use crate::crossover::Crossover;
use crate::error::GaError;
use crate::mutation::Mutation;
use crate::selection::Selection;

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use gabox::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.mutation_probability, 0.1);
/// assert_eq!(config.max_generations, None); // derived from the space
/// ```
///
/// # Builder Pattern
///
/// ```
/// use gabox::{Crossover, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament { tau: 4 })
///     .with_crossover(Crossover::TwoPoint)
///     .with_max_generations(500)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// A seeded start population overrides this for the run.
    pub population_size: usize,

    /// Fraction of the population carried into the next generation as
    /// parents (elites plus selection winners), in `[0, 1]`.
    ///
    /// The resolved parent count is rounded up until the remaining
    /// offspring slots form an even number, since offspring are bred in
    /// pairs.
    pub parents_portion: f64,

    /// Fraction of the population copied verbatim as elites, in `[0, 1]`.
    ///
    /// Any positive ratio keeps at least one elite.
    pub elite_ratio: f64,

    /// Per-parent probability of joining the crossover-eligible set each
    /// generation, in `[0, 1]`.
    ///
    /// With probability 0 the offspring become clones of a single random
    /// parent.
    pub crossover_probability: f64,

    /// Per-gene mutation probability, in `[0, 1]`.
    pub mutation_probability: f64,

    /// Strategy for drawing non-elite parents.
    pub selection: Selection,

    /// Strategy for recombining parent pairs.
    pub crossover: Crossover,

    /// Mutation law for continuous genes.
    pub mutation: Mutation,

    /// Generation budget. `None` derives a budget from the variable
    /// ranges and population size.
    pub max_generations: Option<usize>,

    /// Stop once the best fitness has failed to improve for more than
    /// this many consecutive generations.
    ///
    /// `None` or `Some(0)` disables stagnation-based termination.
    pub stagnation_limit: Option<usize>,

    /// Re-evaluate carried-over parents every generation, for noisy or
    /// time-varying objectives.
    pub reevaluate_parents: bool,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            parents_portion: 0.3,
            elite_ratio: 0.01,
            crossover_probability: 0.5,
            mutation_probability: 0.1,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            max_generations: None,
            stagnation_limit: None,
            reevaluate_parents: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the parent fraction of the population.
    pub fn with_parents_portion(mut self, portion: f64) -> Self {
        self.parents_portion = portion;
        self
    }

    /// Sets the elite fraction of the population.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio;
        self
    }

    /// Sets the crossover-eligibility probability.
    pub fn with_crossover_probability(mut self, probability: f64) -> Self {
        self.crossover_probability = probability;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation law for continuous genes.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets an explicit generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the stagnation patience (0 disables).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = Some(limit);
        self
    }

    /// Enables or disables re-evaluating parents each generation.
    pub fn with_reevaluate_parents(mut self, reevaluate: bool) -> Self {
        self.reevaluate_parents = reevaluate;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration, including the nested strategy
    /// parameters.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size < 2 {
            return Err(GaError::configuration(
                "population_size",
                format!("must be at least 2, got {}", self.population_size),
            ));
        }
        if !(0.0..=1.0).contains(&self.parents_portion) {
            return Err(GaError::configuration(
                "parents_portion",
                format!("must lie in [0, 1], got {}", self.parents_portion),
            ));
        }
        if !(0.0..=1.0).contains(&self.elite_ratio) {
            return Err(GaError::configuration(
                "elite_ratio",
                format!("must lie in [0, 1], got {}", self.elite_ratio),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(GaError::configuration(
                "crossover_probability",
                format!("must lie in [0, 1], got {}", self.crossover_probability),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(GaError::configuration(
                "mutation_probability",
                format!("must lie in [0, 1], got {}", self.mutation_probability),
            ));
        }
        if self.max_generations == Some(0) {
            return Err(GaError::configuration(
                "max_generations",
                "must be at least 1, or None to derive a budget",
            ));
        }
        self.selection.validate()?;
        self.crossover.validate()?;
        self.mutation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert!((config.parents_portion - 0.3).abs() < 1e-12);
        assert!((config.elite_ratio - 0.01).abs() < 1e-12);
        assert!((config.crossover_probability - 0.5).abs() < 1e-12);
        assert!((config.mutation_probability - 0.1).abs() < 1e-12);
        assert_eq!(config.selection, Selection::Roulette);
        assert_eq!(config.crossover, Crossover::Uniform);
        assert_eq!(config.mutation, Mutation::UniformByCenter);
        assert_eq!(config.max_generations, None);
        assert_eq!(config.stagnation_limit, None);
        assert!(!config.reevaluate_parents);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_parents_portion(0.4)
            .with_elite_ratio(0.05)
            .with_crossover_probability(0.8)
            .with_mutation_probability(0.2)
            .with_selection(Selection::tournament())
            .with_crossover(Crossover::TwoPoint)
            .with_mutation(Mutation::gauss_by_x())
            .with_max_generations(1000)
            .with_stagnation_limit(50)
            .with_reevaluate_parents(true)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert!((config.parents_portion - 0.4).abs() < 1e-12);
        assert_eq!(config.selection, Selection::Tournament { tau: 2 });
        assert_eq!(config.crossover, Crossover::TwoPoint);
        assert_eq!(config.mutation, Mutation::GaussByX { sd: 0.3 });
        assert_eq!(config.max_generations, Some(1000));
        assert_eq!(config.stagnation_limit, Some(50));
        assert!(config.reevaluate_parents);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_probability_ranges() {
        assert!(GaConfig::default()
            .with_parents_portion(1.5)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_elite_ratio(-0.1)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_crossover_probability(2.0)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_mutation_probability(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_checks_nested_strategies() {
        let bad_pressure = GaConfig::default().with_selection(Selection::LinearRanking {
            selection_pressure: 2.5,
        });
        assert!(matches!(
            bad_pressure.validate(),
            Err(GaError::Configuration {
                field: "selection_pressure",
                ..
            })
        ));

        let bad_segment =
            GaConfig::default().with_crossover(Crossover::Segment { prob: 1.5 });
        assert!(bad_segment.validate().is_err());

        let bad_sd = GaConfig::default().with_mutation(Mutation::GaussByCenter { sd: 0.0 });
        assert!(bad_sd.validate().is_err());
    }

    #[test]
    fn test_zero_rates_are_legal() {
        let config = GaConfig::default()
            .with_crossover_probability(0.0)
            .with_mutation_probability(0.0);
        assert!(config.validate().is_ok());
    }
}
