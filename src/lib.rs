//! Elitist genetic algorithm for box-bounded continuous, integer, and
//! mixed optimization.
//!
//! Minimizes a scalar objective `f(x)` over a [`SearchSpace`] of
//! per-variable bounds, where each variable is continuous or integer.
//! The engine is an elitist generational GA: the best individuals
//! survive verbatim, parents are drawn by a pluggable [`Selection`]
//! strategy, and offspring are produced by pluggable [`Crossover`] and
//! [`Mutation`] operators, then repaired back into the box.
//!
//! # Key Types
//!
//! - [`SearchSpace`]: Per-variable bounds and kinds ([`VarKind`])
//! - [`GaConfig`]: Algorithm parameters (population size, rates, operators)
//! - [`Objective`]: Wraps a plain `Fn(&[f64]) -> f64` as a [`FitnessEvaluator`]
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best solution, final population, per-generation history
//!
//! # Quick Start
//!
//! ```
//! use gabox::{GaConfig, GaRunner, Objective, SearchSpace};
//!
//! // Minimize the sphere function over [-10, 10]^5.
//! let space = SearchSpace::real(&[(-10.0, 10.0); 5])?;
//! let objective = Objective::new(|x: &[f64]| x.iter().map(|v| v * v).sum());
//! let config = GaConfig::default()
//!     .with_max_generations(100)
//!     .with_seed(42);
//!
//! let result = GaRunner::run(&space, &config, &objective)?;
//! assert!(result.best_fitness < result.history[0].best);
//! # Ok::<(), gabox::GaError>(())
//! ```
//!
//! Runs are fully reproducible under [`GaConfig::with_seed`]. Infeasible
//! rows may be rejected with `f64::INFINITY`; `NaN` fitness aborts the
//! run with an error. Batch evaluation goes through [`FitnessEvaluator`],
//! so objectives can be timed out ([`Objective::with_timeout`]) or, with
//! the `parallel` feature, fanned out across threads.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Baker (1987), *Reducing Bias and Inefficiency in the Selection Algorithm*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*

mod config;
mod crossover;
mod error;
mod evaluation;
mod mutation;
mod observer;
mod population;
mod random;
mod runner;
mod selection;
mod space;
mod termination;

pub use config::GaConfig;
pub use crossover::Crossover;
pub use error::GaError;
#[cfg(feature = "parallel")]
pub use evaluation::ParallelObjective;
pub use evaluation::{FitnessEvaluator, Objective};
pub use mutation::Mutation;
pub use observer::{GenerationObserver, Progress, ProgressBar};
pub use population::{Individual, Population, StartPopulation};
pub use random::create_rng;
pub use runner::{GaResult, GaRunner, GenerationStats, StopReason};
pub use selection::Selection;
pub use space::{SearchSpace, VarKind, VarSpec};
