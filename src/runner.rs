//! The evolutionary engine: an elitist generational loop.
//!
//! Each generation: sort the population by ascending fitness, update the
//! best-so-far and the stagnation counter, copy the elites and draw the
//! remaining parents with the configured selection strategy, pick a
//! crossover-eligible subset of that pool, then breed offspring in pairs
//! (crossover, an asymmetric mutation pass, bounds repair) until the
//! population is full again. Only the fresh offspring are evaluated
//! unless parent re-evaluation is requested.

use crate::config::GaConfig;
use crate::error::GaError;
use crate::evaluation::FitnessEvaluator;
use crate::mutation::{mutate, mutate_toward_parents};
use crate::observer::{GenerationObserver, Progress};
use crate::population::{Individual, Population, StartPopulation};
use crate::random::create_rng;
use crate::selection::Selection;
use crate::space::SearchSpace;
use crate::termination::Termination;
use rand::Rng;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The generation budget was used up.
    BudgetExhausted,
    /// The best fitness failed to improve within the stagnation patience.
    Stagnated,
}

/// Fitness summary of one generation's population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Lowest fitness in the population.
    pub best: f64,
    /// Highest fitness in the population.
    pub worst: f64,
    /// Mean fitness of the population.
    pub mean: f64,
}

/// Outcome of a completed run.
///
/// `history` holds one entry per generation observed before breeding,
/// plus a final entry for the last population, so a run of `n`
/// generations yields `n + 1` entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Decision variables of the best individual ever observed.
    pub best_variables: Vec<f64>,
    /// Its fitness.
    pub best_fitness: f64,
    /// The final population, sorted by ascending fitness.
    pub population: Population,
    /// Per-generation fitness summaries.
    pub history: Vec<GenerationStats>,
    /// Number of generations bred.
    pub generations: usize,
    /// Why the run ended.
    pub stop_reason: StopReason,
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use gabox::{GaConfig, GaRunner, Objective, SearchSpace};
///
/// let space = SearchSpace::real(&[(-5.0, 5.0); 3]).unwrap();
/// let config = GaConfig::default().with_max_generations(40).with_seed(42);
/// let objective = Objective::new(|genes: &[f64]| genes.iter().map(|g| g * g).sum());
///
/// let result = GaRunner::run(&space, &config, &objective).unwrap();
/// assert!(result.best_fitness >= 0.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA from a uniform random start, without observation.
    pub fn run<E: FitnessEvaluator>(
        space: &SearchSpace,
        config: &GaConfig,
        evaluator: &E,
    ) -> Result<GaResult, GaError> {
        Self::run_with(space, config, evaluator, None, &mut ())
    }

    /// Runs the GA with an optional start population and an observer.
    ///
    /// A start population overrides `config.population_size` for the
    /// whole run; the parent pool, elite count, and derived budget are
    /// resolved from its actual size. When start scores are provided the
    /// initial evaluation is skipped.
    pub fn run_with<E: FitnessEvaluator, O: GenerationObserver>(
        space: &SearchSpace,
        config: &GaConfig,
        evaluator: &E,
        start: Option<StartPopulation>,
        observer: &mut O,
    ) -> Result<GaResult, GaError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        // 1. Initial population
        let (mut population, prescored) = match start {
            Some(start) => {
                let prescored = start.scores.is_some();
                (Population::from_start(start, space.dimension())?, prescored)
            }
            None => (
                Population::sample(config.population_size, space, &mut rng),
                false,
            ),
        };

        let population_size = population.len();
        let counts = resolve_counts(config, population_size)?;
        let termination = Termination::resolve(config, space, population_size);

        log::debug!(
            "starting run: population={population_size} parents={} elites={} budget={} patience={}",
            counts.parents,
            counts.elites,
            termination.max_generations,
            termination.patience
        );

        // 2. Initial evaluation, unless the start carried scores
        if !prescored {
            let rows: Vec<Vec<f64>> = population.iter().map(|ind| ind.genes.clone()).collect();
            let scores = evaluate_rows(evaluator, &rows)?;
            for (ind, score) in population.members_mut().iter_mut().zip(scores) {
                ind.fitness = score;
            }
        }

        let mut state = RunState::new();
        let mut stop_reason = StopReason::BudgetExhausted;
        let mut generations = 0;

        // 3. Evolutionary loop
        for generation in 1..=termination.max_generations {
            population.sort_ascending();
            state.observe_best(&population.members()[0]);

            let stats = generation_stats(&population);
            state.history.push(stats);
            observer.on_generation(&Progress {
                generation,
                total_generations: termination.max_generations,
                stats,
                best_fitness: state.best_fitness(),
            });

            // Parent pool: elites verbatim, the rest by selection over
            // the full sorted population.
            let parent_pool = select_parents(&population, &counts, &config.selection, &mut rng);

            // Crossover-eligible subset of the pool.
            let eligible =
                draw_eligible(parent_pool.len(), config.crossover_probability, &mut rng);

            // Breed offspring in pairs until the population is full.
            let mut next_generation = parent_pool.clone();
            while next_generation.len() < population_size {
                let p1 = &parent_pool[eligible[rng.random_range(0..eligible.len())]];
                let p2 = &parent_pool[eligible[rng.random_range(0..eligible.len())]];
                let (mut c1, mut c2) = config.crossover.apply(&p1.genes, &p2.genes, &mut rng);
                if config.mutation_probability > 0.0 {
                    mutate(
                        &mut c1,
                        space,
                        &config.mutation,
                        config.mutation_probability,
                        &mut rng,
                    );
                    mutate_toward_parents(
                        &mut c2,
                        &p1.genes,
                        &p2.genes,
                        space,
                        config.mutation_probability,
                        &mut rng,
                    );
                }
                space.repair(&mut c1);
                space.repair(&mut c2);
                next_generation.push(Individual::unevaluated(c1));
                if next_generation.len() < population_size {
                    next_generation.push(Individual::unevaluated(c2));
                }
            }

            // 4. Evaluate the fresh rows (or everything, when parents
            // are re-evaluated).
            let eval_from = if config.reevaluate_parents {
                0
            } else {
                counts.parents
            };
            let rows: Vec<Vec<f64>> = next_generation[eval_from..]
                .iter()
                .map(|ind| ind.genes.clone())
                .collect();
            let scores = evaluate_rows(evaluator, &rows)?;
            for (ind, score) in next_generation[eval_from..].iter_mut().zip(scores) {
                ind.fitness = score;
            }

            population = Population::from_members(next_generation);
            generations = generation;

            // 5. Stagnation check on the freshly bred generation
            if state.stagnation > termination.patience {
                population.sort_ascending();
                if population.members()[0].fitness >= state.best_fitness() {
                    log::warn!(
                        "stopping at generation {generation}: best fitness unimproved for more than {} generations",
                        termination.patience
                    );
                    observer.on_stagnation(generation);
                    stop_reason = StopReason::Stagnated;
                    break;
                }
            }
        }

        // 6. Final bookkeeping
        population.sort_ascending();
        state.observe_final(&population.members()[0]);
        state.history.push(generation_stats(&population));

        let best = state
            .best
            .unwrap_or_else(|| population.members()[0].clone());
        log::debug!(
            "run finished after {generations} generations: best fitness {}",
            best.fitness
        );

        let Individual { genes, fitness } = best;
        Ok(GaResult {
            best_variables: genes,
            best_fitness: fitness,
            population,
            history: state.history,
            generations,
            stop_reason,
        })
    }
}

/// Parent pool and elite sizes resolved against the effective population.
#[derive(Debug, Clone, Copy)]
struct ResolvedCounts {
    parents: usize,
    elites: usize,
}

fn resolve_counts(config: &GaConfig, population_size: usize) -> Result<ResolvedCounts, GaError> {
    if population_size < 2 {
        return Err(GaError::configuration(
            "population_size",
            format!("effective population size is {population_size}, need at least 2"),
        ));
    }

    let mut parents = (config.parents_portion * population_size as f64) as usize;
    // Offspring are bred in pairs, so their slot count must be even.
    if (population_size - parents) % 2 != 0 {
        parents += 1;
    }

    let elites = if config.elite_ratio > 0.0 {
        let raw = population_size as f64 * config.elite_ratio;
        if raw < 1.0 {
            1
        } else {
            raw as usize
        }
    } else {
        0
    };

    if parents < elites {
        return Err(GaError::configuration(
            "parents_portion",
            format!("parent pool of {parents} cannot hold {elites} elites"),
        ));
    }
    if parents == 0 {
        return Err(GaError::configuration(
            "parents_portion",
            format!("parent pool is empty for population size {population_size}"),
        ));
    }
    if let Selection::Tournament { tau } = config.selection {
        if tau > population_size {
            return Err(GaError::configuration(
                "tournament_size",
                format!("tournament of {tau} cannot draw from a population of {population_size}"),
            ));
        }
    }

    Ok(ResolvedCounts { parents, elites })
}

/// Elites verbatim, then selection winners cloned from the full pool.
fn select_parents<R: Rng>(
    population: &Population,
    counts: &ResolvedCounts,
    selection: &Selection,
    rng: &mut R,
) -> Vec<Individual> {
    let members = population.members();
    let mut pool: Vec<Individual> = members[..counts.elites].to_vec();
    let picked = selection.select(&population.scores(), counts.parents - counts.elites, rng);
    pool.extend(picked.into_iter().map(|idx| members[idx].clone()));
    pool
}

/// Bernoulli mask over the parent pool, redrawn until someone is
/// eligible. A zero probability short-circuits to a single random
/// parent, so the offspring become straight clones of it.
fn draw_eligible<R: Rng>(pool: usize, probability: f64, rng: &mut R) -> Vec<usize> {
    if probability == 0.0 {
        return vec![rng.random_range(0..pool)];
    }
    loop {
        let eligible: Vec<usize> = (0..pool).filter(|_| rng.random_bool(probability)).collect();
        if !eligible.is_empty() {
            return eligible;
        }
    }
}

/// Scores `rows` and checks the batch is usable: right length, no NaN.
fn evaluate_rows<E: FitnessEvaluator>(
    evaluator: &E,
    rows: &[Vec<f64>],
) -> Result<Vec<f64>, GaError> {
    let scores = evaluator.evaluate_batch(rows)?;
    if scores.len() != rows.len() {
        return Err(GaError::InvalidResult {
            message: format!(
                "evaluator returned {} scores for {} rows",
                scores.len(),
                rows.len()
            ),
        });
    }
    if let Some(row) = scores.iter().position(|s| s.is_nan()) {
        return Err(GaError::InvalidResult {
            message: format!("fitness for row {row} is NaN"),
        });
    }
    Ok(scores)
}

/// Summary of a population already sorted by ascending fitness.
fn generation_stats(population: &Population) -> GenerationStats {
    let members = population.members();
    let sum: f64 = members.iter().map(|ind| ind.fitness).sum();
    GenerationStats {
        best: members[0].fitness,
        worst: members[members.len() - 1].fitness,
        mean: sum / members.len() as f64,
    }
}

/// Best-so-far tracking across generations.
struct RunState {
    best: Option<Individual>,
    stagnation: usize,
    history: Vec<GenerationStats>,
}

impl RunState {
    fn new() -> Self {
        Self {
            best: None,
            stagnation: 0,
            history: Vec::new(),
        }
    }

    fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |b| b.fitness)
    }

    /// Strict improvement resets the stagnation counter; anything else
    /// increments it. The first observation always counts as an
    /// improvement.
    fn observe_best(&mut self, candidate: &Individual) {
        if candidate.fitness < self.best_fitness() {
            self.best = Some(candidate.clone());
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }
    }

    /// Final update after the loop; no counter bookkeeping.
    fn observe_final(&mut self, candidate: &Individual) {
        if candidate.fitness < self.best_fitness() {
            self.best = Some(candidate.clone());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
