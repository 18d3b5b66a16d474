//! Population storage: a fitness-ordered table of candidates.

use crate::error::GaError;
use crate::space::SearchSpace;
use rand::Rng;
use std::cmp::Ordering;

/// One candidate solution: decision variables plus its fitness.
///
/// Fitness is the raw objective value; lower is better. Unevaluated
/// candidates carry `f64::INFINITY` until the engine scores them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    pub genes: Vec<f64>,
    pub fitness: f64,
}

impl Individual {
    pub fn new(genes: Vec<f64>, fitness: f64) -> Self {
        Self { genes, fitness }
    }

    /// Candidate awaiting evaluation.
    pub fn unevaluated(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }
}

/// User-supplied starting candidates for a run.
///
/// Scores are optional. When present they are trusted as the fitness of
/// each row and the initial evaluation is skipped; when absent the engine
/// evaluates every row before the first generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartPopulation {
    pub variables: Vec<Vec<f64>>,
    pub scores: Option<Vec<f64>>,
}

impl StartPopulation {
    pub fn new(variables: Vec<Vec<f64>>) -> Self {
        Self {
            variables,
            scores: None,
        }
    }

    /// Attaches known fitness values, row for row.
    pub fn with_scores(mut self, scores: Vec<f64>) -> Self {
        self.scores = Some(scores);
        self
    }
}

/// The population: a flat list of individuals the engine keeps sorted by
/// ascending fitness between generations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    members: Vec<Individual>,
}

impl Population {
    pub fn from_members(members: Vec<Individual>) -> Self {
        Self { members }
    }

    /// Draws `size` uniform candidates from the space, unevaluated.
    pub fn sample<R: Rng>(size: usize, space: &SearchSpace, rng: &mut R) -> Self {
        let members = (0..size)
            .map(|_| Individual::unevaluated(space.sample_genes(rng)))
            .collect();
        Self { members }
    }

    /// Builds a population from user-supplied rows, checking each row's
    /// width against the space dimension and, when scores are attached,
    /// that they line up one per row and are rankable.
    pub fn from_start(start: StartPopulation, dimension: usize) -> Result<Self, GaError> {
        let StartPopulation { variables, scores } = start;
        for (row, genes) in variables.iter().enumerate() {
            if genes.len() != dimension {
                return Err(GaError::DimensionMismatch {
                    row,
                    expected: dimension,
                    actual: genes.len(),
                });
            }
        }
        let members = match scores {
            Some(scores) => {
                if scores.len() != variables.len() {
                    return Err(GaError::ScoreCountMismatch {
                        rows: variables.len(),
                        scores: scores.len(),
                    });
                }
                if let Some(row) = scores.iter().position(|s| s.is_nan()) {
                    return Err(GaError::InvalidResult {
                        message: format!("fitness provided for start row {row} is NaN"),
                    });
                }
                variables
                    .into_iter()
                    .zip(scores)
                    .map(|(genes, fitness)| Individual::new(genes, fitness))
                    .collect()
            }
            None => variables.into_iter().map(Individual::unevaluated).collect(),
        };
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut [Individual] {
        &mut self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.members.iter()
    }

    /// Fitness column in member order.
    pub fn scores(&self) -> Vec<f64> {
        self.members.iter().map(|ind| ind.fitness).collect()
    }

    /// Stable sort by ascending fitness. Ties keep their current order,
    /// so elites that entered first stay ahead of equal-fitness rivals.
    pub fn sort_ascending(&mut self) {
        self.members.sort_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// The lowest-fitness member, regardless of sort state.
    pub fn best(&self) -> Option<&Individual> {
        self.members.iter().min_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(Ordering::Equal)
        })
    }

    /// The highest-fitness member, regardless of sort state.
    pub fn worst(&self) -> Option<&Individual> {
        self.members.iter().max_by(|a, b| {
            a.fitness
                .partial_cmp(&b.fitness)
                .unwrap_or(Ordering::Equal)
        })
    }
}
